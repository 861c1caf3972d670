use criterion::criterion_main;

mod common;
mod dispatch;
mod render;

criterion_main!(
    taxonomy::taxonomy_benches,
    dispatch::dispatch_benches,
    render::render_benches,
);
