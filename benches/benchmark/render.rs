use crate::common::{configure_criterion, nested_exception};
use criterion::{criterion_group, BenchmarkId, Criterion};
use error_sdk::config::DisclosurePolicy;
use error_sdk::render::{RenderFormat, Renderer};
use std::hint::black_box;

pub fn bench_to_details(c: &mut Criterion) {
    let renderer = Renderer::new(DisclosurePolicy::development());
    let err = nested_exception();

    c.bench_function("render/to_details", |b| {
        b.iter(|| black_box(renderer.to_details(black_box(&err), true)))
    });
}

pub fn bench_formats(c: &mut Criterion) {
    let renderer = Renderer::new(DisclosurePolicy::development());
    let err = nested_exception();
    let mut group = c.benchmark_group("render/format");

    for format in [RenderFormat::Json, RenderFormat::Xml, RenderFormat::PlainText, RenderFormat::LogLine] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{format:?}")), &format, |b, format| {
            b.iter(|| black_box(renderer.render(black_box(&err), *format, false)))
        });
    }
    group.finish();
}

criterion_group! {
    name = render_benches;
    config = configure_criterion();
    targets =
        bench_to_details,
        bench_formats,
}
