use crate::common::{configure_criterion, realistic_errors};
use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use error_sdk::config::DisclosurePolicy;
use error_sdk::handlers::Dispatcher;
use error_sdk::Exception;
use std::hint::black_box;
use std::io;

fn quiet(caching: bool) -> DisclosurePolicy {
    DisclosurePolicy::builder().log_exceptions(false).enable_caching(caching).build()
}

pub fn bench_dispatch_warm_memo(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(quiet(true));
    let err = Exception::database("deadlock");
    dispatcher.dispatch(&err);

    c.bench_function("dispatch/warm_memo", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&err))))
    });
}

pub fn bench_dispatch_cold_memo(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(quiet(true));
    let err = Exception::database("deadlock");

    c.bench_function("dispatch/cold_memo", |b| {
        b.iter(|| {
            dispatcher.clear_cache();
            black_box(dispatcher.dispatch(black_box(&err)))
        })
    });
}

pub fn bench_dispatch_uncached(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(quiet(false));
    let err = Exception::database("deadlock");

    c.bench_function("dispatch/caching_disabled", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&err))))
    });
}

pub fn bench_dispatch_foreign(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(quiet(true));
    let err = io::Error::new(io::ErrorKind::Other, "disk full");

    c.bench_function("dispatch/unhandled_foreign", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&err))))
    });
}

pub fn bench_dispatch_mixed_batch(c: &mut Criterion) {
    let errors = realistic_errors();
    let mut group = c.benchmark_group("dispatch/mixed_batch");
    group.throughput(Throughput::Elements(errors.len() as u64));

    for caching in [true, false] {
        let dispatcher = Dispatcher::new(quiet(caching));
        group.bench_with_input(BenchmarkId::new("caching", caching), &caching, |b, _| {
            b.iter(|| {
                for err in errors {
                    black_box(dispatcher.dispatch(err));
                }
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = dispatch_benches;
    config = configure_criterion();
    targets =
        bench_dispatch_warm_memo,
        bench_dispatch_cold_memo,
        bench_dispatch_uncached,
        bench_dispatch_foreign,
        bench_dispatch_mixed_batch,
}
