//! Benchmark template construction and rendering time.

use criterion::{criterion_group, criterion_main, Criterion};

use benches::context;
use canopy::mode::html::Html;
use canopy::mode::tree::Tree;

criterion_main! { benches }
criterion_group! { benches, bench_build, bench_render }

/// Benchmarks the time taken to build and register the templates.
fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| benches::engine(Html).unwrap());
    });
}

/// Benchmarks the time taken to render the page in each mode.
fn bench_render(c: &mut Criterion) {
    let mut g = c.benchmark_group("render");

    let ctx = context::random(10, 15);

    let engine = benches::engine(Html).unwrap();
    g.bench_function("html", |b| {
        let template = engine.template("page").unwrap();
        b.iter(|| template.render(&ctx).unwrap());
    });

    let engine = benches::engine(Tree).unwrap();
    g.bench_function("tree", |b| {
        let template = engine.template("page").unwrap();
        b.iter(|| template.render(&ctx).unwrap());
    });

    g.finish();
}
