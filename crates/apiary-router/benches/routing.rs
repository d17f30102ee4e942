//! Routing benchmarks.
//!
//! Run with: `cargo bench -p apiary-router`

use apiary_router::{Pattern, Router};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;

fn build_router(num_routes: usize) -> Router<usize> {
    let mut router = Router::new();

    for i in 0..num_routes / 3 {
        let literal = Pattern::parse(&format!("/api/v1/resource{i}")).unwrap();
        let param = Pattern::parse(&format!("/api/v1/resource{i}/:id")).unwrap();
        let nested = Pattern::parse(&format!("/api/v1/org/:org/resource{i}/:id")).unwrap();
        router.insert(Method::GET, literal, i).unwrap();
        router.insert(Method::GET, param, i).unwrap();
        router.insert(Method::GET, nested, i).unwrap();
    }

    router
}

fn bench_literal_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("literal_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource20")));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource25/12345")));
    });
}

fn bench_nested_param_match(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("nested_param_match", |b| {
        b.iter(|| {
            black_box(router.match_route(&Method::GET, "/api/v1/org/acme-corp/resource10/12345"))
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(99);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/nonexistent/path")));
    });
}

fn bench_route_count_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_count_scaling");

    for count in [9, 99, 999] {
        let router = build_router(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &router, |b, router| {
            b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource2/7")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_literal_match,
    bench_param_match,
    bench_nested_param_match,
    bench_miss,
    bench_route_count_scaling
);
criterion_main!(benches);
