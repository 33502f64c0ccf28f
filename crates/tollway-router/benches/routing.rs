//! Routing benchmarks.
//!
//! Run with: `cargo bench -p tollway-router`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;
use tollway_router::{PathPattern, RouteId, Router};

fn build_router(num_routes: usize) -> Router {
    let mut router = Router::new();
    let mut next_id = 0;
    let mut add = |router: &mut Router, pattern: String| {
        let pattern = PathPattern::parse(&pattern).expect("valid bench pattern");
        router
            .insert(&Method::GET, &pattern, RouteId::new(next_id))
            .expect("unique bench route");
        next_id += 1;
    };

    for i in 0..num_routes / 3 {
        add(&mut router, format!("/api/v1/resource{i}"));
        add(&mut router, format!("/api/v1/resource{i}/{{id}}"));
        add(&mut router, format!("/api/v1/org/{{org_id}}/resource{i}/{{id}}"));
    }

    router
}

fn bench_static_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("static_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource30")));
    });
}

fn bench_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("param_match", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource25/12345")));
    });
}

fn bench_nested_param_match(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("nested_param_match", |b| {
        b.iter(|| {
            black_box(router.match_route(&Method::GET, "/api/v1/org/acme-corp/resource10/12345"))
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(100);

    c.bench_function("miss", |b| {
        b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/nonexistent/path")));
    });
}

fn bench_route_count_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_count_scaling");

    for size in [30, 300, 3000] {
        let router = build_router(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &router, |b, router| {
            b.iter(|| black_box(router.match_route(&Method::GET, "/api/v1/resource9/42")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_static_match,
    bench_param_match,
    bench_nested_param_match,
    bench_miss,
    bench_route_count_scaling
);
criterion_main!(benches);
