use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flash_router::{Router, action::resolve};
use http::Method;

fn pages() -> Router<usize> {
    let mut router = Router::new();
    for i in 0..=100 {
        router.insert(Method::GET, &format!("/api/pages{i}/:id"), i).unwrap();
    }
    router
}

fn matching(c: &mut Criterion) {
    let router = pages();

    c.bench_function("match found first", |b| {
        b.iter(|| black_box(router.at(&Method::GET, black_box("/api/pages0/1")).is_ok()))
    });

    c.bench_function("match found last", |b| {
        b.iter(|| black_box(router.at(&Method::GET, black_box("/api/pages100/1")).is_ok()))
    });

    c.bench_function("match not found", |b| {
        b.iter(|| black_box(router.at(&Method::GET, black_box("/api/pag/1")).is_err()))
    });
}

fn actions(c: &mut Criterion) {
    const NONE: &[&str] = &[];
    const EXTRAS: &[&str] = &["GETAction", "GETAction1", "GETAction2", "GETAction3"];

    c.bench_function("action index", |b| {
        b.iter(|| resolve(&Method::GET, black_box(""), black_box(""), NONE))
    });

    c.bench_function("action show", |b| {
        b.iter(|| resolve(&Method::GET, black_box("1"), black_box(""), NONE))
    });

    c.bench_function("action with name", |b| {
        b.iter(|| resolve(&Method::GET, black_box("1"), black_box("action"), NONE))
    });

    c.bench_function("action extra", |b| {
        b.iter(|| resolve(&Method::GET, black_box("action3"), black_box(""), EXTRAS))
    });
}

criterion_group!(benches, matching, actions);
criterion_main!(benches);
