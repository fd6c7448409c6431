use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rupor::Registry;
use tokio::runtime::Runtime;

#[derive(Debug)]
struct Tick;

fn bench_subscribe(c: &mut Criterion) {
    let registry = Registry::new();
    c.bench_function("registry_subscribe", |b| {
        b.iter(|| {
            registry
                .subscribe(black_box(&["bench", "chan"]), |_: &Tick| {})
                .unwrap();
        })
    });
}

fn bench_broadcast_0_subs(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Registry::new();
    c.bench_function("broadcast_0_subs", |b| {
        b.iter(|| {
            rt.block_on(registry.broadcast(black_box(&["bench", "chan"]), Tick))
                .unwrap();
        })
    });
}

fn bench_broadcast_1_sub(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Registry::new();
    registry.subscribe(&["bench", "chan"], |_: &Tick| {}).unwrap();
    c.bench_function("broadcast_1_sub", |b| {
        b.iter(|| {
            rt.block_on(registry.broadcast(black_box(&["bench", "chan"]), Tick))
                .unwrap();
        })
    });
}

fn bench_broadcast_10_subs(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Registry::new();
    for _ in 0..10 {
        registry.subscribe(&["bench", "chan"], |_: &Tick| {}).unwrap();
    }
    c.bench_function("broadcast_10_subs", |b| {
        b.iter(|| {
            rt.block_on(registry.broadcast(black_box(&["bench", "chan"]), Tick))
                .unwrap();
        })
    });
}

fn bench_broadcast_100_subs(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Registry::new();
    for _ in 0..100 {
        registry.subscribe(&["bench", "chan"], |_: &Tick| {}).unwrap();
    }
    c.bench_function("broadcast_100_subs", |b| {
        b.iter(|| {
            rt.block_on(registry.broadcast(black_box(&["bench", "chan"]), Tick))
                .unwrap();
        })
    });
}

fn bench_broadcast_deep_path(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = Registry::new();
    let topic = ["a", "b", "c", "d", "e", "f", "g", "h"];
    registry.subscribe(&topic, |_: &Tick| {}).unwrap();
    c.bench_function("broadcast_deep_path", |b| {
        b.iter(|| {
            rt.block_on(registry.broadcast(black_box(&topic), Tick))
                .unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_subscribe,
    bench_broadcast_0_subs,
    bench_broadcast_1_sub,
    bench_broadcast_10_subs,
    bench_broadcast_100_subs,
    bench_broadcast_deep_path,
);
criterion_main!(benches);
