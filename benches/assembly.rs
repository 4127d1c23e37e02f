use criterion::{black_box, criterion_group, criterion_main, Criterion};
use petgraph::graph::NodeIndex;

use fragcrab::{discover, render, Assembly};

fn chain(n: usize) -> (Assembly, NodeIndex) {
    let mut asm = Assembly::new();
    let first = asm.add_fragment("C", &["n"]);
    let mut prev = first;
    for _ in 0..n {
        let next = asm.add_fragment("C", &["n", "n"]);
        asm.join(prev, next).unwrap();
        prev = next;
    }
    (asm, first)
}

fn fused_rings(rings: usize) -> (Assembly, NodeIndex) {
    let mut asm = Assembly::new();
    let first = asm.add_fragment("C", &["r", "r", "r", "r"]);
    let mut left = first;
    for _ in 0..rings {
        let right = asm.add_fragment("C", &["r", "r", "r", "r"]);
        let a = asm.add_fragment("C", &["r", "r"]);
        let b = asm.add_fragment("C", &["r", "r"]);
        asm.join(left, a).unwrap();
        asm.join(a, b).unwrap();
        asm.join(b, right).unwrap();
        asm.join(right, left).unwrap();
        left = right;
    }
    (asm, first)
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");
    group.bench_function("chain_1000", |b| b.iter(|| black_box(chain(1000))));
    group.bench_function("fused_rings_250", |b| b.iter(|| black_box(fused_rings(250))));
    group.finish();
}

fn bench_discover(c: &mut Criterion) {
    let (chain_asm, chain_root) = chain(1000);
    let (ring_asm, ring_root) = fused_rings(250);

    let mut group = c.benchmark_group("discover");
    group.bench_function("chain_1000", |b| {
        b.iter(|| black_box(discover(black_box(&chain_asm), chain_root)))
    });
    group.bench_function("fused_rings_250", |b| {
        b.iter(|| black_box(discover(black_box(&ring_asm), ring_root)))
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let (ring_asm, ring_root) = fused_rings(250);

    let mut group = c.benchmark_group("render");
    group.bench_function("fused_rings_250", |b| {
        b.iter(|| black_box(render(black_box(&ring_asm), ring_root)))
    });
    group.finish();
}

criterion_group!(benches, bench_join, bench_discover, bench_render);
criterion_main!(benches);
