// Arena allocator benchmarks for the L0 compiler core.
//
// Measures sequential allocation, mixed-size workloads, block growth, and
// string allocation — the operations the parser and evaluator hit hardest.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use l0_mem::Arena;

fn bench_sequential_allocations(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_alloc");
    group.sample_size(1000);

    for size in &[4u64, 16, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let arena = Arena::new(4096);
            b.iter(|| {
                arena.alloc(black_box(size));
            });
        });
    }

    group.finish();
}

fn bench_mixed_allocations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_alloc");
    group.sample_size(1000);

    group.bench_function("variable_sizes", |b| {
        let arena = Arena::new(4096);
        let sizes: [u64; 5] = [4, 16, 64, 256, 1024];
        let mut i = 0;

        b.iter(|| {
            arena.alloc(black_box(sizes[i % sizes.len()]));
            i += 1;
        });
    });

    group.finish();
}

fn bench_block_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_growth");
    group.sample_size(100);

    group.bench_function("forces_new_blocks", |b| {
        b.iter(|| {
            let arena = Arena::new(1024);
            for _ in 0..200 {
                arena.alloc(black_box(64u64));
            }
        });
    });

    group.finish();
}

fn bench_string_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_alloc");
    group.sample_size(1000);

    group.bench_function("alloc_str", |b| {
        let arena = Arena::new(4096);
        b.iter(|| {
            black_box(arena.alloc_str("a-reasonably-sized-symbol-name"));
        });
    });

    group.finish();
}

fn bench_arena_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_stats");
    group.sample_size(10000);

    group.bench_function("stats", |b| {
        let arena = Arena::new(4096);
        for _ in 0..10 {
            arena.alloc(256u64);
        }

        b.iter(|| {
            black_box(arena.stats());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_allocations,
    bench_mixed_allocations,
    bench_block_growth,
    bench_string_allocation,
    bench_arena_stats,
);
criterion_main!(benches);
