//! Workload benchmarks: hit rate and throughput under synthetic access
//! patterns, plus the cost of an unbalanced index under sorted insertion.
//!
//! Run with: `cargo bench --bench workloads`
//!
//! For micro-ops (insert/find/erase latency), see: `cargo bench --bench ordered_lru`

mod common;

use std::time::Instant;

use common::workload::{Workload, WorkloadSpec, run_hit_rate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lrutree::builder::OrderedLruBuilder;
use lrutree::policy::ordered_lru::OrderedLruCache;

const CAPACITY: usize = 4096;
const UNIVERSE: u64 = 16_384;
const OPS: usize = 200_000;
const SEED: u64 = 42;

fn workloads() -> Vec<(&'static str, Workload)> {
    vec![
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("zipfian_1.0", Workload::Zipfian { exponent: 1.0 }),
        ("zipfian_0.8", Workload::Zipfian { exponent: 0.8 }),
    ]
}

// ============================================================================
// Hit Rate Benchmarks
// ============================================================================

fn bench_hit_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_rate");
    group.throughput(Throughput::Elements(OPS as u64));

    for (workload_name, workload) in workloads() {
        group.bench_with_input(
            BenchmarkId::new("ordered_lru", workload_name),
            &workload,
            |b, &wl| {
                b.iter_custom(|iters| {
                    let mut total = std::time::Duration::default();
                    for _ in 0..iters {
                        let mut cache = OrderedLruBuilder::new(CAPACITY)
                            .preallocate(true)
                            .build::<u64, u64>();
                        let mut generator = WorkloadSpec {
                            universe: UNIVERSE,
                            workload: wl,
                            seed: SEED,
                        }
                        .generator();
                        let start = Instant::now();
                        let _ = run_hit_rate(&mut cache, &mut generator, OPS);
                        total += start.elapsed();
                    }
                    total
                });
            },
        );
    }
    group.finish();

    // One untimed pass per workload for a readable summary.
    for (workload_name, workload) in workloads() {
        let mut cache = OrderedLruCache::new(CAPACITY);
        let mut generator = WorkloadSpec {
            universe: UNIVERSE,
            workload,
            seed: SEED,
        }
        .generator();
        let rate = run_hit_rate(&mut cache, &mut generator, OPS);
        println!(
            "{workload_name:>14}: hit rate {:.3}, tree height {}",
            rate.hit_rate(),
            cache.tree_height()
        );
    }
}

// ============================================================================
// Index Shape
// ============================================================================

fn bench_index_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_shape");
    let size = 512u64;
    group.throughput(Throughput::Elements(size));

    group.bench_function("sorted_insert", |b| {
        b.iter(|| {
            let mut cache = OrderedLruCache::new(size as usize);
            for key in 0..size {
                cache.insert(key, key);
            }
            cache
        })
    });

    group.bench_function("scattered_insert", |b| {
        b.iter(|| {
            let mut cache = OrderedLruCache::new(size as usize);
            for i in 0..size {
                // 301 is odd, so this visits every key once.
                let key = (i * 301) % size;
                cache.insert(key, key);
            }
            cache
        })
    });

    group.finish();
}

criterion_group!(benches, bench_hit_rates, bench_index_shape);
criterion_main!(benches);
