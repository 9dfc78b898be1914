use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrutree::policy::ordered_lru::OrderedLruCache;
use lrutree::traits::CoreCache;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const CAPACITY: usize = 1024;

fn shuffled(count: u64, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..count).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}

fn filled() -> OrderedLruCache<u64, u64> {
    let mut cache = OrderedLruCache::new(CAPACITY);
    for key in shuffled(CAPACITY as u64, 1) {
        cache.insert(key, key);
    }
    cache
}

fn bench_insert_find(c: &mut Criterion) {
    let probes = shuffled(CAPACITY as u64, 2);
    c.bench_function("ordered_lru_insert_find", |b| {
        b.iter_batched(
            filled,
            |mut cache| {
                for &key in &probes {
                    cache.insert(black_box(key + 10_000), key);
                    let _ = black_box(cache.find(&black_box(key)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_lru(c: &mut Criterion) {
    c.bench_function("ordered_lru_pop_lru", |b| {
        b.iter_batched(
            filled,
            |mut cache| {
                for _ in 0..CAPACITY {
                    let _ = black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    let keys = shuffled(4 * CAPACITY as u64, 3);
    c.bench_function("ordered_lru_eviction_churn", |b| {
        b.iter_batched(
            filled,
            |mut cache| {
                for &key in &keys {
                    let _ = CoreCache::insert(&mut cache, black_box(key + 10_000), key);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_erase_by_position(c: &mut Criterion) {
    let order = shuffled(CAPACITY as u64, 4);
    c.bench_function("ordered_lru_erase_by_position", |b| {
        b.iter_batched(
            filled,
            |mut cache| {
                for key in &order {
                    let pos = cache.position_of(key);
                    black_box(cache.erase(pos));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_traversal(c: &mut Criterion) {
    let cache = filled();

    c.bench_function("ordered_lru_cursor_walk", |b| {
        b.iter(|| {
            let mut pos = cache.begin();
            let mut sum = 0u64;
            while !pos.is_end() {
                sum = sum.wrapping_add(cache[pos]);
                pos = cache.advance(pos);
            }
            black_box(sum)
        })
    });

    c.bench_function("ordered_lru_iter", |b| {
        b.iter(|| black_box(cache.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
    });

    c.bench_function("ordered_lru_iter_recency", |b| {
        b.iter(|| black_box(cache.iter_recency().count()))
    });
}

criterion_group!(
    benches,
    bench_insert_find,
    bench_pop_lru,
    bench_eviction_churn,
    bench_erase_by_position,
    bench_traversal
);
criterion_main!(benches);
