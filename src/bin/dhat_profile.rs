//! DHAT heap profiler for lrutree.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use lrutree::builder::OrderedLruBuilder;
use lrutree::policy::ordered_lru::OrderedLruCache;
use lrutree::traits::CoreCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload(cache: &mut OrderedLruCache<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.find(&key).is_end() {
            cache.insert(key, key);
        }
    }
}

/// Uniform random upserts; every miss past warm-up evicts.
fn eviction_churn(cache: &mut OrderedLruCache<u64, u64>, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let key = rng.next_u64();
        let _ = CoreCache::insert(cache, key, key);
    }
}

/// Erase roughly every other entry through in-order positions.
fn erase_walk(cache: &mut OrderedLruCache<u64, u64>) {
    let mut pos = cache.begin();
    let mut erase = false;
    while !pos.is_end() {
        let next = cache.advance(pos);
        if erase {
            cache.erase(pos);
        }
        erase = !erase;
        pos = next;
    }
}

fn profile(label: &str, mut cache: OrderedLruCache<u64, u64>) {
    println!("=== Profiling {label} ===");
    let operations = 100_000;
    let universe = 16_384;
    let mut rng = XorShift64::new(7);

    // Warm up with random keys so the index stays shallow.
    for _ in 0..cache.capacity() {
        let key = rng.next_u64() % universe;
        cache.insert(key, key);
    }

    hotset_workload(&mut cache, operations, universe, 42);
    eviction_churn(&mut cache, operations / 4, 99);
    erase_walk(&mut cache);

    let checksum: u64 = cache.values().fold(0, |acc, v| acc.wrapping_add(*v));
    println!(
        "  Final size: {}, tree height: {}, checksum: {checksum}",
        cache.len(),
        cache.tree_height()
    );
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("lrutree DHAT Heap Profiling");
    println!("===========================\n");

    let capacity = 4096;
    profile("lazy growth", OrderedLruBuilder::new(capacity).build());
    profile(
        "preallocated",
        OrderedLruBuilder::new(capacity).preallocate(true).build(),
    );

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
