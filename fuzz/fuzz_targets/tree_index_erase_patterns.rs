#![no_main]

use libfuzzer_sys::fuzz_target;
use lrutree::policy::ordered_lru::OrderedLruCache;

// Fuzz erase order against arbitrary tree shapes
//
// The first half of the input builds a tree (insertion order decides its
// shape), the second half erases keys by rank, exercising leaf, single-child
// and predecessor-splice removals in every combination.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let (build, erase) = data.split_at(data.len() / 2);
    let mut cache: OrderedLruCache<u8, ()> = OrderedLruCache::new(256);
    for &key in build {
        cache.insert(key, ());
    }

    let mut expected: Vec<u8> = cache.keys().copied().collect();
    for &pick in erase {
        if expected.is_empty() {
            break;
        }
        let key = expected.remove(usize::from(pick) % expected.len());
        let pos = cache.position_of(&key);
        assert_eq!(cache.erase(pos).0, key);

        let actual: Vec<u8> = cache.keys().copied().collect();
        assert_eq!(actual, expected);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
