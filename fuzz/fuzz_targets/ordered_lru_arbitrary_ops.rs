#![no_main]

use libfuzzer_sys::fuzz_target;
use lrutree::policy::ordered_lru::{OrderedLruCache, Position};
use lrutree::traits::CoreCache;

// Fuzz arbitrary operation sequences on OrderedLruCache
//
// Mixes insert, upsert, find, erase (live and stale positions), cursor
// moves, pop_lru and clear, checking structural invariants after each step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut cache: OrderedLruCache<u8, u8> = OrderedLruCache::new(capacity);
    let mut seen: Vec<Position> = Vec::new();

    for chunk in data[1..].chunks_exact(2) {
        let op = chunk[0] % 9;
        let key = chunk[1] % 64;

        match op {
            0 | 1 => {
                // insert
                let old_len = cache.len();
                let (pos, inserted) = cache.insert(key, chunk[0]);
                assert_eq!(cache.at(pos).0, &key);
                if inserted {
                    assert_eq!(cache.len(), (old_len + 1).min(capacity));
                } else {
                    assert_eq!(cache.len(), old_len);
                }
                assert_eq!(cache.recency_rank(&key), Some(0));
                seen.push(pos);
            },
            2 => {
                // upsert
                let _ = CoreCache::insert(&mut cache, key, chunk[0]);
                assert_eq!(cache.peek(&key), Some(&chunk[0]));
            },
            3 => {
                // find
                let pos = cache.find(&key);
                if !pos.is_end() {
                    assert_eq!(cache.at(pos).0, &key);
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            4 => {
                // erase a remembered position, possibly stale
                if !seen.is_empty() {
                    let pos = seen.swap_remove(usize::from(key) % seen.len());
                    let live = cache.get_at(pos).map(|(k, _)| *k);
                    let erased = cache.try_erase(pos).map(|(k, _)| k);
                    assert_eq!(erased, live);
                    if let Some(k) = erased {
                        assert!(!cache.contains(&k));
                    }
                }
            },
            5 => {
                // walk forward from begin
                let mut pos = cache.begin();
                let mut count = 0;
                let mut prev: Option<u8> = None;
                while !pos.is_end() {
                    let k = *cache.at(pos).0;
                    assert!(prev.is_none_or(|p| p < k));
                    prev = Some(k);
                    count += 1;
                    pos = cache.advance(pos);
                }
                assert_eq!(count, cache.len());
            },
            6 => {
                // walk backward from end
                let mut pos = cache.retreat(cache.end());
                let mut count = 0;
                while !pos.is_end() {
                    count += 1;
                    pos = cache.retreat(pos);
                }
                assert_eq!(count, cache.len());
            },
            7 => {
                // pop_lru
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            },
            8 => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                } else {
                    let _ = cache.touch(&key);
                }
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
