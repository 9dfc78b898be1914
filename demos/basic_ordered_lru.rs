use lrutree::policy::ordered_lru::OrderedLruCache;

fn main() {
    let mut cache: OrderedLruCache<u32, String> = OrderedLruCache::new(2);

    cache.insert(2, "beta".to_string());
    cache.insert(1, "alpha".to_string());

    let pos = cache.find(&2);
    if !pos.is_end() {
        println!("hit 2: {}", cache[pos]);
    }

    let (_, inserted) = cache.insert(3, "gamma".to_string());
    println!("inserted 3? {inserted}");
    println!("contains 1? {}", cache.contains(&1));

    let keys: Vec<_> = cache.keys().collect();
    println!("keys in order: {keys:?}");
}

// Expected output:
// hit 2: beta
// inserted 3? true
// contains 1? false
// keys in order: [2, 3]
//
// Explanation: capacity=2; after find(&2), key 2 is MRU and key 1 is LRU.
// Inserting key 3 evicts key 1. Iteration follows key order, not recency.
