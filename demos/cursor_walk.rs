use lrutree::policy::ordered_lru::OrderedLruCache;

fn main() {
    let mut cache = OrderedLruCache::new(8);
    for word in ["pear", "apple", "fig", "kiwi", "date"] {
        cache.insert(word, word.len());
    }

    // Forward with positions.
    let mut pos = cache.begin();
    while pos != cache.end() {
        let (word, len) = cache.at(pos);
        println!("{word} ({len})");
        pos = cache.advance(pos);
    }

    // Backward with a borrowing cursor.
    let mut cursor = cache.cursor_back();
    let mut reversed = Vec::new();
    while let Some(word) = cursor.key() {
        reversed.push(*word);
        cursor.move_prev();
    }
    println!("reversed: {reversed:?}");

    // Erase every word shorter than four letters while walking.
    let mut pos = cache.begin();
    while !pos.is_end() {
        let next = cache.advance(pos);
        if *cache.at(pos).1 < 4 {
            let (word, _) = cache.erase(pos);
            println!("erased {word}");
        }
        pos = next;
    }
    println!("left: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// apple (5)
// date (4)
// fig (3)
// kiwi (4)
// pear (4)
// reversed: ["pear", "kiwi", "fig", "date", "apple"]
// erased fig
// left: ["apple", "date", "kiwi", "pear"]
//
// Explanation: positions stay valid across erasure of other entries, so the
// successor can be taken before the current entry is erased.
