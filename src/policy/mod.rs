pub mod ordered_lru;
