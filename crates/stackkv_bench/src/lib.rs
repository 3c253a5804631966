//! Benchmark utilities.

use rand::Rng;
use stackkv_core::TransactionalStore;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{i:08}")).collect()
}

/// Generate a random value drawn from `distinct` possibilities.
pub fn random_value(distinct: u32) -> String {
    let mut rng = rand::thread_rng();
    format!("v{}", rng.gen_range(0..distinct.max(1)))
}

/// Build a store with `base_keys` committed keys and `depth` open
/// transactions, each overriding `per_level` of those keys.
pub fn layered_store(base_keys: usize, depth: usize, per_level: usize) -> TransactionalStore {
    let keys = generate_keys(base_keys);
    let mut store = TransactionalStore::new();
    for key in &keys {
        store.set(key.as_str(), random_value(16));
    }

    let mut rng = rand::thread_rng();
    for _ in 0..depth {
        store.begin();
        for _ in 0..per_level.min(base_keys) {
            let key = &keys[rng.gen_range(0..base_keys)];
            if rng.gen_bool(0.2) {
                store.delete(key.as_str());
            } else {
                store.set(key.as_str(), random_value(16));
            }
        }
    }
    store
}
