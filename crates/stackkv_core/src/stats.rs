//! Store statistics.
//!
//! Counters are updated by the store as commands run and can be read at any
//! time through [`TransactionalStore::stats`](crate::TransactionalStore::stats).
//!
//! # Usage
//!
//! ```rust
//! use stackkv_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.set("a", "1");
//! store.begin();
//! store.commit().unwrap();
//!
//! let stats = store.stats();
//! assert_eq!(stats.sets(), 1);
//! assert_eq!(stats.commits(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics and counters.
///
/// All counters are atomic so `get` and `count` can record through `&self`.
/// Values are monotonically increasing.
#[derive(Debug, Default)]
pub struct StoreStats {
    // Command counters
    /// Total number of SET operations.
    sets: AtomicU64,
    /// Total number of GET operations.
    gets: AtomicU64,
    /// Total number of GET operations that found no visible value.
    misses: AtomicU64,
    /// Total number of DELETE operations.
    deletes: AtomicU64,
    /// Total number of COUNT operations.
    counts: AtomicU64,

    // Transaction counters
    /// Total number of transactions started.
    begins: AtomicU64,
    /// Total number of transactions committed.
    commits: AtomicU64,
    /// Total number of transactions rolled back.
    rollbacks: AtomicU64,
    /// Total number of COMMIT/ROLLBACK calls rejected while idle.
    no_transaction: AtomicU64,

    // Gauges
    /// Deepest nesting level observed.
    max_depth: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get(&self, hit: bool) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count(&self) {
        self.counts.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a BEGIN that left the stack `depth` layers deep.
    pub(crate) fn record_begin(&self, depth: usize) {
        self.begins.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_transaction(&self) {
        self.no_transaction.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the total number of SET operations.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the total number of GET operations.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns how many GET operations found nothing.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the total number of DELETE operations.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of COUNT operations.
    pub fn counts(&self) -> u64 {
        self.counts.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions started.
    pub fn begins(&self) -> u64 {
        self.begins.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks.load(Ordering::Relaxed)
    }

    /// Returns how many COMMIT/ROLLBACK calls were rejected while idle.
    pub fn no_transaction(&self) -> u64 {
        self.no_transaction.load(Ordering::Relaxed)
    }

    /// Returns the deepest nesting level observed.
    pub fn max_depth(&self) -> u64 {
        self.max_depth.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sets: self.sets(),
            gets: self.gets(),
            misses: self.misses(),
            deletes: self.deletes(),
            counts: self.counts(),
            begins: self.begins(),
            commits: self.commits(),
            rollbacks: self.rollbacks(),
            no_transaction: self.no_transaction(),
            max_depth: self.max_depth(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
///
/// Unlike `StoreStats`, this is a plain struct that can be compared or
/// passed across threads without atomics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of SET operations.
    pub sets: u64,
    /// Total number of GET operations.
    pub gets: u64,
    /// GET operations that found no visible value.
    pub misses: u64,
    /// Total number of DELETE operations.
    pub deletes: u64,
    /// Total number of COUNT operations.
    pub counts: u64,
    /// Total number of transactions started.
    pub begins: u64,
    /// Total number of transactions committed.
    pub commits: u64,
    /// Total number of transactions rolled back.
    pub rollbacks: u64,
    /// COMMIT/ROLLBACK calls rejected while idle.
    pub no_transaction: u64,
    /// Deepest nesting level observed.
    pub max_depth: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = StoreStats::new();
        assert_eq!(stats.sets(), 0);
        assert_eq!(stats.gets(), 0);
        assert_eq!(stats.commits(), 0);
        assert_eq!(stats.max_depth(), 0);
    }

    #[test]
    fn record_reads_tracks_misses() {
        let stats = StoreStats::new();

        stats.record_get(true);
        stats.record_get(false);
        stats.record_get(false);

        assert_eq!(stats.gets(), 3);
        assert_eq!(stats.misses(), 2);
    }

    #[test]
    fn max_depth_is_high_water_mark() {
        let stats = StoreStats::new();

        stats.record_begin(1);
        stats.record_begin(3);
        stats.record_begin(2);

        assert_eq!(stats.begins(), 3);
        assert_eq!(stats.max_depth(), 3);
    }

    #[test]
    fn snapshot() {
        let stats = StoreStats::new();
        stats.record_set();
        stats.record_delete();
        stats.record_begin(1);
        stats.record_rollback();
        stats.record_no_transaction();

        let snap = stats.snapshot();
        assert_eq!(snap.sets, 1);
        assert_eq!(snap.deletes, 1);
        assert_eq!(snap.begins, 1);
        assert_eq!(snap.rollbacks, 1);
        assert_eq!(snap.no_transaction, 1);
        assert_eq!(snap.commits, 0);
    }

    #[test]
    fn concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(StoreStats::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let s = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    s.record_get(true);
                    s.record_set();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(stats.gets(), 1000);
        assert_eq!(stats.sets(), 1000);
    }
}
