//! Lock-guarded store handle for concurrent hosts.

use crate::error::StoreResult;
use crate::store::TransactionalStore;
use crate::types::StoreMode;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one [`TransactionalStore`].
///
/// Every method takes the store's single lock for the duration of one call.
/// A `commit` therefore never interleaves with a `set` from another thread.
/// Use [`SharedStore::with`] when several operations must run as one unit.
///
/// All handles share the same transaction stack: a `begin` on one clone
/// opens a transaction that every clone observes.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionalStore>>,
}

impl SharedStore {
    /// Creates a handle around an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: TransactionalStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut TransactionalStore) -> T,
    {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// See [`TransactionalStore::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().set(key, value);
    }

    /// See [`TransactionalStore::get`]. The value is cloned out of the lock.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).map(str::to_string)
    }

    /// See [`TransactionalStore::delete`].
    pub fn delete(&self, key: impl Into<String>) {
        self.inner.lock().delete(key);
    }

    /// See [`TransactionalStore::count`].
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.inner.lock().count(value)
    }

    /// See [`TransactionalStore::begin`].
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// See [`TransactionalStore::commit`].
    pub fn commit(&self) -> StoreResult<()> {
        self.inner.lock().commit()
    }

    /// See [`TransactionalStore::rollback`].
    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        self.inner.lock().mode()
    }
}

impl From<TransactionalStore> for SharedStore {
    fn from(store: TransactionalStore) -> Self {
        Self::from_store(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::thread;

    #[test]
    fn clones_share_state() {
        let a = SharedStore::new();
        let b = a.clone();

        a.set("k", "v");
        assert_eq!(b.get("k"), Some("v".to_string()));

        b.begin();
        assert_eq!(a.mode(), StoreMode::InTransaction { depth: 1 });
        assert_eq!(a.rollback(), Ok(()));
        assert_eq!(b.commit(), Err(StoreError::NoTransaction));
    }

    #[test]
    fn with_runs_under_one_lock() {
        let shared = SharedStore::new();
        let visible = shared.with(|store| {
            store.begin();
            store.set("a", "1");
            let v = store.get("a").map(str::to_string);
            store.rollback().unwrap();
            v
        });

        assert_eq!(visible, Some("1".to_string()));
        assert_eq!(shared.get("a"), None);
    }

    #[test]
    fn concurrent_writers() {
        let shared = SharedStore::new();
        let mut handles = vec![];

        for t in 0..8 {
            let s = shared.clone();
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    s.set(format!("k{t}-{i}"), "x");
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(shared.count("x"), 400);
    }

    #[test]
    fn concurrent_atomic_transactions() {
        let shared = SharedStore::new();
        shared.set("counter", "0");
        let mut handles = vec![];

        for _ in 0..4 {
            let s = shared.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..25 {
                    s.with(|store| {
                        store.begin();
                        let n: u32 = store
                            .get("counter")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                        store.set("counter", (n + 1).to_string());
                        store.commit().unwrap();
                    });
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(shared.get("counter"), Some("100".to_string()));
        assert_eq!(shared.mode(), StoreMode::Idle);
    }
}
