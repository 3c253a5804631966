//! The transactional store.

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::scope::{Scope, ScopeEntry};
use crate::stats::StoreStats;
use crate::types::StoreMode;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace};

/// An in-memory key-value store with nested transactions.
///
/// The store keeps a permanent base map and a stack of transaction scopes
/// layered over it:
/// - `begin()` pushes an empty scope
/// - `set()` and `delete()` only touch the top scope (or the base when idle)
/// - `get()` resolves a key from the top scope down, stopping at the first
///   scope that mentions it
/// - `commit()` folds the top scope into its parent
/// - `rollback()` discards the top scope
///
/// The base map cannot hold tombstones: committing a delete into it removes
/// the key outright.
///
/// # Example
///
/// ```rust
/// use stackkv_core::TransactionalStore;
///
/// let mut store = TransactionalStore::new();
/// store.set("a", "10");
///
/// store.begin();
/// store.delete("a");
/// assert_eq!(store.get("a"), None);
///
/// store.commit().unwrap();
/// assert_eq!(store.get("a"), None);
/// assert!(store.is_idle());
/// ```
#[derive(Debug)]
pub struct TransactionalStore {
    /// Configuration.
    config: Config,
    /// Committed state.
    base: HashMap<String, String>,
    /// Open transaction scopes, innermost last.
    scopes: Vec<Scope>,
    /// Operation counters.
    stats: StoreStats,
    /// Shallowest depth reached while a `transaction` closure runs.
    low_water: Option<usize>,
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            base: HashMap::with_capacity(config.base_capacity),
            scopes: Vec::with_capacity(config.scope_capacity),
            stats: StoreStats::new(),
            low_water: None,
            config,
        }
    }

    /// Stores `value` under `key` in the innermost open scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "set");

        match self.scopes.last_mut() {
            Some(top) => top.set(key, value),
            None => {
                self.base.insert(key, value.into());
            }
        }

        if let Some(stats) = self.recorder() {
            stats.record_set();
        }
    }

    /// Returns the value currently visible for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = self.resolve(key);
        if let Some(stats) = self.recorder() {
            stats.record_get(value.is_some());
        }
        value
    }

    /// Removes `key` from the current view.
    ///
    /// Inside a transaction this records a tombstone even when the key is
    /// not visible, so that a later commit deletes it from the parent.
    pub fn delete(&mut self, key: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, depth = self.depth(), "delete");

        match self.scopes.last_mut() {
            Some(top) => top.delete(key),
            None => {
                self.base.remove(&key);
            }
        }

        if let Some(stats) = self.recorder() {
            stats.record_delete();
        }
    }

    /// Returns how many keys currently resolve to `value`.
    ///
    /// Every key is resolved once through the full stack, so a key
    /// overridden in several scopes is counted by its visible value only.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        if let Some(stats) = self.recorder() {
            stats.record_count();
        }

        if self.scopes.is_empty() {
            return self.base.values().filter(|v| *v == value).count();
        }

        self.mentioned_keys()
            .into_iter()
            .filter(|key| self.resolve(key) == Some(value))
            .count()
    }

    /// Opens a new transaction nested inside the current one.
    pub fn begin(&mut self) {
        self.scopes.push(Scope::new());
        let depth = self.depth();
        debug!(depth, "transaction started");

        if let Some(stats) = self.recorder() {
            stats.record_begin(depth);
        }
    }

    /// Folds the innermost transaction into its parent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoTransaction`] if no transaction is open.
    pub fn commit(&mut self) -> StoreResult<()> {
        let Some(top) = self.scopes.pop() else {
            return Err(self.no_transaction("commit"));
        };

        let entries = top.len();
        self.merge(top);
        self.lower_water_mark();
        debug!(depth = self.depth(), entries, "transaction committed");

        if let Some(stats) = self.recorder() {
            stats.record_commit();
        }
        Ok(())
    }

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoTransaction`] if no transaction is open.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let Some(top) = self.scopes.pop() else {
            return Err(self.no_transaction("rollback"));
        };
        self.lower_water_mark();

        debug!(
            depth = self.depth(),
            discarded = top.len(),
            "transaction rolled back"
        );

        if let Some(stats) = self.recorder() {
            stats.record_rollback();
        }
        Ok(())
    }

    /// Runs `f` inside a new transaction.
    ///
    /// If `f` returns `Ok` the transaction is committed; if it returns
    /// `Err` it is rolled back. Transactions that `f` opened and left open
    /// are committed or rolled back along with it. If `f` commits or rolls
    /// back past its own transaction, every layer opened after that point
    /// is closed too, so the store never ends deeper than it started.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stackkv_core::TransactionalStore;
    ///
    /// let mut store = TransactionalStore::new();
    /// let result: Result<(), &str> = store.transaction(|s| {
    ///     s.set("a", "1");
    ///     Err("abort")
    /// });
    ///
    /// assert!(result.is_err());
    /// assert_eq!(store.get("a"), None);
    /// ```
    pub fn transaction<F, T, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let outer = self.depth();
        self.begin();

        let enclosing = self.low_water.replace(self.depth());
        let result = f(self);
        let floor = self.low_water.map_or(outer, |low| low.min(outer));

        let layers = self.scopes.split_off(floor.min(self.scopes.len()));
        if result.is_ok() {
            for scope in layers {
                self.merge(scope);
                if let Some(stats) = self.recorder() {
                    stats.record_commit();
                }
            }
            debug!(depth = self.depth(), "transaction closure committed");
        } else {
            if let Some(stats) = self.recorder() {
                for _ in &layers {
                    stats.record_rollback();
                }
            }
            debug!(depth = self.depth(), "transaction closure rolled back");
        }

        // An enclosing closure sees this one's unwinding as its own
        let depth = self.depth();
        self.low_water = enclosing.map(|low| low.min(depth));
        result
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> StoreMode {
        StoreMode::from_depth(self.depth())
    }

    /// Checks if no transaction is open.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of visible keys.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.scopes.is_empty() {
            return self.base.len();
        }

        self.mentioned_keys()
            .into_iter()
            .filter(|key| self.resolve(key).is_some())
            .count()
    }

    /// Checks if no key is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fully resolved view, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.mentioned_keys()
            .into_iter()
            .filter_map(|key| {
                self.resolve(key)
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Returns the store statistics.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Resolves `key` from the innermost scope down to the base.
    fn resolve(&self, key: &str) -> Option<&str> {
        for scope in self.scopes.iter().rev() {
            if let Some(entry) = scope.entry(key) {
                return entry.value();
            }
        }
        self.base.get(key).map(String::as_str)
    }

    /// Every key mentioned by the base or any open scope.
    fn mentioned_keys(&self) -> HashSet<&str> {
        let mut keys: HashSet<&str> = self.base.keys().map(String::as_str).collect();
        for scope in &self.scopes {
            keys.extend(scope.keys());
        }
        keys
    }

    /// Applies a popped scope to the current top, or to the base when idle.
    fn merge(&mut self, scope: Scope) {
        match self.scopes.last_mut() {
            Some(parent) => {
                for (key, entry) in scope.into_entries() {
                    parent.apply(key, entry);
                }
            }
            None => {
                for (key, entry) in scope.into_entries() {
                    match entry {
                        ScopeEntry::Set(value) => {
                            self.base.insert(key, value);
                        }
                        ScopeEntry::Deleted => {
                            self.base.remove(&key);
                        }
                    }
                }
            }
        }
    }

    fn no_transaction(&self, op: &'static str) -> StoreError {
        debug!(op, "no transaction open");
        if let Some(stats) = self.recorder() {
            stats.record_no_transaction();
        }
        StoreError::NoTransaction
    }

    fn lower_water_mark(&mut self) {
        let depth = self.scopes.len();
        if let Some(low) = self.low_water.as_mut() {
            *low = (*low).min(depth);
        }
    }

    fn recorder(&self) -> Option<&StoreStats> {
        self.config.record_stats.then_some(&self.stats)
    }
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}
