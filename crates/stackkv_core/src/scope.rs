//! Transaction scopes.
//!
//! A scope records only the keys modified at one nesting level. Deletions
//! are kept as tombstones so they shadow values held by enclosing levels.

use std::collections::hash_map::{self, HashMap};

/// A pending mutation of one key within a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEntry {
    /// The key was set to this value.
    Set(String),
    /// The key was deleted.
    Deleted,
}

impl ScopeEntry {
    /// Returns the value if this entry sets one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set(value) => Some(value),
            Self::Deleted => None,
        }
    }
}

/// One transaction layer: a copy-on-write overlay over its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Pending mutations: key -> entry.
    entries: HashMap<String, ScopeEntry>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a set operation, replacing any earlier entry for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), ScopeEntry::Set(value.into()));
    }

    /// Records a tombstone for `key`.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), ScopeEntry::Deleted);
    }

    /// Writes an entry as-is.
    pub(crate) fn apply(&mut self, key: String, entry: ScopeEntry) {
        self.entries.insert(key, entry);
    }

    /// Gets the entry for `key`, if this scope touched it.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&ScopeEntry> {
        self.entries.get(key)
    }

    /// Returns every key this scope touched.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of touched keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consumes the scope, yielding its entries.
    pub fn into_entries(self) -> hash_map::IntoIter<String, ScopeEntry> {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scope_is_empty() {
        let scope = Scope::new();
        assert_eq!(scope.len(), 0);
        assert_eq!(scope.keys().count(), 0);
        assert!(scope.entry("a").is_none());
    }

    #[test]
    fn set_records_entry() {
        let mut scope = Scope::new();
        scope.set("a", "1");

        assert_eq!(scope.len(), 1);
        assert_eq!(scope.entry("a"), Some(&ScopeEntry::Set("1".into())));
    }

    #[test]
    fn set_overwrites_previous() {
        let mut scope = Scope::new();
        scope.set("a", "1");
        scope.set("a", "2");

        assert_eq!(scope.len(), 1);
        assert_eq!(scope.entry("a").and_then(ScopeEntry::value), Some("2"));
    }

    #[test]
    fn delete_records_tombstone() {
        let mut scope = Scope::new();
        scope.delete("missing");

        let entry = scope.entry("missing");
        assert!(matches!(entry, Some(ScopeEntry::Deleted)));
        assert_eq!(entry.and_then(ScopeEntry::value), None);
    }

    #[test]
    fn set_after_delete_clears_tombstone() {
        let mut scope = Scope::new();
        scope.delete("a");
        scope.set("a", "back");

        assert_eq!(scope.len(), 1);
        assert_eq!(scope.entry("a").and_then(ScopeEntry::value), Some("back"));
    }

    #[test]
    fn empty_strings_are_valid() {
        let mut scope = Scope::new();
        scope.set("", "");

        assert_eq!(scope.entry("").and_then(ScopeEntry::value), Some(""));
    }

    #[test]
    fn into_entries_yields_everything() {
        let mut scope = Scope::new();
        scope.set("a", "1");
        scope.delete("b");

        let mut entries: Vec<_> = scope.into_entries().collect();
        entries.sort_by(|x, y| x.0.cmp(&y.0));

        assert_eq!(
            entries,
            vec![
                ("a".to_string(), ScopeEntry::Set("1".into())),
                ("b".to_string(), ScopeEntry::Deleted),
            ]
        );
    }
}
