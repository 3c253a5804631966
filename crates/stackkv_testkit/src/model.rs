//! Reference model for differential testing.
//!
//! The model keeps a full copy of the visible map for every nesting level.
//! `BEGIN` clones the top copy, `COMMIT` replaces the parent with the top,
//! `ROLLBACK` drops the top. It shares no code with the scope stack, so
//! agreement between the two is meaningful.

use crate::generators::Operation;
use stackkv_core::{StoreError, TransactionalStore};
use std::collections::BTreeMap;

/// Observable result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation returns nothing.
    Unit,
    /// Result of a GET.
    Value(Option<String>),
    /// Result of a COUNT.
    Count(usize),
    /// Result of a COMMIT or ROLLBACK.
    Status(Result<(), StoreError>),
}

/// Snapshot-per-level model of a nested transactional map.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// Visible map per level; index 0 is the committed state.
    levels: Vec<BTreeMap<String, String>>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self {
            levels: vec![BTreeMap::new()],
        }
    }
}

impl ReferenceModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an operation and returns its outcome.
    pub fn apply(&mut self, op: &Operation) -> Outcome {
        match op {
            Operation::Set { key, value } => {
                self.top_mut().insert(key.clone(), value.clone());
                Outcome::Unit
            }
            Operation::Get { key } => Outcome::Value(self.top().get(key).cloned()),
            Operation::Delete { key } => {
                self.top_mut().remove(key);
                Outcome::Unit
            }
            Operation::Count { value } => {
                Outcome::Count(self.top().values().filter(|v| *v == value).count())
            }
            Operation::Begin => {
                let copy = self.top().clone();
                self.levels.push(copy);
                Outcome::Unit
            }
            Operation::Commit => {
                if self.levels.len() == 1 {
                    return Outcome::Status(Err(StoreError::NoTransaction));
                }
                let top = self.levels.pop().unwrap_or_default();
                *self.top_mut() = top;
                Outcome::Status(Ok(()))
            }
            Operation::Rollback => {
                if self.levels.len() == 1 {
                    return Outcome::Status(Err(StoreError::NoTransaction));
                }
                self.levels.pop();
                Outcome::Status(Ok(()))
            }
        }
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the visible map.
    #[must_use]
    pub fn view(&self) -> &BTreeMap<String, String> {
        self.top()
    }

    fn top(&self) -> &BTreeMap<String, String> {
        &self.levels[self.levels.len() - 1]
    }

    fn top_mut(&mut self) -> &mut BTreeMap<String, String> {
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }
}

/// Applies an operation to a real store and returns its outcome.
pub fn apply_to_store(store: &mut TransactionalStore, op: &Operation) -> Outcome {
    match op {
        Operation::Set { key, value } => {
            store.set(key.as_str(), value.as_str());
            Outcome::Unit
        }
        Operation::Get { key } => Outcome::Value(store.get(key).map(str::to_string)),
        Operation::Delete { key } => {
            store.delete(key.as_str());
            Outcome::Unit
        }
        Operation::Count { value } => Outcome::Count(store.count(value)),
        Operation::Begin => {
            store.begin();
            Outcome::Unit
        }
        Operation::Commit => Outcome::Status(store.commit()),
        Operation::Rollback => Outcome::Status(store.rollback()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(key: &str, value: &str) -> Operation {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn model_nested_rollback() {
        let mut model = ReferenceModel::new();
        model.apply(&set("a", "1"));
        model.apply(&Operation::Begin);
        model.apply(&set("a", "2"));
        assert_eq!(model.depth(), 1);

        model.apply(&Operation::Rollback);
        assert_eq!(model.view().get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn model_commit_replaces_parent() {
        let mut model = ReferenceModel::new();
        model.apply(&set("a", "1"));
        model.apply(&Operation::Begin);
        model.apply(&Operation::Delete { key: "a".into() });
        model.apply(&Operation::Commit);

        assert!(model.view().is_empty());
        assert_eq!(
            model.apply(&Operation::Commit),
            Outcome::Status(Err(StoreError::NoTransaction))
        );
    }

    #[test]
    fn store_and_model_agree_on_scenario() {
        let ops = vec![
            set("foo", "123"),
            Operation::Begin,
            set("foo", "456"),
            Operation::Get { key: "foo".into() },
            Operation::Rollback,
            Operation::Get { key: "foo".into() },
            Operation::Count {
                value: "123".into(),
            },
            Operation::Commit,
        ];

        let mut model = ReferenceModel::new();
        let mut store = TransactionalStore::new();
        for op in &ops {
            assert_eq!(apply_to_store(&mut store, op), model.apply(op), "{op:?}");
        }
    }
}
