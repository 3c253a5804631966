//! Test fixtures and store helpers.

use crate::generators::Operation;
use crate::model::{apply_to_store, Outcome, ReferenceModel};
use proptest::prelude::*;
use stackkv_core::TransactionalStore;

/// Creates a store whose base holds the given pairs.
pub fn seeded_store<'a, I>(pairs: I) -> TransactionalStore
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut store = TransactionalStore::new();
    for (key, value) in pairs {
        store.set(key, value);
    }
    store
}

/// Replays operations against a store, returning every outcome.
pub fn replay(store: &mut TransactionalStore, ops: &[Operation]) -> Vec<Outcome> {
    ops.iter().map(|op| apply_to_store(store, op)).collect()
}

/// A store and a reference model driven in lockstep.
#[derive(Debug, Default)]
pub struct Harness {
    /// The store under test.
    pub store: TransactionalStore,
    /// The reference model.
    pub model: ReferenceModel,
}

impl Harness {
    /// Creates a harness with an empty store and model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `op` to both sides and checks they still agree.
    ///
    /// Besides the operation's own outcome this compares the depth and the
    /// complete visible view.
    pub fn step(&mut self, op: &Operation) -> Result<(), TestCaseError> {
        let expected = self.model.apply(op);
        let actual = apply_to_store(&mut self.store, op);

        prop_assert_eq!(&actual, &expected, "outcome of {:?}", op);
        prop_assert_eq!(self.store.depth(), self.model.depth());
        prop_assert_eq!(&self.store.snapshot(), self.model.view());
        prop_assert_eq!(self.store.len(), self.model.view().len());
        Ok(())
    }

    /// Runs all operations through [`Harness::step`].
    pub fn run(&mut self, ops: &[Operation]) -> Result<(), TestCaseError> {
        for op in ops {
            self.step(op)?;
        }
        Ok(())
    }
}
