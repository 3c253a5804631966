//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that generated
//! sequences keep hitting the same keys across nesting levels.

use proptest::prelude::*;

/// One store command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Set a key
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Read a key
    Get {
        /// Key
        key: String,
    },
    /// Delete a key
    Delete {
        /// Key
        key: String,
    },
    /// Count keys holding a value
    Count {
        /// Value
        value: String,
    },
    /// Open a transaction
    Begin,
    /// Commit the innermost transaction
    Commit,
    /// Roll back the innermost transaction
    Rollback,
}

/// Strategy for generating keys, including the empty key.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => prop::string::string_regex("[a-f]").expect("Invalid regex"),
        1 => Just(String::new()),
    ]
}

/// Strategy for generating values, including the empty value.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => prop::string::string_regex("[0-3]").expect("Invalid regex"),
        1 => Just(String::new()),
    ]
}

/// Strategy for generating a single operation.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Set { key, value }),
        3 => key_strategy().prop_map(|key| Operation::Get { key }),
        2 => key_strategy().prop_map(|key| Operation::Delete { key }),
        2 => value_strategy().prop_map(|value| Operation::Count { value }),
        2 => Just(Operation::Begin),
        1 => Just(Operation::Commit),
        1 => Just(Operation::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
