//! Error types for StackKV core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// A missing key is not an error; `get` reports it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `COMMIT` or `ROLLBACK` was issued while no transaction is open.
    #[error("no transaction")]
    NoTransaction,
}
