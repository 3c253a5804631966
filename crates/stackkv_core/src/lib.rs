//! # StackKV Core
//!
//! In-memory key-value store with nested transactions.
//!
//! This crate provides:
//! - A scope stack where every `BEGIN` layers a copy-on-write overlay
//!   over the current view
//! - `COMMIT` folding the top overlay into its parent, `ROLLBACK`
//!   discarding it
//! - Tombstones so deletions inside a transaction shadow parent values
//! - A lock-guarded [`SharedStore`] handle for concurrent hosts
//!
//! ## Example
//!
//! ```rust
//! use stackkv_core::{StoreError, TransactionalStore};
//!
//! let mut store = TransactionalStore::new();
//! store.set("foo", "123");
//!
//! store.begin();
//! store.set("foo", "456");
//! assert_eq!(store.get("foo"), Some("456"));
//! store.rollback().unwrap();
//!
//! assert_eq!(store.get("foo"), Some("123"));
//! assert_eq!(store.commit(), Err(StoreError::NoTransaction));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod scope;
mod shared;
mod stats;
mod store;
mod types;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use shared::SharedStore;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::TransactionalStore;
pub use types::StoreMode;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
