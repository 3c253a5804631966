//! # StackKV Testkit
//!
//! Test utilities for StackKV.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A reference model that implements nesting by full snapshots
//! - Fixtures for seeding stores and replaying operation sequences
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackkv_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn store_matches_model(ops in operation_sequence_strategy(1, 64)) {
//!         let mut harness = Harness::new();
//!         for op in &ops {
//!             harness.step(op)?;
//!         }
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use proptest::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
