//! CLI command implementations.

pub mod parse;
pub mod report;
pub mod session;
