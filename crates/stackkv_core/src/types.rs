//! Common types.

use std::fmt;

/// Whether any transaction layer is open above the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreMode {
    /// Only the base layer exists.
    Idle,
    /// At least one transaction is open.
    InTransaction {
        /// Number of open transaction layers (always at least 1).
        depth: usize,
    },
}

impl StoreMode {
    /// Returns the mode for a given number of open transaction layers.
    #[must_use]
    pub const fn from_depth(depth: usize) -> Self {
        if depth == 0 {
            Self::Idle
        } else {
            Self::InTransaction { depth }
        }
    }

    /// Returns the number of open transaction layers.
    #[must_use]
    pub const fn depth(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::InTransaction { depth } => depth,
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InTransaction { depth } => write!(f, "in transaction (depth {depth})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_depth() {
        assert_eq!(StoreMode::from_depth(0), StoreMode::Idle);
        assert_eq!(
            StoreMode::from_depth(2),
            StoreMode::InTransaction { depth: 2 }
        );
        assert_eq!(StoreMode::from_depth(5).depth(), 5);
    }

    #[test]
    fn mode_display() {
        assert_eq!(StoreMode::Idle.to_string(), "idle");
        assert_eq!(
            StoreMode::InTransaction { depth: 1 }.to_string(),
            "in transaction (depth 1)"
        );
    }
}
