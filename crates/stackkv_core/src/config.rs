//! Store configuration.

/// Configuration for constructing a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity of the base map.
    pub base_capacity: usize,

    /// Number of transaction layers to reserve room for up front.
    pub scope_capacity: usize,

    /// Whether to update operation counters.
    pub record_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_capacity: 0,
            scope_capacity: 4,
            record_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial base map capacity.
    #[must_use]
    pub const fn base_capacity(mut self, capacity: usize) -> Self {
        self.base_capacity = capacity;
        self
    }

    /// Sets how many transaction layers to reserve room for.
    #[must_use]
    pub const fn scope_capacity(mut self, capacity: usize) -> Self {
        self.scope_capacity = capacity;
        self
    }

    /// Sets whether operation counters are updated.
    #[must_use]
    pub const fn record_stats(mut self, value: bool) -> Self {
        self.record_stats = value;
        self
    }
}
