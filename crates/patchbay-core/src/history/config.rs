//! History manager configuration

/// Configuration for a history timeline
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of entries kept; the oldest are evicted beyond this
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}

impl HistoryConfig {
    /// Create a config with a specific capacity
    pub fn new(max_entries: usize) -> Self {
        Self {
            // a zero-capacity timeline could never hold the entry just pushed
            max_entries: max_entries.max(1),
        }
    }

    /// Set max entries, builder style
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }
}
