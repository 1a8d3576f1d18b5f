use serde::{Deserialize, Serialize};

/// Adapter configuration for the in-memory object cache.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,                  // cache name, surfaces in diagnostics
    pub max_entries: Option<u64>,      // entry bound, None = unbounded
    pub default_ttl_secs: Option<u64>, // applied when a set requests no ttl
}

impl StoreConfig {
    pub fn new(
        name: impl Into<String>,
        max_entries: Option<u64>,
        default_ttl_secs: Option<u64>,
    ) -> Self {
        Self {
            name: name.into(),
            max_entries,
            default_ttl_secs,
        }
    }
}
