use std::path::PathBuf;

use crate::state::CollectionKeys;

/// Where and how the record store persists its collections
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,

    /// Keep everything in memory instead of on disk
    pub in_memory: bool,

    /// Byte limit for the in-memory backend, like a browser storage quota
    pub memory_quota: Option<usize>,

    pub keys: CollectionKeys,

    /// Default level for the log subscriber (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("state"),
            in_memory: false,
            memory_quota: None,
            keys: CollectionKeys::default(),
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            data_dir: non_empty("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            in_memory: non_empty("STORE_IN_MEMORY")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            memory_quota: non_empty("STORE_MEMORY_QUOTA").and_then(|v| v.trim().parse().ok()),
            keys: CollectionKeys {
                contests: non_empty("CONTESTS_KEY").unwrap_or(defaults.keys.contests),
                applications: non_empty("APPLICATIONS_KEY")
                    .unwrap_or(defaults.keys.applications),
            },
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}
