//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Where posts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// A JSON file on disk (default).
    File,
    /// Process memory only; lost on restart.
    Memory,
}

/// How new post ids are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// Monotonic millisecond timestamps (default).
    Timestamp,
    /// Random v4 UUIDs.
    Uuid,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub data_path: PathBuf,
    pub id_strategy: IdStrategy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage = match lookup("STORAGE").map(|v| v.to_lowercase()).as_deref() {
            Some("memory") => StorageBackend::Memory,
            _ => StorageBackend::File,
        };

        let id_strategy = match lookup("ID_STRATEGY").map(|v| v.to_lowercase()).as_deref() {
            Some("uuid") => IdStrategy::Uuid,
            _ => IdStrategy::Timestamp,
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            storage,
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/posts.json")),
            id_strategy,
        }
    }
}
