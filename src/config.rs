//! Configuration Module
//!
//! Describes which backend a [`Cache`](crate::cache::Cache) uses and its
//! default TTL. Nothing in the cache reads the environment on its own;
//! `from_env` is there for applications that want it.

use std::env;
use std::path::PathBuf;

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Backend {
    /// Process-local map
    #[default]
    Memory,
    /// One file per key in an existing, writable directory
    File { dir: PathBuf },
}

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheConfig {
    /// Storage backend
    pub backend: Backend,
    /// Default TTL in seconds for writes without explicit TTL, None = never expires
    pub default_ttl: Option<i64>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DIR` - Use the file backend rooted here (default: memory backend)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: never expires)
    pub fn from_env() -> Self {
        let backend = env::var("CACHE_DIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(|dir| Backend::File { dir: dir.into() })
            .unwrap_or_default();

        Self {
            backend,
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}
