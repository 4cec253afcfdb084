//! Cache Store Module
//!
//! The `Cache` facade applications talk to. It validates keys, normalizes TTLs
//! and hands the actual storage work to a [`StorageAdapter`].

use std::collections::HashMap;

use tracing::debug;

use crate::adapter::{FileAdapter, MemoryAdapter, StorageAdapter};
use crate::cache::{normalize_ttl, CacheStats, CacheValue, Expiration, Ttl};
use crate::config::{Backend, CacheConfig};
use crate::error::{CacheError, Result};

// == Cache ==
/// Key-value cache over an injected storage backend.
///
/// Malformed requests (empty keys) are errors and never reach the backend.
/// A backend that fails to store or remove something reports `false` instead.
pub struct Cache {
    /// Storage backend
    adapter: Box<dyn StorageAdapter>,
    /// TTL applied when a caller passes none, resolved once
    default_expiration: Expiration,
    /// Usage statistics
    stats: CacheStats,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over `adapter`.
    ///
    /// # Arguments
    /// * `adapter` - Storage backend
    /// * `default_ttl` - TTL for writes that specify none; `None` never expires
    pub fn new(adapter: Box<dyn StorageAdapter>, default_ttl: Option<Ttl>) -> Self {
        Self {
            adapter,
            default_expiration: normalize_ttl(default_ttl, Expiration::Never),
            stats: CacheStats::new(),
        }
    }

    /// Builds the backend described by `config` and wraps it.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let adapter: Box<dyn StorageAdapter> = match &config.backend {
            Backend::Memory => Box::new(MemoryAdapter::new()),
            Backend::File { dir } => Box::new(FileAdapter::new(dir.clone())?),
        };

        Ok(Self::new(adapter, config.default_ttl.map(Ttl::Seconds)))
    }

    /// The normalized default TTL.
    pub fn default_expiration(&self) -> Expiration {
        self.default_expiration
    }

    // == Get ==
    /// Returns the cached value for `key`, or `default` on a miss.
    pub fn get(&mut self, key: &str, default: impl Into<CacheValue>) -> Result<CacheValue> {
        check_key(key)?;

        match self.adapter.get(key) {
            Some(value) => {
                self.stats.record_hit();
                debug!(key, "cache hit");
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                Ok(default.into())
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`. Zero or negative TTLs store the entry as
    /// already expired.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<CacheValue>,
        ttl: Option<Ttl>,
    ) -> Result<bool> {
        check_key(key)?;
        let expiration = normalize_ttl(ttl, self.default_expiration);

        let stored = self
            .adapter
            .set_multiple(vec![(key.to_string(), value.into())], expiration);
        if stored {
            self.stats.record_write();
        }
        Ok(stored)
    }

    // == Delete ==
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.adapter.delete(key))
    }

    // == Clear ==
    /// Removes every entry in the backend.
    pub fn clear(&mut self) -> bool {
        self.adapter.clear()
    }

    // == Has ==
    /// True iff an unexpired entry exists for `key`, whatever its value.
    pub fn has(&mut self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(self.adapter.has(key))
    }

    // == Get Multiple ==
    /// Looks up every key, mapping misses to `default`.
    ///
    /// Rejected as a whole if any key is illegal.
    pub fn get_multiple<I, K>(
        &mut self,
        keys: I,
        default: impl Into<CacheValue>,
    ) -> Result<HashMap<String, CacheValue>>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys = collect_keys(keys)?;
        let default = default.into();

        let found = self.adapter.get_multiple(&keys);
        let mut values = HashMap::with_capacity(found.len());
        for (key, value) in found {
            let value = match value {
                Some(value) => {
                    self.stats.record_hit();
                    value
                }
                None => {
                    self.stats.record_miss();
                    default.clone()
                }
            };
            values.insert(key, value);
        }

        Ok(values)
    }

    // == Set Multiple ==
    /// Stores every pair with one shared TTL.
    ///
    /// Returns true only if every write succeeded. Nothing is written if any
    /// key is illegal.
    pub fn set_multiple<I, K, V>(&mut self, values: I, ttl: Option<Ttl>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CacheValue>,
    {
        let values: Vec<(String, CacheValue)> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        for (key, _) in &values {
            check_key(key)?;
        }
        let expiration = normalize_ttl(ttl, self.default_expiration);

        let stored = self.adapter.set_multiple(values, expiration);
        if stored {
            self.stats.record_write();
        }
        Ok(stored)
    }

    // == Delete Multiple ==
    /// Deletes every key. Nothing is deleted if any key is illegal.
    pub fn delete_multiple<I, K>(&mut self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys = collect_keys(keys)?;
        Ok(self.adapter.delete_multiple(&keys))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("default_expiration", &self.default_expiration)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

// == Key Validation ==
/// A key is legal iff it is non-empty.
fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument(
            "Cache key must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Materializes a key batch and validates all of it before anything runs.
fn collect_keys<I, K>(keys: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
    for key in &keys {
        check_key(key)?;
    }
    Ok(keys)
}
