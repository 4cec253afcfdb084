//! Memory Adapter Module
//!
//! Process-local backend holding entries in a HashMap.

use std::collections::HashMap;

use tracing::debug;

use crate::adapter::StorageAdapter;
use crate::cache::{CacheEntry, CacheValue, Expiration};

// == Memory Adapter ==
/// Volatile backend; everything is lost when the adapter is dropped.
///
/// Expired entries are purged lazily when read.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
}

impl MemoryAdapter {
    // == Constructor ==
    /// Creates an empty memory adapter.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageAdapter for MemoryAdapter {
    // == Get ==
    fn get(&mut self, key: &str) -> Option<CacheValue> {
        let entry = self.entries.get(key)?;

        if !entry.is_expired() {
            debug!(key, ttl_remaining = ?entry.ttl_remaining(), "memory hit");
            return Some(entry.value.clone());
        }

        // Past its TTL, so wipe it rather than keep serving it
        self.entries.remove(key);
        debug!(key, "purged expired memory entry");
        None
    }

    // == Set ==
    fn set(&mut self, key: &str, value: CacheValue, expiration: Expiration) -> bool {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, expiration));
        true
    }

    // == Delete ==
    fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key);
        true
    }

    // == Clear ==
    fn clear(&mut self) -> bool {
        self.entries.clear();
        true
    }
}
