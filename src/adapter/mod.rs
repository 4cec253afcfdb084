//! Storage Adapter Module
//!
//! The key-level contract every backend implements, plus the bulk operations
//! built on top of it.
//!
//! Backends only have to supply `get`, `set`, `delete` and `clear`. The bulk
//! methods and `has` default to the free functions below; a backend may
//! override any of them as long as the results stay the same. None of the bulk
//! operations are atomic across keys: a failure midway leaves earlier keys
//! written.

mod file;
mod memory;

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheValue, Expiration};

pub use file::{is_cache_file_name, FileAdapter, FileRecord, FORMAT_VERSION};
pub use memory::MemoryAdapter;

// == Storage Adapter ==
/// Key-level storage backend used by [`Cache`](crate::cache::Cache).
///
/// Implementations perform no internal locking; callers sharing one across
/// threads must serialize access themselves.
pub trait StorageAdapter {
    /// Returns the value for `key` if an unexpired entry exists.
    ///
    /// An expired entry is purged from the backend before returning `None`.
    fn get(&mut self, key: &str) -> Option<CacheValue>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&mut self, key: &str, value: CacheValue, expiration: Expiration) -> bool;

    /// Removes the entry for `key`.
    fn delete(&mut self, key: &str) -> bool;

    /// Removes every entry owned by this backend.
    fn clear(&mut self) -> bool;

    /// True iff an unexpired entry exists, whatever its value.
    fn has(&mut self, key: &str) -> bool {
        has(self, key)
    }

    fn get_multiple(&mut self, keys: &[String]) -> HashMap<String, Option<CacheValue>> {
        get_multiple(self, keys)
    }

    fn set_multiple(&mut self, values: Vec<(String, CacheValue)>, expiration: Expiration) -> bool {
        set_multiple(self, values, expiration)
    }

    fn delete_multiple(&mut self, keys: &[String]) -> bool {
        delete_multiple(self, keys)
    }
}

impl<A: StorageAdapter + ?Sized> StorageAdapter for Box<A> {
    fn get(&mut self, key: &str) -> Option<CacheValue> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: CacheValue, expiration: Expiration) -> bool {
        (**self).set(key, value, expiration)
    }

    fn delete(&mut self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn clear(&mut self) -> bool {
        (**self).clear()
    }

    fn has(&mut self, key: &str) -> bool {
        (**self).has(key)
    }

    fn get_multiple(&mut self, keys: &[String]) -> HashMap<String, Option<CacheValue>> {
        (**self).get_multiple(keys)
    }

    fn set_multiple(&mut self, values: Vec<(String, CacheValue)>, expiration: Expiration) -> bool {
        (**self).set_multiple(values, expiration)
    }

    fn delete_multiple(&mut self, keys: &[String]) -> bool {
        (**self).delete_multiple(keys)
    }
}

// == Shared Bulk Operations ==

/// `has` in terms of `get`.
pub fn has<A: StorageAdapter + ?Sized>(adapter: &mut A, key: &str) -> bool {
    adapter.get(key).is_some()
}

/// Reads each key independently.
pub fn get_multiple<A: StorageAdapter + ?Sized>(
    adapter: &mut A,
    keys: &[String],
) -> HashMap<String, Option<CacheValue>> {
    debug!(count = keys.len(), "bulk get");

    keys.iter()
        .map(|key| (key.clone(), adapter.get(key)))
        .collect()
}

/// Writes each pair independently; true only if every write succeeded.
pub fn set_multiple<A: StorageAdapter + ?Sized>(
    adapter: &mut A,
    values: Vec<(String, CacheValue)>,
    expiration: Expiration,
) -> bool {
    debug!(count = values.len(), ?expiration, "bulk set");

    check_return(
        values
            .into_iter()
            .map(|(key, value)| adapter.set(&key, value, expiration)),
    )
}

/// Deletes each key independently; true only if every delete succeeded.
pub fn delete_multiple<A: StorageAdapter + ?Sized>(adapter: &mut A, keys: &[String]) -> bool {
    debug!(count = keys.len(), "bulk delete");

    check_return(keys.iter().map(|key| adapter.delete(key)))
}

// == Check Return ==
/// Reduces per-item outcomes to one flag.
///
/// Every item is consumed, so lazily produced writes or deletes after a
/// failure still run.
pub fn check_return<I>(outcomes: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    outcomes.into_iter().fold(true, |all_ok, ok| all_ok & ok)
}
