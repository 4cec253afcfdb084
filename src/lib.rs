//! Mini Cache - A small key-value cache
//!
//! Provides a validating `Cache` facade with TTL support over interchangeable
//! in-memory and filesystem backends. Expiry is lazy: stale entries are
//! purged when they are next read, never by a background sweep.

pub mod adapter;
pub mod cache;
pub mod config;
pub mod error;

pub use adapter::{FileAdapter, MemoryAdapter, StorageAdapter};
pub use cache::{Cache, CacheValue, Ttl};
pub use config::{Backend, CacheConfig};
pub use error::{CacheError, Result};
