//! Cache Module
//!
//! The `Cache` facade plus the value, entry and TTL types shared with the
//! storage backends.

mod entry;
mod stats;
mod store;
mod ttl;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::Cache;
pub use ttl::{normalize_ttl, Expiration, Ttl};
pub use value::CacheValue;
