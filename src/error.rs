//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only malformed requests and backend construction produce errors. A storage
//! operation that simply did not succeed is reported as `false` by the adapter
//! and the facade instead.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Illegal key, or a TTL that cannot be represented
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Backend directory missing or not writable
    #[error("I/O error: {0}")]
    Io(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
