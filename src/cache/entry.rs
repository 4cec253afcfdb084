//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheValue, Expiration};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: CacheValue,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring according to `expiration`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expiration` - Normalized TTL
    pub fn new(value: CacheValue, expiration: Expiration) -> Self {
        let now = Utc::now();

        Self {
            value,
            created_at: now,
            expires_at: expiration.expires_at(now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: An entry is considered expired when the current time
    /// is greater than or equal to the expiration time. An entry stored with
    /// [`Expiration::Immediately`] is therefore expired as soon as it is read.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_seconds)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining(&self) -> Option<i64> {
        self.expires_at
            .map(|expires| (expires - Utc::now()).num_seconds().max(0))
    }

    /// Consumes the entry, yielding its value.
    pub fn into_value(self) -> CacheValue {
        self.value
    }
}
