//! TTL Module
//!
//! Caller-facing TTL input and its normalized form handed to backends.

use chrono::{DateTime, TimeDelta, Utc};

// == Ttl ==
/// Time-to-live supplied by a caller.
///
/// `None` (no `Ttl` at all) means "use the cache's default".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds; zero or negative means the entry is already expired
    Seconds(i64),
    /// Relative span, truncated to whole seconds
    Span(TimeDelta),
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<i32> for Ttl {
    fn from(seconds: i32) -> Self {
        Ttl::Seconds(i64::from(seconds))
    }
}

impl From<TimeDelta> for Ttl {
    fn from(span: TimeDelta) -> Self {
        Ttl::Span(span)
    }
}

impl From<std::time::Duration> for Ttl {
    fn from(span: std::time::Duration) -> Self {
        Ttl::Span(TimeDelta::from_std(span).unwrap_or(TimeDelta::MAX))
    }
}

// == Expiration ==
/// Normalized TTL as seen by a storage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// No expiry instant
    Never,
    /// Strictly positive lifetime in whole seconds
    After(TimeDelta),
    /// Stored as already expired; never observable
    Immediately,
}

impl Expiration {
    // == Expires At ==
    /// Absolute expiry instant for an entry written at `now`.
    ///
    /// A lifetime too large to add to `now` saturates to "never".
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Expiration::Never => None,
            Expiration::After(lifetime) => now.checked_add_signed(*lifetime),
            Expiration::Immediately => Some(now),
        }
    }
}

// == Normalize ==
/// Resolves a caller TTL against the cache default.
///
/// Spans are added to the Unix epoch and the elapsed whole seconds read back.
/// A result of zero or less becomes [`Expiration::Immediately`]. Lifetimes too
/// large for chrono saturate: positive ones never expire, negative ones are
/// already expired.
pub fn normalize_ttl(ttl: Option<Ttl>, default: Expiration) -> Expiration {
    let seconds = match ttl {
        None => return default,
        Some(Ttl::Seconds(seconds)) => seconds,
        Some(Ttl::Span(span)) => {
            match DateTime::<Utc>::UNIX_EPOCH.checked_add_signed(span) {
                Some(instant) => instant.timestamp(),
                None if span < TimeDelta::zero() => return Expiration::Immediately,
                None => return Expiration::Never,
            }
        }
    };

    if seconds <= 0 {
        return Expiration::Immediately;
    }

    TimeDelta::try_seconds(seconds).map_or(Expiration::Never, Expiration::After)
}
