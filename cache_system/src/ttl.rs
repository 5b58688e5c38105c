//! Time-to-live values for cache writes
//!
//! A TTL is either a relative duration or an absolute point in time. Both are
//! resolved against the current clock when the entry is written.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Longest lifetime a cache entry can be given. Longer TTLs are clamped to it.
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Expiration for a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Expire after the given duration
    After(Duration),
    /// Expire at the given instant
    At(DateTime<Utc>),
}

/// How a cache write should treat expiry once the TTL has been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Keep until explicitly forgotten
    Never,
    /// Expire after the duration (always non-zero)
    After(Duration),
    /// Already expired: the write removes the entry instead of storing it
    Immediately,
}

impl Ttl {
    /// TTL of whole seconds
    pub fn seconds(seconds: u64) -> Self {
        Ttl::After(Duration::from_secs(seconds))
    }

    /// Remaining lifetime measured from now
    pub fn resolve(&self) -> Duration {
        self.resolve_at(Utc::now())
    }

    /// Remaining lifetime measured from `now`; instants in the past resolve to zero
    pub fn resolve_at(&self, now: DateTime<Utc>) -> Duration {
        match self {
            Ttl::After(duration) => *duration,
            Ttl::At(instant) => (*instant - now).to_std().unwrap_or(Duration::ZERO),
        }
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Ttl::After(duration)
    }
}

impl From<DateTime<Utc>> for Ttl {
    fn from(instant: DateTime<Utc>) -> Self {
        Ttl::At(instant)
    }
}

impl From<u64> for Ttl {
    fn from(seconds: u64) -> Self {
        Ttl::seconds(seconds)
    }
}

impl Expiry {
    /// Combine a per-write TTL with the backend default, clamped to [`MAX_TTL`]
    pub fn resolve(ttl: Option<Ttl>, default_ttl: Option<Duration>) -> Self {
        let duration = match ttl {
            Some(ttl) => ttl.resolve(),
            None => match default_ttl {
                Some(default_ttl) => default_ttl,
                None => return Expiry::Never,
            },
        };

        if duration.is_zero() {
            Expiry::Immediately
        } else {
            Expiry::After(duration.min(MAX_TTL))
        }
    }
}
