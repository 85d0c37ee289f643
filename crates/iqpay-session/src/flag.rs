#![forbid(unsafe_code)]

//! The session flag value and its expiry arithmetic.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Logical key the flag is stored under.
pub const SESSION_KEY: &str = "wallet_auth";

/// How long a remembered session stays valid.
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// A remembered authentication, persisted as JSON `{"expiry": <millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlag {
    /// Expiry instant, epoch milliseconds.
    pub expiry: u64,
}

impl SessionFlag {
    /// Flag expiring [`SESSION_TTL`] after `now`.
    #[must_use]
    pub fn starting_at(now: SystemTime) -> Self {
        Self {
            expiry: epoch_millis(now + SESSION_TTL),
        }
    }

    /// Whether the flag is still valid at `now`. Expiry itself counts as
    /// expired.
    #[must_use]
    pub fn is_live(&self, now: SystemTime) -> bool {
        epoch_millis(now) < self.expiry
    }
}

/// Milliseconds since the Unix epoch; pre-epoch instants clamp to zero.
#[must_use]
pub fn epoch_millis(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
