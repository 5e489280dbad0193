//! Notification channel configuration and reconnect backoff.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ReconnectPolicy
// ---------------------------------------------------------------------------

/// Exponential backoff between reconnect attempts.
///
/// Delay for attempt `n` (starting at 1) is
/// `min(base_delay * 2^(n-1), max_delay)` plus a random `0..=jitter`.
/// The jitter keeps a fleet of tabs from reconnecting in lockstep after a
/// backend restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconnectPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Consecutive failures tolerated before giving up. 0 = never give up.
    pub max_attempts: u32,
    pub jitter: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            max_attempts: 0,
            jitter: Duration::from_millis(500),
        }
    }
}

impl ReconnectPolicy {
    /// Whether `attempt` consecutive failures exhaust the policy.
    pub fn gives_up_after(&self, attempt: u32) -> bool {
        self.max_attempts != 0 && attempt > self.max_attempts
    }

    /// Delay before reconnect attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let backoff = self
            .base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay);

        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return backoff;
        }
        backoff + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }
}

// ---------------------------------------------------------------------------
// NotifyConfig
// ---------------------------------------------------------------------------

/// Where and how to open the notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// WebSocket endpoint, e.g. `wss://example.org/notifications`.
    pub url: String,
    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

impl NotifyConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}
