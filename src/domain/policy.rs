//! Cooldown policy for alert de-duplication.
//!
//! A hostname that was alerted on within the cooldown window is suppressed.
//! Entries older than twice the window are stale and may be swept.

use std::time::{Duration, Instant};

/// Cooldown used when none is configured.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

/// Decision made for a candidate event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Handle the event and restart the cooldown
    Accept,
    /// Drop the event, leave state untouched
    Suppress,
}

impl PolicyDecision {
    /// Check if this decision is Accept.
    pub fn is_accept(&self) -> bool {
        matches!(self, PolicyDecision::Accept)
    }

    /// Check if this decision is Suppress.
    pub fn is_suppress(&self) -> bool {
        matches!(self, PolicyDecision::Suppress)
    }
}

/// Error returned when a cooldown policy cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Cooldown window must be greater than zero
    #[error("cooldown window must be greater than 0")]
    ZeroWindow,
}

/// Fixed-window cooldown per hostname.
///
/// # Example
/// ```
/// use cookie_clearer::CooldownPolicy;
/// use std::time::{Duration, Instant};
///
/// let policy = CooldownPolicy::new(Duration::from_secs(10)).unwrap();
/// let t0 = Instant::now();
///
/// assert!(policy.decide(None, t0).is_accept());
/// assert!(policy.decide(Some(t0), t0 + Duration::from_secs(2)).is_suppress());
/// assert!(policy.decide(Some(t0), t0 + Duration::from_secs(10)).is_accept());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    window: Duration,
}

impl CooldownPolicy {
    /// Create a policy with the given cooldown window.
    ///
    /// # Errors
    /// Returns `PolicyError::ZeroWindow` if `window` is zero.
    pub fn new(window: Duration) -> Result<Self, PolicyError> {
        if window.is_zero() {
            return Err(PolicyError::ZeroWindow);
        }
        Ok(Self { window })
    }

    /// The cooldown window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Maximum age of a cache entry, and the sweep period: twice the window.
    pub fn retention(&self) -> Duration {
        self.window.saturating_mul(2)
    }

    /// Decide on an event at `now` given the last accepted timestamp.
    ///
    /// A clock that moved backwards yields a zero age, so the event is
    /// suppressed rather than treated as fresh.
    pub fn decide(&self, last_accepted: Option<Instant>, now: Instant) -> PolicyDecision {
        match last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.window => {
                PolicyDecision::Suppress
            }
            _ => PolicyDecision::Accept,
        }
    }

    /// Whether an entry recorded at `recorded` is stale at `now`.
    ///
    /// Stale means strictly older than `retention()`.
    pub fn is_expired(&self, recorded: Instant, now: Instant) -> bool {
        now.saturating_duration_since(recorded) > self.retention()
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            window: DEFAULT_COOLDOWN,
        }
    }
}
