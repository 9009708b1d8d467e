//! Wall-clock adapter for cooldown decisions.
//!
//! Tests drive time through `MockClock` in `crate::infrastructure::mocks`
//! instead, enabled with the `test-helpers` feature:
//!
//! ```toml
//! [dev-dependencies]
//! cookie-clearer = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::time::Instant;

/// Monotonic clock backed by `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(5));

        assert!(clock.now() > t1);
    }
}
