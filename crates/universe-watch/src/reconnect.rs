//! Fixed-delay reconnect policy.
//!
//! A lost connection is retried after a constant delay. The attempt
//! counter resets on every successful connect; once it reaches the bound
//! the subscriber gives up for good.

use std::time::Duration;

/// Delay between attempts when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Attempts allowed between successful connects when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retry bookkeeping for one subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    delay: Duration,
    max_attempts: u32,
    attempts: u32,
}

impl ReconnectPolicy {
    /// A policy with the given delay and bound. A bound of zero is raised
    /// to one so the first connect is always tried.
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: max_attempts.max(1),
            attempts: 0,
        }
    }

    /// Record a failed attempt. Returns the delay before the next try, or
    /// `None` once the bound is reached.
    pub const fn on_failure(&mut self) -> Option<Duration> {
        self.attempts = self.attempts.saturating_add(1);
        if self.is_exhausted() {
            None
        } else {
            Some(self.delay)
        }
    }

    /// Record a successful connect.
    pub const fn on_connect(&mut self) {
        self.attempts = 0;
    }

    /// Failed attempts since the last successful connect.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether no further attempt is allowed.
    pub const fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn gives_up_after_the_bound() {
        let mut policy = ReconnectPolicy::default();
        for _ in 0..4 {
            assert_eq!(policy.on_failure(), Some(Duration::from_secs(3)));
        }
        assert_eq!(policy.on_failure(), None);
        assert!(policy.is_exhausted());
        assert_eq!(policy.attempts(), 5);
    }

    #[test]
    fn successful_connect_resets_the_count() {
        let mut policy = ReconnectPolicy::new(Duration::from_millis(10), 2);
        assert!(policy.on_failure().is_some());
        policy.on_connect();
        assert_eq!(policy.attempts(), 0);
        assert!(policy.on_failure().is_some());
        assert!(policy.on_failure().is_none());
    }

    #[test]
    fn zero_bound_still_allows_one_try() {
        let mut policy = ReconnectPolicy::new(Duration::ZERO, 0);
        assert!(!policy.is_exhausted());
        assert!(policy.on_failure().is_none());
    }
}
