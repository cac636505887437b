//! User-activity signal used to gate background refresh.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

/// Tracks the last user interaction and foreground state.
///
/// Background refresh only runs while the user is active: foregrounded and
/// interacted within the activity window.
#[derive(Debug)]
pub struct ActivityTracker {
    last_interaction_ms: AtomicI64,
    foreground: AtomicBool,
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self {
            last_interaction_ms: AtomicI64::new(Utc::now().timestamp_millis()),
            foreground: AtomicBool::new(true),
        }
    }
}

impl ActivityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user interaction now.
    pub fn touch(&self) {
        self.last_interaction_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.foreground.store(foreground, Ordering::Relaxed);
        if foreground {
            self.touch();
        }
    }

    #[must_use]
    pub fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::Relaxed)
    }

    /// Whether the user counts as active within `window`.
    #[must_use]
    pub fn is_active(&self, window: Duration) -> bool {
        if !self.is_foreground() {
            return false;
        }
        let last = self.last_interaction_ms.load(Ordering::Relaxed);
        let elapsed_ms = Utc::now().timestamp_millis().saturating_sub(last);
        elapsed_ms >= 0 && (elapsed_ms as u128) <= window.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tracker_is_active() {
        let tracker = ActivityTracker::new();
        assert!(tracker.is_active(Duration::from_secs(300)));
    }

    #[test]
    fn backgrounded_tracker_is_inactive() {
        let tracker = ActivityTracker::new();
        tracker.set_foreground(false);
        assert!(!tracker.is_active(Duration::from_secs(300)));
    }

    #[test]
    fn refocusing_counts_as_an_interaction() {
        let tracker = ActivityTracker::new();
        tracker
            .last_interaction_ms
            .store(0, Ordering::Relaxed);
        assert!(!tracker.is_active(Duration::from_secs(300)));

        tracker.set_foreground(true);
        assert!(tracker.is_active(Duration::from_secs(300)));
    }

    #[test]
    fn stale_interaction_is_inactive() {
        let tracker = ActivityTracker::new();
        let six_minutes_ago = Utc::now().timestamp_millis() - 360_000;
        tracker
            .last_interaction_ms
            .store(six_minutes_ago, Ordering::Relaxed);
        assert!(!tracker.is_active(Duration::from_secs(300)));
        assert!(tracker.is_active(Duration::from_secs(600)));
    }
}
