//! Public health metadata for background refresh cycles.

use std::time::SystemTime;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RefreshHealth {
    pub last_attempt_at: Option<SystemTime>,
    pub last_success_at: Option<SystemTime>,
    pub last_attempt_succeeded: Option<bool>,
    pub previous_attempt_succeeded: Option<bool>,
}

impl RefreshHealth {
    /// Records the outcome of one cycle. A cycle succeeds only if every tenant refreshed.
    pub(crate) fn record_attempt(&mut self, at: SystemTime, succeeded: bool) {
        self.previous_attempt_succeeded = self.last_attempt_succeeded;
        self.last_attempt_succeeded = Some(succeeded);
        self.last_attempt_at = Some(at);
        if succeeded {
            self.last_success_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RefreshHealth;
    use std::time::{Duration, SystemTime};

    #[test]
    fn failed_attempt_keeps_last_success_time() {
        let mut health = RefreshHealth::default();
        let first = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let second = first + Duration::from_secs(60);

        health.record_attempt(first, true);
        health.record_attempt(second, false);

        assert_eq!(health.last_attempt_at, Some(second));
        assert_eq!(health.last_success_at, Some(first));
        assert_eq!(health.last_attempt_succeeded, Some(false));
        assert_eq!(health.previous_attempt_succeeded, Some(true));
    }
}
