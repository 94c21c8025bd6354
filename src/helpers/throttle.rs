use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Minimum-interval guard for token refreshes, keyed by user id.
#[derive(Debug)]
pub struct RefreshThrottle {
    min_interval: Duration,
    last_refresh: Mutex<HashMap<i32, Instant>>,
}

impl RefreshThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_refresh: Mutex::new(HashMap::new()),
        }
    }

    /// Records the attempt and returns `true` if the user may refresh now.
    pub fn try_acquire(&self, user_id: i32) -> bool {
        self.try_acquire_at(user_id, Instant::now())
    }

    fn try_acquire_at(&self, user_id: i32, now: Instant) -> bool {
        let mut last_refresh = match self.last_refresh.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match last_refresh.get(&user_id) {
            Some(last) if now.saturating_duration_since(*last) < self.min_interval => false,
            _ => {
                last_refresh.insert(user_id, now);
                // stale entries are useless once the interval has passed
                let min_interval = self.min_interval;
                last_refresh.retain(|_, last| now.saturating_duration_since(*last) < min_interval || *last == now);
                true
            }
        }
    }

    pub fn remaining(&self, user_id: i32) -> Option<Duration> {
        let last_refresh = match self.last_refresh.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        last_refresh.get(&user_id).and_then(|last| {
            let elapsed = last.elapsed();
            self.min_interval.checked_sub(elapsed).filter(|d| !d.is_zero())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_refresh_inside_interval_is_rejected() {
        let throttle = RefreshThrottle::new(Duration::from_secs(10));
        let start = Instant::now();

        assert!(throttle.try_acquire_at(1, start));
        assert!(!throttle.try_acquire_at(1, start + Duration::from_secs(3)));
        assert!(throttle.try_acquire_at(1, start + Duration::from_secs(10)));
    }

    #[test]
    fn users_are_throttled_independently() {
        let throttle = RefreshThrottle::new(Duration::from_secs(10));
        let start = Instant::now();

        assert!(throttle.try_acquire_at(1, start));
        assert!(throttle.try_acquire_at(2, start + Duration::from_secs(1)));
        assert!(!throttle.try_acquire_at(2, start + Duration::from_secs(2)));
    }

    #[test]
    fn zero_interval_never_throttles() {
        let throttle = RefreshThrottle::new(Duration::ZERO);
        let start = Instant::now();

        assert!(throttle.try_acquire_at(7, start));
        assert!(throttle.try_acquire_at(7, start));
        assert!(throttle.remaining(7).is_none());
    }

    #[test]
    fn remaining_reports_wait_time() {
        let throttle = RefreshThrottle::new(Duration::from_secs(60));
        assert!(throttle.remaining(3).is_none());
        assert!(throttle.try_acquire(3));
        assert!(throttle.remaining(3).is_some());
    }
}
