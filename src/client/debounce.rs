use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest value until it has been quiet for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending value and restart the wait.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value once `delay` has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*at) < self.delay {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("car", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), Some("car"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_newer_push_resets_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("c", start);
        debouncer.push("ca", start + Duration::from_millis(200));
        debouncer.push("car", start + Duration::from_millis(400));
        assert_eq!(debouncer.poll(start + Duration::from_millis(650)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(700)), Some("car"));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
