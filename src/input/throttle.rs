use std::time::Duration;

/// Rate limiter for high-frequency samples.
///
/// At most one sample is let through per `interval`. Samples arriving inside
/// the window are not queued: only the latest is kept and released by
/// [`Throttle::flush`] once the window has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Duration>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn is_open(&self, now: Duration) -> bool {
        self.last_fired
            .is_none_or(|last| now.saturating_sub(last) >= self.interval)
    }

    /// Returns the sample if it may be applied now, otherwise keeps it as the
    /// trailing sample (replacing any older one).
    pub fn offer(&mut self, now: Duration, sample: T) -> Option<T> {
        if self.is_open(now) {
            self.last_fired = Some(now);
            self.pending = None;
            Some(sample)
        } else {
            self.pending = Some(sample);
            None
        }
    }

    /// Releases the trailing sample if its window has elapsed.
    pub fn flush(&mut self, now: Duration) -> Option<T> {
        if self.pending.is_some() && self.is_open(now) {
            self.last_fired = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the trailing sample and reopens the window.
    pub fn reset(&mut self) {
        self.last_fired = None;
        self.pending = None;
    }
}
