#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Frame clock.
///
/// Driven either by the wall clock ([`Timer::tick`]) or by fixed steps
/// ([`Timer::step`]) for headless runs and tests.
#[derive(Debug, Clone)]
pub struct Timer {
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total time since creation, the origin of pointer event timestamps
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.advance(now - self.last_update);
        self.last_update = now;
    }

    /// Advances by a fixed amount, ignoring the wall clock.
    pub fn step(&mut self, delta: Duration) {
        self.advance(delta);
        self.last_update = Instant::now();
    }

    fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_steps_accumulate() {
        let mut timer = Timer::new();
        timer.step(Duration::from_millis(16));
        timer.step(Duration::from_millis(16));
        assert_eq!(timer.now(), Duration::from_millis(32));
        assert_eq!(timer.frame_count, 2);
        assert!((timer.dt_seconds() - 0.016).abs() < 1e-6);
    }
}
