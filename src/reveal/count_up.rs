use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNT_UP_DURATION: Duration = Duration::from_millis(1200);

/// `1 - (1 - p)^3`, with `p` clamped into `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    1.0 - (1.0 - p).powi(3)
}

/// Deterministic count-up animation toward a target number.
///
/// The host starts it when the counter is revealed and samples it with the
/// time elapsed since then.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountUp {
    pub from: f64,
    pub target: f64,
    pub duration: Duration,
}

impl CountUp {
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self {
            from: 0.0,
            target,
            duration: DEFAULT_COUNT_UP_DURATION,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_start(mut self, from: f64) -> Self {
        self.from = from;
        self
    }

    #[must_use]
    pub fn progress_at(self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    #[must_use]
    pub fn value_at(self, elapsed: Duration) -> f64 {
        let eased = ease_out_cubic(self.progress_at(elapsed));
        self.from + (self.target - self.from) * eased
    }

    #[must_use]
    pub fn is_finished(self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
