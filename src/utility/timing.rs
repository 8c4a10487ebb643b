// ============================================
// TIMING UTILITY - Performance Measurement
// ============================================
// Usage:
//   1. Manual tracking: let timer = Timer::start("name"); ... timer.stop();
//   2. As a wrapper: let result = Timer::measure("name", || { /* code */ });
// ============================================

use std::time::{Duration, Instant};
use tracing::{info, warn};

// Anything slower than this is logged at warn level
const SLOW_THRESHOLD_MS: u128 = 5000;

/// Timer for measuring execution time
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Create a new timer with a name
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the result
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        let ms = duration.as_millis();

        if ms > SLOW_THRESHOLD_MS {
            warn!(operation = %self.name, elapsed_ms = ms as u64, "{} (slow)", label(ms));
        } else {
            info!(operation = %self.name, elapsed_ms = ms as u64, "{}", label(ms));
        }

        duration
    }

    /// Time a synchronous closure
    pub fn measure<F, R>(name: impl Into<String>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let timer = Self::start(name);
        let result = f();
        timer.stop();
        result
    }
}

fn label(ms: u128) -> &'static str {
    match ms {
        0..=100 => "very fast",
        101..=500 => "fast",
        501..=1000 => "acceptable",
        1001..=5000 => "slow",
        _ => "very slow",
    }
}
