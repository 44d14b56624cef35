//! Elapsed-time helper over the monotonic clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    #[default]
    Seconds,
    MilliSeconds,
}

/// Measures time since construction or the last [`EasyTimer::start_timer`].
#[derive(Debug, Clone, Copy)]
pub struct EasyTimer {
    start: Instant,
}

impl Default for EasyTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl EasyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn start_timer(&mut self) {
        self.start = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole units elapsed, truncated.
    pub fn duration_time(&self, unit: TimeUnit) -> u64 {
        let elapsed = self.elapsed();
        match unit {
            TimeUnit::Seconds => elapsed.as_secs(),
            TimeUnit::MilliSeconds => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
