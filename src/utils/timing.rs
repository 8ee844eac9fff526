//! Timing utilities for scanner runs and database loading

use std::time::{Duration, Instant};

/// Stopwatch started on creation
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer that starts immediately
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time as produced by [`human_readable`]
    pub fn elapsed_human(&self) -> String {
        human_readable(self.elapsed())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

/// Format a duration the way run summaries print it.
///
/// - at least one hour: `1h2m3s`
/// - at least one minute: `2m3s`
/// - at least one second: `3s`
/// - below one second: `0.045s` (milliseconds)
pub fn human_readable(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else if seconds > 0 {
        format!("{}s", seconds)
    } else {
        format!("0.{:03}s", duration.subsec_millis())
    }
}
