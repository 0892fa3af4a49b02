//! Frame timing for the driver's periodic stats line.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling window of frame durations plus a count of skipped frames.
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    last_frame: Option<Instant>,
    max_samples: usize,
    skipped: u64,
}

impl FrameTimer {
    /// Create a new frame timer with a default 120-sample rolling window.
    pub fn new() -> Self {
        Self::with_window(120)
    }

    pub fn with_window(max_samples: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            last_frame: None,
            max_samples: max_samples.max(1),
            skipped: 0,
        }
    }

    /// Record the start of a new frame. The first call only sets the reference point.
    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        if let Some(last) = self.last_frame.replace(now) {
            self.record(now.saturating_duration_since(last));
        }
    }

    /// Push one frame duration into the window.
    pub fn record(&mut self, dt: Duration) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Average frames per second over the sample window.
    pub fn fps(&self) -> f64 {
        let total = self.total_secs();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.total_secs() / self.frame_times.len() as f64 * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    fn total_secs(&self) -> f64 {
        self.frame_times.iter().map(|d| d.as_secs_f64()).sum()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
