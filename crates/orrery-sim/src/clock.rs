//! Elapsed-time sources.
//!
//! Kinematics is a pure function of elapsed milliseconds, so the clock is
//! the only source of motion. Tests and snapshots use [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use orrery_config::schema::ClockEpoch;

/// Something that reports elapsed milliseconds.
///
/// Readings never decrease between calls on the same source.
pub trait TimeSource {
    fn elapsed_ms(&self) -> f64;
}

/// Wall clock, measured from application start or from the Unix epoch.
pub struct SystemClock {
    epoch: ClockEpoch,
    start: Instant,
    last: Cell<f64>,
}

impl SystemClock {
    pub fn new(epoch: ClockEpoch) -> Self {
        Self {
            epoch,
            start: Instant::now(),
            last: Cell::new(0.0),
        }
    }

    pub fn epoch(&self) -> ClockEpoch {
        self.epoch
    }

    fn raw_ms(&self) -> f64 {
        match self.epoch {
            ClockEpoch::Start => self.start.elapsed().as_secs_f64() * 1000.0,
            ClockEpoch::Unix => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as f64)
                .unwrap_or(0.0),
        }
    }
}

impl TimeSource for SystemClock {
    fn elapsed_ms(&self) -> f64 {
        // Wall time can step backwards; hold the previous reading instead.
        let now = self.raw_ms().max(self.last.get());
        self.last.set(now);
        now
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            ms: Cell::new(start_ms),
        }
    }

    /// Jump to `ms`. Earlier values are ignored.
    pub fn set(&self, ms: f64) {
        if ms > self.ms.get() {
            self.ms.set(ms);
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.ms.set(self.ms.get() + delta_ms);
        }
    }
}

impl TimeSource for ManualClock {
    fn elapsed_ms(&self) -> f64 {
        self.ms.get()
    }
}

/// Lets a caller keep advancing a clock it has handed to a driver.
impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn elapsed_ms(&self) -> f64 {
        (**self).elapsed_ms()
    }
}
