//! Manually advanced clock

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use core_kernel::{Clock, DomainPort};

/// Clock that only moves when told to
///
/// With `tick` set, every reading also advances the clock by that amount,
/// which gives successive events distinct timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    tick: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
            tick: Duration::zero(),
        }
    }

    /// Clock that advances by `tick` after each reading
    pub fn ticking(start: DateTime<Utc>, tick: Duration) -> Self {
        Self {
            now: Mutex::new(start),
            tick,
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl DomainPort for ManualClock {}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        let reading = *now;
        *now += self.tick;
        reading
    }
}
