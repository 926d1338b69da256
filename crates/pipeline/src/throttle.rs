//! Fixed-delay gate between external requests.

use std::thread;
use std::time::{Duration, Instant};

/// Keeps at least `delay` of idle time between the end of one call and the
/// start of the next. The first call never waits.
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    last_finished: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_finished: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the remaining delay, then run `f`.
    pub fn run<T>(&mut self, f: impl FnOnce() -> T) -> T {
        if let Some(finished) = self.last_finished {
            let idle = finished.elapsed();
            if idle < self.delay {
                thread::sleep(self.delay - idle);
            }
        }
        let out = f();
        self.last_finished = Some(Instant::now());
        out
    }
}
