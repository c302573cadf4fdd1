use crate::config::MonitorConfig;
use std::hint;
use std::thread;
use std::time::Duration;

/// Idle strategy for a polling consumer that found the queue empty.
///
/// Escalates spin with PAUSE hints → yield to the OS → sleep for
/// `park_interval`, and drops back to spinning on [`reset`](Self::reset).
/// Consumer side only; a producer must never wait.
#[derive(Debug)]
pub struct Idle {
    step: u32,
    spin_limit: u32,
    yield_limit: u32,
    park_interval: Duration,
}

impl Idle {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            step: 0,
            spin_limit: config.spin_limit,
            yield_limit: config.spin_limit.saturating_add(config.yield_limit),
            park_interval: config.park_interval,
        }
    }

    /// Waits a little longer than last time.
    #[inline]
    pub fn wait(&mut self) {
        if self.step <= self.spin_limit {
            let spins = 1u64 << self.step.min(16);
            for _ in 0..spins {
                hint::spin_loop();
            }
            self.step += 1;
        } else if self.step <= self.yield_limit {
            thread::yield_now();
            self.step += 1;
        } else {
            thread::sleep(self.park_interval);
        }
    }

    /// `true` once spinning and yielding are exhausted and `wait` sleeps.
    #[inline]
    pub fn is_parking(&self) -> bool {
        self.step > self.yield_limit
    }

    /// Call after the queue produced something.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }
}
