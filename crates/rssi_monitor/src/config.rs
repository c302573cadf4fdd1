//! Configuration for the consumer loop.

use std::time::Duration;

/// Tuning for the drain loop that empties the report queue.
///
/// None of this affects the producer side, which never waits.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Spin rounds (each doubling the spin count) before yielding.
    ///
    /// Default: 6
    pub spin_limit: u32,

    /// Yield rounds after spinning before the loop starts sleeping.
    ///
    /// Default: 10
    pub yield_limit: u32,

    /// Sleep between polls once spinning and yielding found nothing.
    ///
    /// Default: 1ms
    pub park_interval: Duration,

    /// Maximum reports handed to the sink per poll.
    ///
    /// Default: 32
    pub drain_batch: usize,

    /// Log every delivered report at debug level.
    ///
    /// Default: false
    pub verbose: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            spin_limit: 6,
            yield_limit: 10,
            park_interval: Duration::from_millis(1),
            drain_batch: 32,
            verbose: false,
        }
    }
}

impl MonitorConfig {
    /// Spins longer and never sleeps for more than 50µs.
    pub fn low_latency() -> Self {
        Self {
            spin_limit: 10,
            yield_limit: 64,
            park_interval: Duration::from_micros(50),
            drain_batch: 8,
            verbose: false,
        }
    }

    /// Goes to sleep quickly and drains in larger batches.
    pub fn low_power() -> Self {
        Self {
            spin_limit: 2,
            yield_limit: 2,
            park_interval: Duration::from_millis(10),
            drain_batch: 128,
            verbose: false,
        }
    }

    pub fn with_spin_limit(mut self, limit: u32) -> Self {
        self.spin_limit = limit;
        self
    }

    pub fn with_yield_limit(mut self, limit: u32) -> Self {
        self.yield_limit = limit;
        self
    }

    pub fn with_park_interval(mut self, interval: Duration) -> Self {
        self.park_interval = interval;
        self
    }

    /// Sets the batch size. Zero is raised to one so a poll always makes
    /// progress.
    pub fn with_drain_batch(mut self, batch: usize) -> Self {
        self.drain_batch = batch.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
