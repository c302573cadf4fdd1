use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a monitor queue.
///
/// Every counter has a single writer: `accepted` and `dropped` belong to the
/// producer side, `delivered` to the consumer side. Relaxed ordering is enough
/// because the values are only reported, never used for synchronization.
#[derive(Debug, Default)]
pub struct QueueStats {
    accepted: AtomicU64,
    dropped: AtomicU64,
    delivered: AtomicU64,
}

impl QueueStats {
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
        }
    }

    // Single writer, so load + store instead of an RMW keeps the producer path
    // free of locked instructions.
    #[inline]
    pub(crate) fn record_accepted(&self) {
        bump(&self.accepted, 1);
    }

    #[inline]
    pub(crate) fn record_dropped(&self) {
        bump(&self.dropped, 1);
    }

    #[inline]
    pub(crate) fn record_delivered(&self, n: u64) {
        bump(&self.delivered, n);
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
        }
    }
}

#[inline]
fn bump(counter: &AtomicU64, n: u64) {
    let v = counter.load(Ordering::Relaxed);
    counter.store(v.wrapping_add(n), Ordering::Relaxed);
}

/// Plain copy of [`QueueStats`] at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Reports the producer managed to enqueue.
    pub accepted: u64,
    /// Reports rejected because the queue was full.
    pub dropped: u64,
    /// Reports the consumer handed to a sink.
    pub delivered: u64,
}

impl StatsSnapshot {
    /// Reports accepted but not yet delivered (advisory).
    pub fn in_flight(&self) -> u64 {
        self.accepted.saturating_sub(self.delivered)
    }

    /// Fraction of offered reports that were dropped, in `0.0..=1.0`.
    pub fn drop_rate(&self) -> f64 {
        let offered = self.accepted + self.dropped;
        if offered == 0 {
            0.0
        } else {
            self.dropped as f64 / offered as f64
        }
    }
}
