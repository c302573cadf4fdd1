//! Radio-callback → queue → line sink pipeline.
//!
//! [`Monitor`] owns the report queue and its counters. Splitting it yields a
//! [`RadioTap`], which the receive callback uses to enqueue reports, and a
//! [`Drain`], which a polling loop uses to move reports into a [`ReportSink`].
//!
//! The tap does nothing but enqueue and bump a counter: no logging, no
//! allocation, no waiting. Overflow is noticed and logged on the drain side.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::idle::Idle;
use crate::report::{MacAddr, RssiReport};
use crate::stats::{QueueStats, StatsSnapshot};

use log::{debug, info, warn};
use ringspsc_rs::{BoundedRing, Consumer, Producer};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Default number of queue slots; the firmware found about five in flight to
/// be plenty and reserved 100.
pub const DEFAULT_SLOTS: usize = 100;

/// Destination for delivered reports.
pub trait ReportSink {
    fn emit(&mut self, report: &RssiReport) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each report as one `Display` line, the format the host-side
/// receiver parses.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for LineSink<W> {
    fn emit(&mut self, report: &RssiReport) -> io::Result<()> {
        writeln!(self.writer, "{}", report)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl ReportSink for Vec<RssiReport> {
    fn emit(&mut self, report: &RssiReport) -> io::Result<()> {
        self.push(*report);
        Ok(())
    }
}

/// Report queue plus counters, shared by one tap and one drain.
#[derive(Debug)]
pub struct Monitor<const N: usize = DEFAULT_SLOTS> {
    ring: BoundedRing<RssiReport, N>,
    stats: QueueStats,
    config: MonitorConfig,
}

impl<const N: usize> Monitor<N> {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            ring: BoundedRing::new(),
            stats: QueueStats::new(),
            config,
        }
    }

    /// Reports the queue can hold at once.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Hands out the producer and consumer sides. Only the first call
    /// succeeds.
    pub fn split(&self) -> Result<(RadioTap<'_, N>, Drain<'_, N>), MonitorError> {
        let (producer, consumer) = self.ring.split()?;
        let tap = RadioTap {
            producer,
            stats: &self.stats,
        };
        let drain = Drain {
            consumer,
            stats: &self.stats,
            config: self.config.clone(),
            seen_dropped: 0,
            held: None,
        };
        Ok((tap, drain))
    }
}

impl<const N: usize> Default for Monitor<N> {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

/// Producer side, owned by the radio receive callback.
#[derive(Debug)]
pub struct RadioTap<'a, const N: usize> {
    producer: Producer<'a, RssiReport, N>,
    stats: &'a QueueStats,
}

impl<const N: usize> RadioTap<'_, N> {
    /// Queues one report. Returns `false` and counts a drop if the queue was
    /// full.
    #[inline]
    pub fn on_frame(&mut self, report: RssiReport) -> bool {
        if self.producer.enqueue(report) {
            self.stats.record_accepted();
            true
        } else {
            self.stats.record_dropped();
            false
        }
    }

    /// Queues a report built from the callback's raw arguments.
    #[inline]
    pub fn on_receive(&mut self, monitor: MacAddr, target: MacAddr, rssi: i8) -> bool {
        self.on_frame(RssiReport::new(monitor, target, rssi))
    }
}

/// Consumer side, owned by the polling loop.
#[derive(Debug)]
pub struct Drain<'a, const N: usize> {
    consumer: Consumer<'a, RssiReport, N>,
    stats: &'a QueueStats,
    config: MonitorConfig,
    seen_dropped: u64,
    /// Report dequeued but not yet accepted by the sink.
    held: Option<RssiReport>,
}

impl<const N: usize> Drain<'_, N> {
    /// Moves up to `drain_batch` waiting reports into `sink` and returns how
    /// many were delivered.
    ///
    /// A report whose `emit` fails is held by the drain and offered again,
    /// ahead of the queue, on the next poll. The error is returned right away.
    pub fn poll<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, MonitorError> {
        self.check_overflow();

        let batch = self.config.drain_batch.max(1);
        let mut delivered = 0;
        let mut outcome = Ok(());

        while delivered < batch {
            let Some(report) = self.held.take().or_else(|| self.consumer.pop()) else {
                break;
            };
            if self.config.verbose {
                debug!("{}", report);
            }
            if let Err(e) = sink.emit(&report) {
                self.held = Some(report);
                outcome = Err(e);
                break;
            }
            delivered += 1;
        }

        self.stats.record_delivered(delivered as u64);
        outcome?;
        Ok(delivered)
    }

    /// Polls until `stop` is set, idling while the queue is empty, then
    /// drains whatever is left and flushes the sink.
    ///
    /// Transient sink errors (`Interrupted`, `WouldBlock`) idle and retry the
    /// held report, both before and after `stop`; any other error ends the
    /// loop.
    pub fn run<S: ReportSink + ?Sized>(
        &mut self,
        sink: &mut S,
        stop: &AtomicBool,
    ) -> Result<StatsSnapshot, MonitorError> {
        let mut idle = Idle::new(&self.config);
        let mut failing = false;
        info!(
            "drain loop started: capacity {}, batch {}",
            N - 1,
            self.config.drain_batch
        );

        while !stop.load(Ordering::Acquire) {
            match self.step(sink, &mut failing)? {
                Some(0) | None => idle.wait(),
                Some(_) => idle.reset(),
            }
        }

        // Final drain: done once the queue and the held slot are both empty.
        loop {
            match self.step(sink, &mut failing)? {
                Some(0) if self.held.is_none() && self.consumer.is_empty() => break,
                Some(0) | None => idle.wait(),
                Some(_) => idle.reset(),
            }
        }
        sink.flush()?;
        self.check_overflow();

        let snapshot = self.stats.snapshot();
        info!(
            "drain loop stopped: {} accepted, {} delivered, {} dropped",
            snapshot.accepted, snapshot.delivered, snapshot.dropped
        );
        Ok(snapshot)
    }

    /// One poll with the transient/terminal split applied. `None` means a
    /// transient sink error; only the first of a streak is logged at `warn`.
    fn step<S: ReportSink + ?Sized>(
        &mut self,
        sink: &mut S,
        failing: &mut bool,
    ) -> Result<Option<usize>, MonitorError> {
        match self.poll(sink) {
            Ok(n) => {
                if std::mem::take(failing) {
                    info!("sink recovered");
                }
                Ok(Some(n))
            }
            Err(e) if !e.is_terminal() => {
                if *failing {
                    debug!("sink still failing: {}", e);
                } else {
                    warn!("sink error, retrying: {}", e);
                    *failing = true;
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Advisory count of reports waiting, including one held after a
    /// failed `emit`.
    pub fn pending(&self) -> usize {
        self.consumer.len() + usize::from(self.held.is_some())
    }

    fn check_overflow(&mut self) {
        let dropped = self.stats.dropped();
        if dropped != self.seen_dropped {
            warn!(
                "report queue overflow: {} dropped since last poll ({} total)",
                dropped.wrapping_sub(self.seen_dropped),
                dropped
            );
            self.seen_dropped = dropped;
        }
    }
}
