//! RSSI monitor built on ringspsc-rs
//!
//! A radio receive callback observes frames from nearby targets and records
//! one [`RssiReport`] per frame. The callback runs in a context where it must
//! not block, log or allocate, so it only enqueues the report on a bounded
//! SPSC queue. A polling loop on the main task drains the queue and writes
//! each report as a text line for the host to parse.
//!
//! ```text
//!  radio callback ──on_frame──▶ BoundedRing<RssiReport, N> ──poll──▶ ReportSink
//!     (RadioTap)                  (N - 1 reports)                 (Drain)
//! ```
//!
//! # Example
//!
//! ```
//! use rssi_monitor::{MacAddr, Monitor, MonitorConfig, RssiReport};
//!
//! let monitor: Monitor<8> = Monitor::new(MonitorConfig::default());
//! let (mut tap, mut drain) = monitor.split().unwrap();
//!
//! tap.on_receive(MacAddr::from_u64(0x342eb61ec446), MacAddr::from_u64(1), -57);
//!
//! let mut lines = rssi_monitor::LineSink::new(Vec::new());
//! assert_eq!(drain.poll(&mut lines).unwrap(), 1);
//! assert_eq!(lines.into_inner(), b"342eb61ec446_000000000001:-57\n");
//!
//! let parsed: RssiReport = "342eb61ec446_000000000001:-57".parse().unwrap();
//! assert_eq!(parsed.rssi, -57);
//! ```

mod config;
mod error;
mod idle;
mod monitor;
mod report;
mod stats;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use idle::Idle;
pub use monitor::{Drain, LineSink, Monitor, RadioTap, ReportSink, DEFAULT_SLOTS};
pub use report::{MacAddr, ParseReportError, RssiReport};
pub use stats::{QueueStats, StatsSnapshot};
