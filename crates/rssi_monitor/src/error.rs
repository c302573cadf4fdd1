//! Error types for the monitor.

use ringspsc_rs::RingError;
use std::io;
use thiserror::Error;

/// Errors from setting up or running a monitor.
///
/// Queue rejections are not errors here: a full queue is counted as a drop
/// and an empty queue just means the drain loop idles.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The sink failed to write a report.
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),

    /// The monitor's queue was already split into a tap and a drain.
    #[error(transparent)]
    Ring(#[from] RingError),
}

impl MonitorError {
    /// Returns `true` if the drain loop cannot continue.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Io(e) => !matches!(
                e.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
            Self::Ring(_) => true,
        }
    }
}
