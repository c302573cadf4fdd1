//! RSSI report payload and its serial line format.
//!
//! A monitor node sniffs a frame from a target and pushes one report per
//! frame. Reports travel to the host as text lines:
//!
//! ```text
//! <monitor mac>_<target mac>:<rssi>
//! 342eb61ec446_000000000001:-57
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 48-bit hardware address, rendered as 12 lowercase hex digits with no
/// separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Builds an address from the low 48 bits of `value`.
    pub const fn from_u64(value: u64) -> Self {
        let b = value.to_be_bytes();
        Self([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for MacAddr {
    type Err = ParseReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 12 || !s.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseReportError::InvalidMac(s.to_string()));
        }
        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ParseReportError::InvalidMac(s.to_string()))?;
        }
        Ok(Self(octets))
    }
}

/// One received-signal-strength observation.
///
/// Fixed size and `Copy`, so it can be queued by value from a receive
/// callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RssiReport {
    /// Node that observed the frame.
    pub monitor: MacAddr,
    /// Sender of the observed frame.
    pub target: MacAddr,
    /// Signal strength in dBm.
    pub rssi: i8,
}

impl RssiReport {
    pub const fn new(monitor: MacAddr, target: MacAddr, rssi: i8) -> Self {
        Self {
            monitor,
            target,
            rssi,
        }
    }
}

impl fmt::Display for RssiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}:{}", self.monitor, self.target, self.rssi)
    }
}

impl FromStr for RssiReport {
    type Err = ParseReportError;

    /// Parses a report line. Surrounding whitespace (such as a trailing
    /// `\r\n`) is ignored. A fractional RSSI is accepted and truncated toward
    /// zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (macs, rssi) = line
            .split_once(':')
            .ok_or_else(|| ParseReportError::MissingSeparator(':', line.to_string()))?;
        let (monitor, target) = macs
            .split_once('_')
            .ok_or_else(|| ParseReportError::MissingSeparator('_', line.to_string()))?;

        Ok(Self {
            monitor: monitor.parse()?,
            target: target.parse()?,
            rssi: parse_rssi(rssi)?,
        })
    }
}

fn parse_rssi(s: &str) -> Result<i8, ParseReportError> {
    let invalid = || ParseReportError::InvalidRssi(s.to_string());

    let whole = match s.split_once('.') {
        Some((whole, frac)) => {
            if !frac.bytes().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            whole
        }
        None => s,
    };
    let digits = whole.strip_prefix('-').unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    whole.parse::<i8>().map_err(|_| invalid())
}

/// Errors from parsing a report line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseReportError {
    #[error("missing '{0}' separator in {1:?}")]
    MissingSeparator(char, String),

    #[error("invalid MAC address {0:?} (expected 12 hex digits)")]
    InvalidMac(String),

    #[error("invalid RSSI {0:?}")]
    InvalidRssi(String),
}
