//! Error types for ring operations.

use thiserror::Error;

/// Rejection of a single queue operation.
///
/// Neither variant loses data already in the ring: `Full` means the new value
/// was not accepted, `Empty` means nothing was read. Both are recoverable, and
/// retry policy belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Every usable slot holds an unread value.
    #[error("queue is full")]
    Full,

    /// No published value is waiting.
    #[error("queue is empty")]
    Empty,
}

impl QueueError {
    /// Returns `true` for the producer-side rejection.
    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Returns `true` for the consumer-side rejection.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Errors from handing out the producer and consumer roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// `split()` was already called on this ring.
    #[error("ring has already been split into producer and consumer")]
    AlreadySplit,
}
