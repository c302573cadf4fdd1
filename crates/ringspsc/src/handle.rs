//! Producer and consumer handles for a split [`BoundedRing`].
//!
//! Each handle is unique (not `Clone`) and its mutating methods take
//! `&mut self`, so the type system enforces one producer and one consumer.
//! Either handle can be moved to another thread.

use crate::error::QueueError;
use crate::ring::BoundedRing;

/// The producer role of a [`BoundedRing`].
///
/// Typically owned by an asynchronous event source such as a receive callback.
/// What to do on a `Full` rejection (drop, count, log later) is up to the
/// owner; nothing here retries.
#[derive(Debug)]
pub struct Producer<'a, T, const N: usize> {
    ring: &'a BoundedRing<T, N>,
}

impl<'a, T, const N: usize> Producer<'a, T, N> {
    pub(crate) fn new(ring: &'a BoundedRing<T, N>) -> Self {
        Self { ring }
    }

    /// Advisory full check; see [`BoundedRing::is_full`].
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Advisory count of values not yet dequeued.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Advisory empty check; see [`BoundedRing::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Number of values the ring can hold at once.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

impl<T: Copy, const N: usize> Producer<'_, T, N> {
    /// Stores a copy of `value`. Returns `false` if the ring was full, in
    /// which case nothing was stored.
    #[inline]
    pub fn enqueue(&mut self, value: T) -> bool {
        // SAFETY: this handle is the only producer; `split` hands it out once
        // and `&mut self` rules out concurrent calls through it.
        unsafe { self.ring.enqueue(value) }
    }

    /// Like [`enqueue`](Self::enqueue), reporting rejection as
    /// [`QueueError::Full`].
    #[inline]
    pub fn try_enqueue(&mut self, value: T) -> Result<(), QueueError> {
        if self.enqueue(value) {
            Ok(())
        } else {
            Err(QueueError::Full)
        }
    }
}

/// The consumer role of a [`BoundedRing`].
///
/// Typically owned by a polling loop that idles and retries on `Empty`.
#[derive(Debug)]
pub struct Consumer<'a, T, const N: usize> {
    ring: &'a BoundedRing<T, N>,
}

impl<'a, T, const N: usize> Consumer<'a, T, N> {
    pub(crate) fn new(ring: &'a BoundedRing<T, N>) -> Self {
        Self { ring }
    }

    /// Advisory empty check; see [`BoundedRing::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Advisory count of values waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }
}

impl<T: Copy, const N: usize> Consumer<'_, T, N> {
    /// Copies the oldest value into `out`. Returns `false` and leaves `out`
    /// unmodified if nothing was waiting.
    #[inline]
    pub fn dequeue(&mut self, out: &mut T) -> bool {
        // SAFETY: this handle is the only consumer.
        unsafe { self.ring.dequeue(out) }
    }

    /// Returns the oldest value, or [`QueueError::Empty`].
    #[inline]
    pub fn try_dequeue(&mut self) -> Result<T, QueueError> {
        self.pop().ok_or(QueueError::Empty)
    }

    /// Returns the oldest value, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let mut out = None;
        // SAFETY: this handle is the only consumer.
        unsafe { self.ring.drain(1, |value| out = Some(value)) };
        out
    }

    /// Hands up to `max` waiting values to `handler` in FIFO order, releasing
    /// their slots with one index update. Returns the number handled.
    #[inline]
    pub fn drain<F>(&mut self, max: usize, handler: F) -> usize
    where
        F: FnMut(T),
    {
        // SAFETY: this handle is the only consumer.
        unsafe { self.ring.drain(max, handler) }
    }
}
