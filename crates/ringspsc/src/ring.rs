//! Fixed-capacity SPSC ring buffer with inline storage.
//!
//! [`BoundedRing<T, N>`] holds `N` slots and stores at most `N - 1` values:
//! one slot always stays empty so that "empty" (`head == tail`) and "full"
//! (`head + 1 == tail`, modulo `N`) can be told apart with two indices and no
//! shared counter.
//!
//! # Ownership of the indices
//!
//! ```text
//!            producer writes            consumer writes
//!                 │                           │
//!   head: CachePadded<AtomicUsize>   tail: CachePadded<AtomicUsize>
//!                 │                           │
//!   ┌───┬───┬───┬─▼─┬───┬───┬───┬───┬───┬───┬─▼─┬───┐
//!   │   │   │   │ w │   │   │   │   │   │   │ r │ ● │  buffer: [_; N]
//!   └───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴───┴───┘
//!                 next write                  next read
//! ```
//!
//! Each index has exactly one writer. The producer publishes a slot with a
//! Release store of `head` after writing the payload; the consumer observes it
//! with an Acquire load of `head` before reading. The same pairing runs the
//! other way on `tail`, so the producer never overwrites a slot the consumer is
//! still copying out.
//!
//! # Usage
//!
//! ```
//! use ringspsc_rs::BoundedRing;
//!
//! static QUEUE: BoundedRing<u32, 8> = BoundedRing::new();
//!
//! let (mut tx, mut rx) = QUEUE.split().unwrap();
//! assert!(tx.enqueue(7));
//!
//! let mut out = 0;
//! assert!(rx.dequeue(&mut out));
//! assert_eq!(out, 7);
//! ```

use crate::error::RingError;
use crate::handle::{Consumer, Producer};
use crate::invariants::{debug_assert_index_in_range, debug_assert_published_read};

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A lock-free single-producer single-consumer queue of `N - 1` values.
///
/// `T` is stored by value and copied in and out, so producer and consumer never
/// share a payload. All operations complete immediately; there is no blocking,
/// retry or allocation, which makes [`enqueue`](Self::enqueue) usable from an
/// interrupt or signal handler.
///
/// The safe entry point is [`split`](Self::split). The raw `enqueue`/`dequeue`
/// methods are `unsafe` because nothing stops two threads from calling them
/// concurrently, which would break the single-writer rule for an index.
pub struct BoundedRing<T, const N: usize> {
    /// Next slot the producer will write. Written only by the producer.
    head: CachePadded<AtomicUsize>,
    /// Next slot the consumer will read. Written only by the consumer.
    tail: CachePadded<AtomicUsize>,
    /// Set once the producer/consumer handles have been handed out.
    split: AtomicBool,
    buffer: [UnsafeCell<MaybeUninit<T>>; N],
}

// Safety: the slot a producer writes is never the slot the consumer reads (the
// full check keeps them apart), and each index has a single writer. Values
// cross threads by copy, which needs `T: Send`.
unsafe impl<T: Send, const N: usize> Sync for BoundedRing<T, N> {}

impl<T, const N: usize> BoundedRing<T, N> {
    /// Fails to compile for `N < 2`: `N == 0` has no modulus and `N == 1`
    /// would be permanently full.
    const ASSERT_SLOTS: () = assert!(N >= 2, "BoundedRing needs at least 2 slots");

    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY_SLOT: UnsafeCell<MaybeUninit<T>> = UnsafeCell::new(MaybeUninit::uninit());

    /// Creates an empty ring with `head = tail = 0`.
    ///
    /// `const`, so a ring can live in a `static` shared between an interrupt
    /// handler and the main loop.
    pub const fn new() -> Self {
        let () = Self::ASSERT_SLOTS;

        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            split: AtomicBool::new(false),
            buffer: [Self::EMPTY_SLOT; N],
        }
    }

    /// Number of values the ring can hold at once (`N - 1`).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of physical slots (`N`).
    #[inline]
    pub const fn slots(&self) -> usize {
        N
    }

    /// Advisory: `true` if no value was waiting when the indices were read.
    ///
    /// The answer may be stale by the time the caller acts on it. Only the
    /// result of `enqueue`/`dequeue` is authoritative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Relaxed) == self.tail.load(Ordering::Relaxed)
    }

    /// Advisory: `true` if every usable slot was occupied when the indices
    /// were read. Checking this and then enqueueing is not atomic.
    #[inline]
    pub fn is_full(&self) -> bool {
        Self::next(self.head.load(Ordering::Relaxed)) == self.tail.load(Ordering::Relaxed)
    }

    /// Advisory count of waiting values, in `0..=N-1`.
    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + N - tail) % N
    }

    /// Returns `true` once [`split`](Self::split) has handed out the handles.
    #[inline]
    pub fn is_split(&self) -> bool {
        self.split.load(Ordering::Acquire)
    }

    /// Hands out the producer and consumer roles.
    ///
    /// Succeeds exactly once per ring; later calls return
    /// [`RingError::AlreadySplit`]. The handles borrow the ring, so for a
    /// `static` ring they are `'static` and can move to other threads.
    pub fn split(&self) -> Result<(Producer<'_, T, N>, Consumer<'_, T, N>), RingError> {
        if self.split.swap(true, Ordering::AcqRel) {
            return Err(RingError::AlreadySplit);
        }
        Ok((Producer::new(self), Consumer::new(self)))
    }

    /// `(index + 1) mod N` without a division.
    #[inline]
    const fn next(index: usize) -> usize {
        if index + 1 == N {
            0
        } else {
            index + 1
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> *mut MaybeUninit<T> {
        self.buffer[index].get()
    }
}

impl<T: Copy, const N: usize> BoundedRing<T, N> {
    // =========================================================================
    // PRODUCER API
    // =========================================================================

    /// Stores a copy of `value` and publishes it.
    ///
    /// Returns `false` without storing anything when the ring is full. Never
    /// overwrites, blocks or retries.
    ///
    /// # Safety
    ///
    /// At most one thread (or interrupt context) may act as producer at a time.
    #[inline]
    pub unsafe fn enqueue(&self, value: T) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        debug_assert_index_in_range!("head", head, N);

        let next = Self::next(head);
        // Acquire pairs with the consumer's Release of `tail`: once we see the
        // slot vacated, the consumer's copy out of it has completed.
        if next == self.tail.load(Ordering::Acquire) {
            return false;
        }

        // SAFETY: slot `head` is outside the published range [tail, head), so
        // the consumer does not touch it until `head` advances below.
        self.slot(head).write(MaybeUninit::new(value));

        // Store-then-publish: the payload write happens-before this store.
        self.head.store(next, Ordering::Release);
        true
    }

    // =========================================================================
    // CONSUMER API
    // =========================================================================

    /// Copies the oldest value into `out` and releases its slot.
    ///
    /// Returns `false` and leaves `out` untouched when the ring is empty.
    ///
    /// # Safety
    ///
    /// At most one thread may act as consumer at a time.
    #[inline]
    pub unsafe fn dequeue(&self, out: &mut T) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        debug_assert_index_in_range!("tail", tail, N);

        // Acquire pairs with the producer's Release of `head`.
        let head = self.head.load(Ordering::Acquire);
        if head == tail {
            return false;
        }

        // SAFETY: `tail != head`, so slot `tail` was written and published.
        *out = self.slot(tail).read().assume_init();

        self.tail.store(Self::next(tail), Ordering::Release);
        true
    }

    /// Copies out up to `max` values in FIFO order, then releases all their
    /// slots with a single `tail` update.
    ///
    /// Returns how many values were handed to `handler`.
    ///
    /// # Safety
    ///
    /// At most one thread may act as consumer at a time.
    pub unsafe fn drain<F>(&self, max: usize, mut handler: F) -> usize
    where
        F: FnMut(T),
    {
        let start = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        debug_assert_index_in_range!("head", head, N);

        let mut pos = start;
        let mut taken = 0;
        while taken < max && pos != head {
            debug_assert_published_read!(pos, head);
            handler(self.slot(pos).read().assume_init());
            pos = Self::next(pos);
            taken += 1;
        }

        if taken > 0 {
            self.tail.store(pos, Ordering::Release);
        }
        taken
    }
}

impl<T, const N: usize> Default for BoundedRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BoundedRing<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedRing")
            .field("head", &self.head.load(Ordering::Relaxed))
            .field("tail", &self.tail.load(Ordering::Relaxed))
            .field("capacity", &self.capacity())
            .field("split", &self.is_split())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
