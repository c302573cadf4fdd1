//! Debug assertion macros for ring buffer invariants.
//!
//! Only active in debug builds (`#[cfg(debug_assertions)]`), so release builds
//! pay nothing. None of these allocate or format unless they fire, which keeps
//! them usable on the producer path inside a receive callback.

// =============================================================================
// INV-IDX-01: Index Range
// =============================================================================

/// Assert that a wrapped index is a valid slot number.
///
/// **Invariant**: `0 ≤ index < N`
///
/// Used in: `enqueue()` / `dequeue()` after loading either index
macro_rules! debug_assert_index_in_range {
    ($name:literal, $index:expr, $slots:expr) => {
        debug_assert!(
            $index < $slots,
            "INV-IDX-01 violated: {} index {} out of range for {} slots",
            $name,
            $index,
            $slots
        )
    };
}

// =============================================================================
// INV-PUB-01: Published Read
// =============================================================================

/// Assert that the consumer only reads a published slot.
///
/// **Invariant**: a read at `tail` happens only while `tail != head`
///
/// Used in: `drain()` before copying each slot out
macro_rules! debug_assert_published_read {
    ($tail:expr, $head:expr) => {
        debug_assert!(
            $tail != $head,
            "INV-PUB-01 violated: reading unpublished slot {} (head {})",
            $tail,
            $head
        )
    };
}

pub(crate) use debug_assert_index_in_range;
pub(crate) use debug_assert_published_read;
