//! RingSPSC - Bounded Lock-Free Single-Producer Single-Consumer Queue
//!
//! A fixed-capacity circular buffer for passing small `Copy` messages from an
//! interrupt-style producer (a radio receive callback, a signal handler) to a
//! polling consumer, with no lock and no allocation after construction.
//!
//! # Key Features
//!
//! - `N` slots inline, `N - 1` usable; emptiness and fullness derive from two
//!   indices, never from a shared counter
//! - Each index has a single writer; publication is a Release store paired
//!   with an Acquire load on the other side
//! - `const fn new()`, so the ring can be a `static`
//! - Non-blocking operations with a boolean (or [`QueueError`]) result
//! - Batch consumption with a single index update
//!
//! # Example
//!
//! ```
//! use ringspsc_rs::{BoundedRing, QueueError};
//!
//! let ring = BoundedRing::<u32, 4>::new();
//! let (mut producer, mut consumer) = ring.split().unwrap();
//!
//! assert!(producer.enqueue(1));
//! assert!(producer.enqueue(2));
//! assert!(producer.enqueue(3));
//! assert_eq!(producer.try_enqueue(4), Err(QueueError::Full));
//!
//! let mut out = 0;
//! assert!(consumer.dequeue(&mut out));
//! assert_eq!(out, 1);
//!
//! let drained = consumer.drain(usize::MAX, |v| println!("got {}", v));
//! assert_eq!(drained, 2);
//! ```

mod error;
mod handle;
mod invariants;
mod ring;

pub use error::{QueueError, RingError};
pub use handle::{Consumer, Producer};
pub use ring::BoundedRing;
