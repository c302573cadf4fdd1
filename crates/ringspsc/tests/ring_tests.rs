//! Integration tests for BoundedRing
//!
//! Single-threaded contract checks (FIFO, capacity, empty, idempotent
//! rejection) followed by threaded stress tests with a real producer and
//! consumer running in parallel.

use ringspsc_rs::{BoundedRing, QueueError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Spins on a miss, then yields once misses pile up so a starved peer on a
/// loaded machine still gets scheduled. `misses` resets on progress.
fn wait_turn(misses: &mut u32) {
    *misses += 1;
    if *misses > 64 {
        thread::yield_now();
    } else {
        std::hint::spin_loop();
    }
}

/// The n-th successful dequeue returns the n-th successfully enqueued value.
#[test]
fn test_fifo_single_thread() {
    let ring: BoundedRing<u32, 8> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    let mut accepted = Vec::new();
    let mut received = Vec::new();

    for round in 0..50u32 {
        // Push more than fits so some values are rejected.
        for i in 0..5 {
            let v = round * 10 + i;
            if tx.enqueue(v) {
                accepted.push(v);
            }
        }
        // Take back fewer than pushed on even rounds.
        let take = if round % 2 == 0 { 2 } else { 8 };
        for _ in 0..take {
            if let Some(v) = rx.pop() {
                received.push(v);
            }
        }
    }
    while let Some(v) = rx.pop() {
        received.push(v);
    }

    assert_eq!(received, accepted);
}

/// Exactly N-1 enqueues succeed from empty; the N-th is rejected and the
/// earlier contents are intact.
#[test]
fn test_capacity_is_n_minus_one() {
    let ring: BoundedRing<u64, 100> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    for i in 0..99 {
        assert!(tx.enqueue(i), "enqueue {} should succeed", i);
    }
    assert_eq!(tx.try_enqueue(99), Err(QueueError::Full));

    let mut values = Vec::new();
    rx.drain(usize::MAX, |v| values.push(v));
    assert_eq!(values, (0..99).collect::<Vec<_>>());
}

/// Dequeue on a fresh or drained ring fails and leaves the output alone.
#[test]
fn test_empty_does_not_touch_output() {
    let ring: BoundedRing<[u8; 4], 4> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    let mut out = [7u8; 4];
    assert!(!rx.dequeue(&mut out));
    assert_eq!(out, [7; 4]);

    assert!(tx.enqueue([1, 2, 3, 4]));
    assert!(rx.dequeue(&mut out));
    assert_eq!(out, [1, 2, 3, 4]);

    // Drained back to head == tail.
    assert!(!rx.dequeue(&mut out));
    assert_eq!(out, [1, 2, 3, 4]);
}

/// Enqueue followed by dequeue on an empty ring yields the same value.
#[test]
fn test_enqueue_then_dequeue_returns_value() {
    let ring: BoundedRing<i64, 2> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    for x in [i64::MIN, -1, 0, 1, i64::MAX] {
        assert!(tx.enqueue(x));
        assert_eq!(rx.pop(), Some(x));
    }
}

/// Repeated rejections on a full or empty ring have no side effects.
#[test]
fn test_repeated_rejections_are_idempotent() {
    let ring: BoundedRing<u16, 4> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    for _ in 0..10 {
        assert_eq!(rx.try_dequeue(), Err(QueueError::Empty));
    }
    assert!(rx.is_empty());

    for v in 1..=3 {
        assert!(tx.enqueue(v));
    }
    for v in 100..110 {
        assert!(!tx.enqueue(v));
    }
    assert_eq!(tx.len(), 3);

    assert_eq!(rx.pop(), Some(1));
    assert_eq!(rx.pop(), Some(2));
    assert_eq!(rx.pop(), Some(3));
    assert_eq!(rx.pop(), None);
}

/// N = 4: fill, reject, free one, refill, drain in order.
#[test]
fn test_four_slot_walkthrough() {
    let ring: BoundedRing<u32, 4> = BoundedRing::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    assert!(tx.enqueue(1));
    assert!(tx.enqueue(2));
    assert!(tx.enqueue(3));
    assert!(!tx.enqueue(4));

    assert_eq!(rx.pop(), Some(1));
    assert!(tx.enqueue(4));

    assert_eq!(rx.pop(), Some(2));
    assert_eq!(rx.pop(), Some(3));
    assert_eq!(rx.pop(), Some(4));
    assert_eq!(rx.try_dequeue(), Err(QueueError::Empty));
}

/// Producer streams 0..M while the consumer records; the record must be the
/// exact strictly increasing sequence with no gaps or duplicates.
#[test]
fn test_spsc_stress_sequence() {
    const M: u64 = 1_000_000;
    static RING: BoundedRing<u64, 100> = BoundedRing::new();

    let (mut tx, mut rx) = RING.split().unwrap();

    let producer = thread::spawn(move || {
        let mut rejected = 0u64;
        for i in 0..M {
            let mut misses = 0;
            while !tx.enqueue(i) {
                rejected += 1;
                wait_turn(&mut misses);
            }
        }
        rejected
    });

    let consumer = thread::spawn(move || {
        let mut recorded = Vec::with_capacity(M as usize);
        let mut out = 0u64;
        let mut misses = 0;
        while (recorded.len() as u64) < M {
            if rx.dequeue(&mut out) {
                recorded.push(out);
                misses = 0;
            } else {
                wait_turn(&mut misses);
            }
        }
        recorded
    });

    producer.join().unwrap();
    let recorded = consumer.join().unwrap();

    assert_eq!(recorded.len() as u64, M);
    for (expected, got) in recorded.iter().enumerate() {
        assert_eq!(*got, expected as u64, "gap or duplicate at position {}", expected);
    }
}

/// The consumer stops early while the producer is still running; whatever it
/// recorded must be a prefix of the produced sequence.
#[test]
fn test_spsc_prefix_when_consumer_stops() {
    let ring = BoundedRing::<u32, 16>::new();
    let stop = AtomicBool::new(false);
    let (mut tx, mut rx) = ring.split().unwrap();

    let recorded = thread::scope(|s| {
        s.spawn(|| {
            let mut next = 0u32;
            let mut misses = 0;
            while !stop.load(Ordering::Relaxed) {
                if tx.enqueue(next) {
                    next += 1;
                    misses = 0;
                } else {
                    wait_turn(&mut misses);
                }
            }
        });

        let consumer = s.spawn(|| {
            let mut recorded = Vec::new();
            let mut misses = 0;
            while recorded.len() < 50_000 {
                if let Some(v) = rx.pop() {
                    recorded.push(v);
                    misses = 0;
                } else {
                    wait_turn(&mut misses);
                }
            }
            stop.store(true, Ordering::Relaxed);
            recorded
        });

        consumer.join().unwrap()
    });

    assert_eq!(recorded.len(), 50_000);
    assert!(recorded.iter().enumerate().all(|(i, v)| *v == i as u32));
}

/// Batch draining under concurrency preserves order.
#[test]
fn test_spsc_batch_drain_order() {
    const M: u32 = 200_000;
    static RING: BoundedRing<u32, 64> = BoundedRing::new();
    let (mut tx, mut rx) = RING.split().unwrap();

    let producer = thread::spawn(move || {
        for i in 0..M {
            let mut misses = 0;
            while !tx.enqueue(i) {
                wait_turn(&mut misses);
            }
        }
    });

    let mut expected = 0u32;
    let mut violations = 0u32;
    let mut misses = 0;
    while expected < M {
        let n = rx.drain(17, |v| {
            if v != expected {
                violations += 1;
            }
            expected += 1;
        });
        if n == 0 {
            wait_turn(&mut misses);
        } else {
            misses = 0;
        }
    }

    producer.join().unwrap();
    assert_eq!(violations, 0, "FIFO order violated");
}
