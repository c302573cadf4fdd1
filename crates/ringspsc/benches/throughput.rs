use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringspsc_rs::BoundedRing;
use std::thread;

const MSG_COUNT: u64 = 1_000_000;
const DRAIN_BATCH: usize = 64;

#[derive(Clone, Copy)]
struct Frame {
    _src: [u8; 6],
    _dst: [u8; 6],
    rssi: i8,
}

fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended");
    group.throughput(Throughput::Elements(1));

    group.bench_function("enqueue_dequeue", |b| {
        let ring = BoundedRing::<u64, 128>::new();
        let (mut tx, mut rx) = ring.split().unwrap();
        let mut out = 0u64;
        b.iter(|| {
            tx.enqueue(black_box(7));
            rx.dequeue(&mut out);
            black_box(out);
        });
    });

    group.finish();
}

fn run_spsc<const N: usize>(batched: bool) {
    let ring = BoundedRing::<Frame, N>::new();
    let (mut tx, mut rx) = ring.split().unwrap();

    thread::scope(|s| {
        s.spawn(move || {
            let mut sent = 0u64;
            while sent < MSG_COUNT {
                let frame = Frame {
                    _src: [0; 6],
                    _dst: [1; 6],
                    rssi: (sent % 100) as i8,
                };
                if tx.enqueue(frame) {
                    sent += 1;
                } else {
                    std::hint::spin_loop();
                }
            }
        });

        let mut received = 0u64;
        while received < MSG_COUNT {
            let n = if batched {
                rx.drain(DRAIN_BATCH, |f| {
                    black_box(f.rssi);
                })
            } else {
                usize::from(rx.pop().map(|f| black_box(f.rssi)).is_some())
            };
            if n == 0 {
                std::hint::spin_loop();
            }
            received += n as u64;
        }
    });
}

fn bench_spsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc");
    group.throughput(Throughput::Elements(MSG_COUNT));
    group.sample_size(20);

    for batched in [false, true] {
        let label = if batched { "drain" } else { "pop" };
        group.bench_with_input(BenchmarkId::new("slots_100", label), &batched, |b, &batched| {
            b.iter(|| run_spsc::<100>(batched));
        });
        group.bench_with_input(BenchmarkId::new("slots_4096", label), &batched, |b, &batched| {
            b.iter(|| run_spsc::<4096>(batched));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended, bench_spsc);
criterion_main!(benches);
