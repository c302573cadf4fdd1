//! Simulated RSSI monitor.
//!
//! A background thread plays the radio: it fires receive callbacks in bursts
//! for a few targets, seen by a few monitors. The main thread drains the queue
//! and prints report lines to stdout. Bursts are sized so that the queue
//! overflows now and then, which shows up as a warning on stderr.
//!
//! Run with: `RUST_LOG=info cargo run -p rssi-monitor --bin demo`

use log::info;
use rand::Rng;
use rssi_monitor::{LineSink, MacAddr, Monitor, MonitorConfig};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const RUN_FOR: Duration = Duration::from_secs(2);
const SLOTS: usize = 16;

const MONITORS: [MacAddr; 3] = [
    MacAddr::from_u64(0x0000_0000_0001),
    MacAddr::from_u64(0x0000_0000_0004),
    MacAddr::from_u64(0x0000_0000_0005),
];
const TARGETS: [MacAddr; 2] = [
    MacAddr::from_u64(0x342e_b61e_c446),
    MacAddr::from_u64(0x1000_0000_0000),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MonitorConfig::default()
        .with_park_interval(Duration::from_millis(5))
        .with_drain_batch(8);
    let monitor: Monitor<SLOTS> = Monitor::new(config);
    let stop = AtomicBool::new(false);

    info!("simulating radio for {:?}, queue capacity {}", RUN_FOR, monitor.capacity());

    let (mut tap, mut drain) = monitor.split()?;

    let stats = thread::scope(|s| {
        s.spawn(|| {
            let mut rng = rand::thread_rng();
            let started = Instant::now();
            while started.elapsed() < RUN_FOR {
                let burst = rng.gen_range(1..=SLOTS * 2);
                for _ in 0..burst {
                    let monitor = MONITORS[rng.gen_range(0..MONITORS.len())];
                    let target = TARGETS[rng.gen_range(0..TARGETS.len())];
                    tap.on_receive(monitor, target, rng.gen_range(-90..=-35));
                }
                thread::sleep(Duration::from_millis(rng.gen_range(5..40)));
            }
            stop.store(true, Ordering::Release);
        });

        let mut sink = LineSink::new(io::stdout().lock());
        drain.run(&mut sink, &stop)
    })?;

    info!(
        "done: {} delivered, {} dropped ({:.1}% drop rate)",
        stats.delivered,
        stats.dropped,
        stats.drop_rate() * 100.0
    );
    Ok(())
}
