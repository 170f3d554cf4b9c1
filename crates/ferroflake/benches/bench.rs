use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use ferroflake::{FlakeId, Settings, Sonyflake, TimeSource};
use std::{sync::Barrier, thread::scope, time::Instant};

const START: Duration = Duration::from_secs(1_800_000_000);

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 256;

/// Never advances on its own and never sleeps, so every call is served from
/// the lock and the sequence counter.
struct FrozenTime;

impl TimeSource for FrozenTime {
    fn now(&self) -> Duration {
        START
    }

    fn sleep(&self, _: Duration) {}
}

fn settings() -> Settings {
    Settings::default()
        .with_start_time(START - Duration::from_secs(60))
        .with_machine_id(|| Ok(1))
}

/// Benchmarks the hot path where the compensating sleep is a no-op.
fn bench_frozen(c: &mut Criterion) {
    let mut group = c.benchmark_group("sonyflake/frozen");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator = Sonyflake::with_clock(settings(), FrozenTime).unwrap();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks the system clock including real compensating sleeps.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("sonyflake/system");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator = Sonyflake::new(
            Settings::default()
                .with_time_unit(Duration::from_millis(1))
                .with_machine_id(|| Ok(1)),
        )
        .unwrap();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks contention on a single generator shared by every core.
fn bench_contended(c: &mut Criterion) {
    let threads = num_cpus::get();
    let mut group = c.benchmark_group(format!("sonyflake/contended/{threads}"));
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = Sonyflake::with_clock(settings(), FrozenTime).unwrap();
            let barrier = Barrier::new(threads + 1);

            // The scope joins every worker before returning the start instant.
            let start = scope(|s| {
                for _ in 0..threads {
                    s.spawn(|| {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id().unwrap());
                            }
                        }
                    });
                }
                barrier.wait();
                Instant::now()
            });

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let generator = Sonyflake::with_clock(settings(), FrozenTime).unwrap();
    let mut group = c.benchmark_group("codec");

    group.bench_function("compose", |b| {
        b.iter(|| generator.compose(black_box(START), black_box(17), black_box(1)));
    });
    group.bench_function("decompose", |b| {
        let id = FlakeId::from_raw(1_677_721_727);
        b.iter(|| generator.decompose(black_box(id)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_frozen,
    bench_system_clock,
    bench_contended,
    bench_codec
);
criterion_main!(benches);
