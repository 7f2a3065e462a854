use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};
use tsid::{
    LockTsidGenerator, NODE_BITS_1024, OsRandom, RandError, RandSource, SystemClock,
    ThreadRandom, TimeSource, Tsid, TsidConfig, TsidGenerator,
};

struct FixedMockTime {
    millis: i64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

struct FixedMockRand;

impl RandSource for FixedMockRand {
    fn try_next_i32(&self) -> Result<i32, RandError> {
        Ok(0)
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn config() -> TsidConfig {
    TsidConfig::default()
        .with_node_bits(NODE_BITS_1024)
        .with_node(1)
}

/// Benchmarks a single caller minting ids back to back.
fn bench_generator<G, T, R>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: TsidGenerator<T, R>,
    T: TimeSource,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.try_next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks a shared generator across threads.
fn bench_generator_contended<G, T, R>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
) where
    G: TsidGenerator<T, R> + Send + Sync,
    T: TimeSource,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(format!("elems/{TOTAL_IDS}/threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = Arc::new(generator_fn());
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = Arc::clone(&generator);
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..ids_per_thread {
                                    black_box(generator.try_next_id().unwrap());
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

fn benchmark_mock_sequential_lock(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/lock", || {
        LockTsidGenerator::try_new(config(), FixedMockTime { millis: 1 }, FixedMockRand).unwrap()
    });
}

fn benchmark_mock_contended_lock(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/lock", || {
        LockTsidGenerator::try_new(config(), FixedMockTime { millis: 1 }, FixedMockRand).unwrap()
    });
}

fn benchmark_system_sequential_thread_random(c: &mut Criterion) {
    bench_generator(c, "system/sequential/thread_random", || {
        LockTsidGenerator::try_new(config(), SystemClock, ThreadRandom).unwrap()
    });
}

fn benchmark_system_sequential_os_random(c: &mut Criterion) {
    bench_generator(c, "system/sequential/os_random", || {
        LockTsidGenerator::try_new(config(), SystemClock, OsRandom).unwrap()
    });
}

fn benchmark_system_contended_thread_random(c: &mut Criterion) {
    bench_generator_contended(c, "system/contended/thread_random", || {
        LockTsidGenerator::try_new(config(), SystemClock, ThreadRandom).unwrap()
    });
}

fn benchmark_base32(c: &mut Criterion) {
    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let id = Tsid::from_raw(2_424_242_424_242_424_242);
    let encoded = id.encode();

    group.bench_function(format!("encode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(black_box(id).encode_to_buf());
            }
        });
    });
    group.bench_function(format!("decode/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(Tsid::decode(black_box(&encoded)).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_lock,
    benchmark_mock_contended_lock,
    // System clock
    benchmark_system_sequential_thread_random,
    benchmark_system_sequential_os_random,
    benchmark_system_contended_thread_random,
    // Text form
    benchmark_base32,
);
criterion_main!(benches);
