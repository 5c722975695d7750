use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use lgr::{DiscardOutput, Level, LevelMap, Logger, SharedOutput};
use std::sync::Arc;
use std::thread;

const ENTRIES: u64 = 10_000;

fn started_logger(capacity: usize) -> Logger {
    let sink: SharedOutput = Arc::new(DiscardOutput);
    let logger = Logger::with_params(Level::Unknown, None, [sink.clone()]);
    logger.set_output_level_prefix(&sink, Some(LevelMap::SHORT_NAMES), ":");
    logger.set_output_time_format(&sink, "%H:%M:%S", " ");
    logger.start(capacity).ok();
    logger
}

fn bench_single_producer(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_producer");
    group.throughput(Throughput::Elements(ENTRIES));
    for capacity in [32, 1024] {
        group.bench_function(format!("capacity_{capacity}"), |b| {
            b.iter_batched(
                || started_logger(capacity),
                |logger| {
                    let client = logger.new_client_default("bench");
                    for _ in 0..ENTRIES {
                        client.info("payload of moderate length for the benchmark");
                    }
                    logger.stop_and_wait();
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

fn bench_four_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("four_producers");
    group.throughput(Throughput::Elements(ENTRIES * 4));
    group.bench_function("capacity_256", |b| {
        b.iter_batched(
            || started_logger(256),
            |logger| {
                thread::scope(|scope| {
                    for p in 0..4 {
                        let client = logger.new_client_default(&format!("p{p}"));
                        scope.spawn(move || {
                            for _ in 0..ENTRIES {
                                client.info("payload");
                            }
                        });
                    }
                });
                logger.stop_and_wait();
            },
            BatchSize::PerIteration,
        );
    });
    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let logger = started_logger(32);
    logger.set_min_level(Level::Error);
    let client = logger.new_client_default("bench");
    c.bench_function("filtered_push", |b| {
        b.iter(|| client.debug("never queued"));
    });
    logger.stop_and_wait();
}

criterion_group!(benches, bench_single_producer, bench_four_producers, bench_filtered);
criterion_main!(benches);
