//! Criterion benchmark untuk Ring Buffer dan Counters
//!
//! Run dengan: cargo bench

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use talaria::{RingBuffer, SharedCounter, ShardedCounter};

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer");
    group.throughput(Throughput::Elements(1));

    // Benchmark push
    group.bench_function("try_push", |b| {
        let rb: RingBuffer<u64, 65536> = RingBuffer::new();
        let mut i = 0u64;
        b.iter(|| {
            if !rb.try_push(black_box(i)) {
                rb.try_pop();
                rb.try_push(black_box(i));
            }
            i = i.wrapping_add(1);
        });
    });

    // Benchmark pop
    group.bench_function("try_pop", |b| {
        let rb: RingBuffer<u64, 65536> = RingBuffer::new();
        // Pre-fill
        for i in 0..32768 {
            rb.try_push(i);
        }
        b.iter(|| {
            if let Some(v) = rb.try_pop() {
                rb.try_push(black_box(v));
            }
        });
    });

    // Benchmark push+pop cycle
    group.bench_function("push_pop_cycle", |b| {
        let rb: RingBuffer<u64, 65536> = RingBuffer::new();
        let mut i = 0u64;
        b.iter(|| {
            rb.try_push(black_box(i));
            let _ = rb.try_pop();
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for batch_size in [8usize, 64, 1024].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_function(format!("push_pop_many_{}", batch_size), |b| {
            let rb: RingBuffer<u64, 65536> = RingBuffer::new();
            let values: Vec<u64> = (0..*batch_size as u64).collect();
            let mut out = vec![0u64; *batch_size];
            b.iter(|| {
                black_box(rb.push_many(black_box(&values)));
                black_box(rb.pop_many(black_box(&mut out)));
            });
        });
    }

    group.finish();
}

fn bench_spsc_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc_throughput");
    group.sample_size(10);

    for items in [1usize << 20, 4 << 20].iter() {
        group.throughput(Throughput::Elements(*items as u64));
        group.bench_function(format!("producer_consumer_{}", items), |b| {
            b.iter(|| {
                let rb: RingBuffer<u32, 16384> = RingBuffer::new();
                let start_flag = AtomicBool::new(false);
                let items = *items;

                let checksum = thread::scope(|s| {
                    let producer = s.spawn(|| {
                        // Busy-wait supaya kedua thread mulai bersamaan
                        while !start_flag.load(Ordering::Acquire) {}
                        let mut i = 0;
                        while i < items {
                            // Batch kecil untuk amortisasi yield
                            for _ in 0..8 {
                                if i >= items || !rb.try_push(i as u32) {
                                    break;
                                }
                                i += 1;
                            }
                            if i < items {
                                thread::yield_now();
                            }
                        }
                    });

                    let consumer = s.spawn(|| {
                        while !start_flag.load(Ordering::Acquire) {}
                        let mut sum = 0u64;
                        let mut received = 0;
                        while received < items {
                            for _ in 0..8 {
                                match rb.try_pop() {
                                    Some(v) => {
                                        sum += v as u64;
                                        received += 1;
                                    }
                                    None => break,
                                }
                            }
                            if received < items {
                                thread::yield_now();
                            }
                        }
                        sum
                    });

                    start_flag.store(true, Ordering::Release);
                    producer.join().unwrap();
                    consumer.join().unwrap()
                });

                black_box(checksum);
            });
        });
    }

    group.finish();
}

fn bench_counters(c: &mut Criterion) {
    let mut group = c.benchmark_group("counters");
    group.sample_size(10);

    // Total increments konstan di semua thread count
    const TOTAL_INCREMENTS: u64 = 1 << 22;

    for threads in [2usize, 4, 8].iter() {
        let per_thread = TOTAL_INCREMENTS / *threads as u64;
        group.throughput(Throughput::Elements(TOTAL_INCREMENTS));

        group.bench_function(format!("shared_atomic_{}", threads), |b| {
            b.iter(|| {
                let counter = SharedCounter::new();
                thread::scope(|s| {
                    for _ in 0..*threads {
                        s.spawn(|| {
                            for _ in 0..per_thread {
                                counter.increment();
                            }
                        });
                    }
                });
                black_box(counter.get());
            });
        });

        group.bench_function(format!("sharded_padded_{}", threads), |b| {
            b.iter(|| {
                let mut counter = ShardedCounter::new(*threads);
                thread::scope(|s| {
                    let counter = &counter;
                    for shard_id in 0..*threads {
                        s.spawn(move || {
                            for _ in 0..per_thread {
                                // SAFETY: satu shard_id unik per thread
                                unsafe { counter.increment(shard_id) };
                            }
                        });
                    }
                });
                black_box(counter.reduce());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_pop,
    bench_batch,
    bench_spsc_throughput,
    bench_counters
);
criterion_main!(benches);
