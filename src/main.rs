//! Talaria - Lock-Free Building Blocks Demo
//!
//! Self-benchmark sederhana (bukan pengganti `cargo bench`):
//! - Ring Buffer: latency push/pop dan throughput lintas thread
//! - Counters: shared atomic vs sharded padded
//!
//! Run: cargo run --release

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use talaria::{RingBuffer, SharedCounter, ShardedCounter};

fn main() {
    println!("🚀 Talaria - Lock-Free SPSC Ring & Sharded Counters");
    println!("===================================================\n");

    benchmark_ring_buffer();
    benchmark_ring_throughput();
    benchmark_counters();

    println!("\n✅ All benchmarks complete!");
}

fn benchmark_ring_buffer() {
    println!("📊 Ring Buffer Benchmark (single thread)");
    println!("----------------------------------------");

    const ITERATIONS: usize = 1_000_000;
    let rb: RingBuffer<u64, 65536> = RingBuffer::new();

    // Warm up
    for i in 0..1000 {
        rb.try_push(i);
    }
    while rb.try_pop().is_some() {}

    // Benchmark push
    let start = Instant::now();
    for i in 0..ITERATIONS {
        if !rb.try_push(i as u64) {
            rb.try_pop();
        }
    }
    let push_duration = start.elapsed();

    // Drain lalu pre-fill untuk benchmark pop
    while rb.try_pop().is_some() {}
    for i in 0..32768 {
        rb.try_push(i);
    }

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        if rb.try_pop().is_none() {
            rb.try_push(0);
        }
    }
    let pop_duration = start.elapsed();

    let push_ns = push_duration.as_nanos() as f64 / ITERATIONS as f64;
    let pop_ns = pop_duration.as_nanos() as f64 / ITERATIONS as f64;

    println!("  Operations: {}", ITERATIONS);
    println!("  Push latency: {:.2} ns/op", push_ns);
    println!("  Pop latency:  {:.2} ns/op", pop_ns);
    println!(
        "  Throughput:   {:.2} M ops/sec\n",
        ITERATIONS as f64 / push_duration.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_ring_throughput() {
    println!("📊 Ring Buffer Benchmark (producer/consumer)");
    println!("--------------------------------------------");

    const ITEMS: usize = 4_000_000;
    let rb: RingBuffer<u32, 16384> = RingBuffer::new();
    let start_flag = AtomicBool::new(false);

    let start = Instant::now();
    let checksum = thread::scope(|s| {
        let producer = s.spawn(|| {
            while !start_flag.load(Ordering::Acquire) {}
            for i in 0..ITEMS {
                while !rb.try_push(i as u32) {
                    thread::yield_now();
                }
            }
        });

        let consumer = s.spawn(|| {
            while !start_flag.load(Ordering::Acquire) {}
            let mut sum = 0u64;
            let mut received = 0;
            while received < ITEMS {
                match rb.try_pop() {
                    Some(v) => {
                        sum += v as u64;
                        received += 1;
                    }
                    None => thread::yield_now(),
                }
            }
            sum
        });

        start_flag.store(true, Ordering::Release);
        producer.join().unwrap();
        consumer.join().unwrap()
    });
    let duration = start.elapsed();

    let expected: u64 = (0..ITEMS as u64).sum();
    assert_eq!(checksum, expected, "checksum mismatch - item hilang/duplikat");

    println!("  Items: {}", ITEMS);
    println!(
        "  Throughput: {:.2} M items/sec\n",
        ITEMS as f64 / duration.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_counters() {
    println!("📊 Counter Benchmark (shared atomic vs sharded)");
    println!("-----------------------------------------------");

    // Total increments konstan supaya perbandingan antar thread count adil
    const TOTAL_INCREMENTS: u64 = 16 * 1024 * 1024;

    for threads in [2usize, 4, 8] {
        let per_thread = TOTAL_INCREMENTS / threads as u64;

        // Baseline: satu atomic dikeroyok semua thread
        let shared = SharedCounter::new();
        let start = Instant::now();
        thread::scope(|s| {
            for _ in 0..threads {
                s.spawn(|| {
                    for _ in 0..per_thread {
                        shared.increment();
                    }
                });
            }
        });
        let shared_duration = start.elapsed();
        assert_eq!(shared.get(), per_thread * threads as u64);

        // Sharded: tiap thread punya cache line sendiri
        let mut sharded = ShardedCounter::new(threads);
        let start = Instant::now();
        thread::scope(|s| {
            let sharded = &sharded;
            for shard_id in 0..threads {
                s.spawn(move || {
                    for _ in 0..per_thread {
                        // SAFETY: satu shard_id unik per thread
                        unsafe { sharded.increment(shard_id) };
                    }
                });
            }
        });
        let sharded_duration = start.elapsed();
        assert_eq!(sharded.reduce(), per_thread * threads as u64);

        let speedup = shared_duration.as_secs_f64() / sharded_duration.as_secs_f64();
        println!(
            "  {} threads: shared {:>7.2} ms | sharded {:>7.2} ms | speedup {:.1}x",
            threads,
            shared_duration.as_secs_f64() * 1000.0,
            sharded_duration.as_secs_f64() * 1000.0,
            speedup
        );
    }
}
