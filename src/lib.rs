//! Talaria - Lock-Free Building Blocks untuk Low-Latency Pipelines
//!
//! Dua komponen independen, keduanya bebas lock dan bebas alokasi di hot path:
//! - [`RingBuffer`]: SPSC ring buffer dengan protokol release/acquire
//! - [`ShardedCounter`]: counter per-thread dengan cache-line isolation
//!
//! Prinsip desain:
//! - Lock-Free: Hanya atomic operations, tidak ada Mutex/RwLock
//! - No-Allocation: Semua buffer pre-allocated saat init
//! - Cache-Aware: Index dan shard terisolasi di cache line masing-masing
//!
//! Verifikasi: unit test + proptest untuk invariant FIFO, loom model checking
//! untuk interleaving (`RUSTFLAGS="--cfg loom" cargo test --release`), dan
//! ThreadSanitizer untuk stress test lintas thread.

pub mod core;

pub use crate::core::{CacheLinePadded, RelaxedRingBuffer, RingBuffer, SharedCounter, ShardedCounter};
