//! Core module: Lock-Free SPSC Ring Buffer dan Sharded Counters
//!
//! Prinsip desain:
//! - Lock-Free: Hanya atomic operations, tidak ada Mutex/RwLock
//! - No-Allocation: Semua storage pre-allocated saat init
//! - Cache Isolation: Producer dan consumer tidak pernah invalidate
//!   cache line yang sama
//!
//! Modul `relaxed` berisi varian yang SENGAJA salah (semua Relaxed ordering)
//! sebagai referensi negatif untuk race detector. Jangan dipakai di produksi.

mod cell;
mod counters;
mod padding;
mod relaxed;
mod ring_buffer;

pub(crate) use cell::UnsafeCell;
pub use counters::{SharedCounter, ShardedCounter};
pub use padding::{CacheLinePadded, CACHE_LINE_SIZE};
pub use relaxed::RelaxedRingBuffer;
pub use ring_buffer::RingBuffer;
