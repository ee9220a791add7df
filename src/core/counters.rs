//! Sharded Counter Aggregator - akumulasi per-thread tanpa coherence traffic
//!
//! N thread masing-masing meng-increment shard miliknya sendiri (non-atomic,
//! tanpa sinkronisasi), lalu satu reducer menjumlahkan semua shard setelah
//! semua thread join. Thread-join sendiri sudah merupakan happens-before
//! edge, jadi reduksi cukup pakai plain read.
//!
//! Setiap shard di-pad ke satu cache line penuh supaya increment dua thread
//! tidak pernah invalidate cache line yang sama (false sharing).
//!
//! [`SharedCounter`] adalah baseline pembanding untuk benchmark: satu
//! atomic counter yang dikeroyok semua thread.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::padding::CacheLinePadded;
use crate::core::UnsafeCell;

/// Counter ter-shard per thread.
///
/// # Protokol kepemilikan
///
/// - Fase akumulasi: setiap shard dimiliki eksklusif oleh satu thread;
///   hanya thread itu yang boleh memanggil [`increment`](Self::increment)
///   dengan `shard_id` miliknya.
/// - Fase reduksi: [`reduce`](Self::reduce) menerima `&mut self`, jadi
///   borrow checker baru mengizinkannya setelah semua borrow thread pekerja
///   berakhir - dengan `std::thread::scope`, itu berarti setelah join.
pub struct ShardedCounter {
    shards: Box<[CacheLinePadded<UnsafeCell<u64>>]>,
}

// SAFETY: akses shard dipartisi oleh kontrak increment (satu thread per
// shard, ditegakkan caller lewat `unsafe`), dan reduce butuh `&mut self`
// yang menjamin tidak ada increment yang masih berjalan.
unsafe impl Send for ShardedCounter {}
unsafe impl Sync for ShardedCounter {}

impl ShardedCounter {
    /// Membuat counter dengan `num_shards` shard, semua nol.
    ///
    /// # Panics
    /// Panic jika `num_shards == 0`
    pub fn new(num_shards: usize) -> Self {
        assert!(num_shards > 0, "num_shards must be > 0");

        let mut shards = Vec::with_capacity(num_shards);
        for _ in 0..num_shards {
            shards.push(CacheLinePadded::new(UnsafeCell::new(0u64)));
        }

        Self {
            shards: shards.into_boxed_slice(),
        }
    }

    /// Increment non-atomic pada shard `shard_id`.
    ///
    /// Tidak ada instruksi atomic di sini - itulah seluruh poinnya.
    ///
    /// # Safety
    ///
    /// Hanya thread pemilik shard yang boleh memanggil ini, dan setiap
    /// shard punya tepat satu pemilik selama fase akumulasi. Dipanggil
    /// dari thread lain = data race (undefined behavior).
    ///
    /// # Panics
    /// Panic jika `shard_id` di luar range (bounds check slice biasa).
    #[inline(always)]
    pub unsafe fn increment(&self, shard_id: usize) {
        self.shards[shard_id].value.with_mut(|shard| unsafe {
            *shard += 1;
        });
    }

    /// Menjumlahkan semua shard dengan plain read.
    ///
    /// `&mut self` meng-encode prasyarat "semua thread pekerja sudah join"
    /// ke type system: selama masih ada `&self` dipinjam thread lain,
    /// panggilan ini tidak akan compile.
    pub fn reduce(&mut self) -> u64 {
        let mut total = 0u64;
        for shard in self.shards.iter() {
            // SAFETY: &mut self menjamin tidak ada akses shard lain yang
            // masih hidup; join thread pekerja sudah memberi hb edge.
            total += shard.value.with(|shard| unsafe { *shard });
        }
        total
    }

    /// Jumlah shard
    #[inline(always)]
    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }
}

/// Baseline pembanding: satu counter atomic yang di-share semua thread.
///
/// Setiap increment adalah RMW pada satu cache line yang sama - inilah
/// coherence traffic yang dihindari [`ShardedCounter`]. Tidak ada kontrak
/// ordering selain semantik fetch_add biasa.
pub struct SharedCounter {
    value: CacheLinePadded<AtomicU64>,
}

impl Default for SharedCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCounter {
    pub fn new() -> Self {
        Self {
            value: CacheLinePadded::new(AtomicU64::new(0)),
        }
    }

    /// Increment atomic; boleh dari thread mana pun.
    #[inline(always)]
    pub fn increment(&self) {
        self.value.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Nilai saat ini
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.value.value.load(Ordering::Relaxed)
    }
}
