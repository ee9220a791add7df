//! Lock-Free Single-Producer Single-Consumer (SPSC) Ring Buffer
//!
//! Implementasi Lamport queue dengan memory ordering yang tepat.
//! Tidak ada Mutex, tidak ada alokasi setelah inisialisasi.
//!
//! Protokol per elemen:
//! - Producer: tulis slot, lalu publish head dengan store Release
//! - Consumer: load head dengan Acquire, lalu baca slot
//!
//! Satu pasangan release/acquire per elemen adalah satu-satunya
//! happens-before edge lintas thread; tidak ada total order SeqCst.
//!
//! Index disimpan sudah di-mask ke `[0, N)`. Kondisi penuh adalah
//! `(head + 1) & mask == tail`, jadi satu slot dikorbankan untuk
//! membedakan penuh dari kosong: kapasitas efektif `N - 1`.

use std::mem::MaybeUninit;

#[cfg(not(loom))]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicUsize, Ordering};

use crate::core::padding::CacheLinePadded;
use crate::core::UnsafeCell;

/// Slot dalam ring buffer - payload ditulis non-atomic, dilindungi
/// oleh protokol index.
struct Slot<T> {
    data: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            data: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }
}

/// Lock-Free SPSC Ring Buffer
///
/// Head hanya ditulis producer, tail hanya ditulis consumer; masing-masing
/// di cache line sendiri untuk menghindari false sharing.
///
/// # Kontrak thread
///
/// Tepat satu thread producer memanggil [`try_push`](Self::try_push)/
/// [`push_many`](Self::push_many), dan tepat satu thread consumer memanggil
/// [`try_pop`](Self::try_pop)/[`pop_many`](Self::pop_many). Pelanggaran
/// kontrak ini adalah data race (undefined behavior) dan tidak dideteksi
/// runtime - mendeteksinya butuh sinkronisasi yang justru dihindari
/// struktur ini.
#[repr(C)]
pub struct RingBuffer<T, const N: usize> {
    // Producer side - cache line aligned
    head: CacheLinePadded<AtomicUsize>,
    // Consumer side - cache line aligned
    tail: CacheLinePadded<AtomicUsize>,
    // Pre-allocated buffer di heap - tidak ada alokasi setelah init
    buffer: Box<[Slot<T>]>,
    // Mask untuk operasi modulo yang cepat (N harus power of 2)
    mask: usize,
}

// SAFETY: RingBuffer aman untuk Send/Sync karena:
// - Hanya satu producer (menulis head), hanya satu consumer (menulis tail)
// - Slot hanya ditulis producer sebelum publish head, hanya dibaca consumer
//   setelah acquire head yang sama
// - Release/Acquire pada index menjamin visibility payload
unsafe impl<T: Send, const N: usize> Send for RingBuffer<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for RingBuffer<T, N> {}

impl<T: Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Membuat ring buffer baru. N HARUS power of 2 dan >= 2.
    ///
    /// Alokasi hanya terjadi sekali saat inisialisasi.
    /// Kapasitas efektif adalah `N - 1` (satu slot dikorbankan).
    ///
    /// # Panics
    /// Panic jika N bukan power of 2 atau N < 2
    pub fn new() -> Self {
        assert!(N >= 2 && N.is_power_of_two(), "N must be power of 2, >= 2");

        // Alokasi buffer di heap untuk menghindari stack overflow
        let mut buffer = Vec::with_capacity(N);
        for _ in 0..N {
            buffer.push(Slot::new());
        }

        Self {
            head: CacheLinePadded::new(AtomicUsize::new(0)),
            tail: CacheLinePadded::new(AtomicUsize::new(0)),
            buffer: buffer.into_boxed_slice(),
            mask: N - 1,
        }
    }

    /// Push satu elemen ke buffer (Producer side).
    ///
    /// Returns `true` jika berhasil, `false` jika buffer penuh.
    /// Tidak pernah blocking; saat penuh tidak ada state yang berubah.
    #[inline(always)]
    pub fn try_push(&self, value: T) -> bool {
        // Head hanya ditulis thread ini, load Relaxed cukup
        let head = self.head.value.load(Ordering::Relaxed);
        // Acquire: observe retirement slot terbaru dari consumer
        let tail = self.tail.value.load(Ordering::Acquire);

        let next = (head + 1) & self.mask;
        if next == tail {
            return false; // penuh
        }

        // Tulis payload sebelum publish.
        // SAFETY: slot `head` tidak sedang dibaca consumer - check di atas
        // menjamin slot ini di luar range [tail, head) milik consumer.
        self.buffer[head].data.with_mut(|slot| unsafe {
            (*slot).write(value);
        });

        // Release: payload di atas visible untuk acquire consumer
        self.head.value.store(next, Ordering::Release);

        true
    }

    /// Pop satu elemen dari buffer (Consumer side).
    ///
    /// Returns `Some(T)` jika ada data, `None` jika buffer kosong.
    #[inline(always)]
    pub fn try_pop(&self) -> Option<T> {
        // Tail hanya ditulis thread ini, load Relaxed cukup
        let tail = self.tail.value.load(Ordering::Relaxed);
        // Acquire: observe publish terbaru dari producer
        let head = self.head.value.load(Ordering::Acquire);

        if tail == head {
            return None; // kosong
        }

        // SAFETY: slot `tail` sudah ditulis producer (visible lewat acquire
        // head di atas) dan tidak akan ditimpa sebelum tail di-publish.
        let value = self.buffer[tail]
            .data
            .with(|slot| unsafe { (*slot).assume_init_read() });

        // Release: retirement slot visible untuk acquire producer
        self.tail.value.store((tail + 1) & self.mask, Ordering::Release);

        Some(value)
    }

    /// Push batch (Producer side): berhenti di kegagalan pertama.
    ///
    /// Returns jumlah elemen yang berhasil ditransfer. Setiap elemen tetap
    /// melewati protokol single-item penuh - batching hanya mengamortisasi
    /// kerja, bukan melemahkan ordering.
    pub fn push_many(&self, values: &[T]) -> usize {
        let mut pushed = 0;
        while pushed < values.len() {
            if !self.try_push(values[pushed]) {
                break;
            }
            pushed += 1;
        }
        pushed
    }

    /// Pop batch (Consumer side): berhenti saat kosong.
    ///
    /// Returns jumlah elemen yang ditulis ke `out[..n]`.
    pub fn pop_many(&self, out: &mut [T]) -> usize {
        let mut popped = 0;
        while popped < out.len() {
            match self.try_pop() {
                Some(value) => {
                    out[popped] = value;
                    popped += 1;
                }
                None => break,
            }
        }
        popped
    }

    /// Cek apakah buffer kosong
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        let tail = self.tail.value.load(Ordering::Acquire);
        let head = self.head.value.load(Ordering::Acquire);
        tail == head
    }

    /// Cek apakah buffer penuh
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        let head = self.head.value.load(Ordering::Acquire);
        let tail = self.tail.value.load(Ordering::Acquire);
        ((head + 1) & self.mask) == tail
    }

    /// Jumlah elemen dalam buffer
    #[inline(always)]
    pub fn len(&self) -> usize {
        let head = self.head.value.load(Ordering::Acquire);
        let tail = self.tail.value.load(Ordering::Acquire);
        head.wrapping_sub(tail) & self.mask
    }

    /// Kapasitas efektif buffer (`N - 1`)
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N - 1
    }
}
