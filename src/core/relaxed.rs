//! Varian SPSC yang SENGAJA SALAH - semua index pakai Relaxed ordering.
//!
//! JANGAN dipakai di produksi. Tipe ini ada hanya sebagai referensi negatif:
//! tanpa pasangan release/acquire, tidak ada happens-before edge antara
//! tulis slot (producer) dan baca slot (consumer), sehingga consumer bisa
//! membaca payload yang belum visible. Race detector harus menandainya:
//!
//! - loom: test `#[should_panic]` di bawah menangkap akses cell yang tidak
//!   tersinkronisasi secara deterministik
//! - ThreadSanitizer: lihat `tests/concurrency_stress.rs` (test ignored,
//!   khusus dijalankan dengan TSan)
//!
//! Sengaja dibuat tipe terpisah, bukan flag runtime pada [`RingBuffer`],
//! supaya temuan race detector tidak bisa hilang karena dead-code
//! elimination atau reordering compiler setelah flag "diperbaiki".
//!
//! [`RingBuffer`]: crate::core::RingBuffer

use std::mem::MaybeUninit;

#[cfg(not(loom))]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicUsize, Ordering};

use crate::core::padding::CacheLinePadded;
use crate::core::UnsafeCell;

/// SPSC ring buffer TANPA sinkronisasi yang benar. Hanya untuk demonstrasi
/// race detector; secara struktural identik dengan `RingBuffer`.
#[repr(C)]
pub struct RelaxedRingBuffer<T, const N: usize> {
    head: CacheLinePadded<AtomicUsize>,
    tail: CacheLinePadded<AtomicUsize>,
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    mask: usize,
}

// SAFETY: impl ini MEMBOHONGI compiler dengan sengaja - protokol Relaxed
// di bawah TIDAK menjamin visibility payload. Itulah inti demonstrasinya.
unsafe impl<T: Send, const N: usize> Send for RelaxedRingBuffer<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for RelaxedRingBuffer<T, N> {}

impl<T: Copy, const N: usize> Default for RelaxedRingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> RelaxedRingBuffer<T, N> {
    /// # Panics
    /// Panic jika N bukan power of 2 atau N < 2
    pub fn new() -> Self {
        assert!(N >= 2 && N.is_power_of_two(), "N must be power of 2, >= 2");

        let mut buffer = Vec::with_capacity(N);
        for _ in 0..N {
            buffer.push(UnsafeCell::new(MaybeUninit::uninit()));
        }

        Self {
            head: CacheLinePadded::new(AtomicUsize::new(0)),
            tail: CacheLinePadded::new(AtomicUsize::new(0)),
            buffer: buffer.into_boxed_slice(),
            mask: N - 1,
        }
    }

    /// Push tanpa release - publish head TIDAK meng-order tulisan slot.
    #[inline(always)]
    pub fn try_push(&self, value: T) -> bool {
        let head = self.head.value.load(Ordering::Relaxed);
        let tail = self.tail.value.load(Ordering::Relaxed); // salah: harusnya Acquire

        let next = (head + 1) & self.mask;
        if next == tail {
            return false;
        }

        self.buffer[head].with_mut(|slot| unsafe {
            (*slot).write(value);
        });

        self.head.value.store(next, Ordering::Relaxed); // salah: harusnya Release

        true
    }

    /// Pop tanpa acquire - baca slot TIDAK dijamin melihat tulisan producer.
    #[inline(always)]
    pub fn try_pop(&self) -> Option<T> {
        let tail = self.tail.value.load(Ordering::Relaxed);
        let head = self.head.value.load(Ordering::Relaxed); // salah: harusnya Acquire

        if tail == head {
            return None;
        }

        let value = self.buffer[tail].with(|slot| unsafe { (*slot).assume_init_read() });

        self.tail.value.store((tail + 1) & self.mask, Ordering::Relaxed); // salah: harusnya Release

        Some(value)
    }
}
