//! Cache line padding utility.
//!
//! Dipakai oleh ring buffer (isolasi index head/tail) dan sharded counter
//! (isolasi shard per-thread). Tanpa padding ini, dua nilai milik thread
//! berbeda bisa menempati cache line yang sama dan saling invalidate
//! setiap write (false sharing).

/// Ukuran cache line (destructive interference size).
///
/// 64 bytes pada x86-64 dan mayoritas ARM64. Nilai lebih besar tetap aman,
/// hanya boros memory.
pub const CACHE_LINE_SIZE: usize = 64;

/// Wrapper yang menjamin `value` menempati cache line-nya sendiri.
///
/// `align(64)` membuat start address kelipatan 64, dan compiler membulatkan
/// size ke kelipatan alignment - jadi dua `CacheLinePadded` yang bersebelahan
/// di array tidak pernah berbagi cache line.
#[repr(C, align(64))]
pub struct CacheLinePadded<T> {
    pub(crate) value: T,
}

impl<T> CacheLinePadded<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> std::ops::Deref for CacheLinePadded<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> std::ops::DerefMut for CacheLinePadded<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}
