//! Interior-mutability cell dengan dukungan loom.
//!
//! Build normal memakai `std::cell::UnsafeCell`. Di bawah `--cfg loom`,
//! cell diganti `loom::cell::UnsafeCell` supaya akses slot ikut dilacak
//! oleh happens-before analysis loom - tanpa ini, loom hanya melihat
//! atomic index dan tidak bisa mendeteksi race pada payload slot.
//!
//! API `with`/`with_mut` mengikuti bentuk loom di kedua build.

#[cfg(loom)]
pub(crate) use loom::cell::UnsafeCell;

#[cfg(not(loom))]
#[derive(Debug)]
#[repr(transparent)]
pub(crate) struct UnsafeCell<T>(std::cell::UnsafeCell<T>);

#[cfg(not(loom))]
impl<T> UnsafeCell<T> {
    pub(crate) const fn new(value: T) -> Self {
        Self(std::cell::UnsafeCell::new(value))
    }

    #[inline(always)]
    pub(crate) fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
        f(self.0.get())
    }

    #[inline(always)]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
        f(self.0.get())
    }
}
