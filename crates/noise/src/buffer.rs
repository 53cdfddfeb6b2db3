//! Aligned Buffer Manager
//!
//! [`AlignedBuffer`] owns a lane-aligned `f32` allocation together with the
//! level it was allocated for and the disposer that must free it. Plugin
//! backends can hand out buffers from their own allocator through
//! [`AlignedBuffer::from_raw_parts`]; the embedded disposer routes the release
//! back to them.

use crate::level::SimdLevel;
use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Frees an allocation previously produced with the same layout
pub type ReleaseFn = unsafe fn(NonNull<f32>, Layout);

/// Lane-aligned, zero-initialized float buffer
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    layout: Layout,
    level: SimdLevel,
    // None once released, and for zero-sized buffers that never allocated
    release: Option<ReleaseFn>,
}

// SAFETY: AlignedBuffer uniquely owns its allocation, like Vec<f32>.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

unsafe fn release_global(ptr: NonNull<f32>, layout: Layout) {
    // SAFETY: caller passes the pointer/layout pair from `alloc_zeroed`
    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
}

impl AlignedBuffer {
    /// Allocate `len` zeroed floats aligned for `level`
    ///
    /// `len` is used as given; callers that want lane padding pass
    /// `level.aligned_size(n)`.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `isize`. Aborts via
    /// [`alloc::handle_alloc_error`] when the allocator fails.
    pub fn zeroed(len: usize, level: SimdLevel) -> Self {
        let align = level.alignment().max(core::mem::align_of::<f32>());
        let size = len
            .checked_mul(core::mem::size_of::<f32>())
            .expect("aligned buffer size overflows usize");
        let layout = Layout::from_size_align(size, align).expect("invalid aligned buffer layout");

        if size == 0 {
            return Self {
                ptr: NonNull::dangling(),
                len: 0,
                layout,
                level,
                release: None,
            };
        }

        // SAFETY: layout has non-zero size
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<f32>()) else {
            alloc::handle_alloc_error(layout);
        };

        Self {
            ptr,
            len,
            layout,
            level,
            release: Some(release_global),
        }
    }

    /// Adopt an allocation made elsewhere
    ///
    /// # Safety
    ///
    /// `ptr` must point to `len` initialized floats inside an allocation
    /// described by `layout`, aligned to at least `level.alignment()`, and
    /// `release(ptr, layout)` must be the correct way to free it.
    pub unsafe fn from_raw_parts(
        ptr: NonNull<f32>,
        len: usize,
        layout: Layout,
        level: SimdLevel,
        release: ReleaseFn,
    ) -> Self {
        Self {
            ptr,
            len,
            layout,
            level,
            release: Some(release),
        }
    }

    /// Level this buffer was allocated for
    pub fn level(&self) -> SimdLevel {
        self.level
    }

    /// Alignment of the allocation in bytes
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    /// Whether [`release`](Self::release) already ran
    pub fn is_released(&self) -> bool {
        self.release.is_none() && self.len == 0 && self.layout.size() != 0
    }

    /// Free the allocation now
    ///
    /// The buffer becomes empty. Calling this again (or dropping afterwards)
    /// is a no-op.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            // SAFETY: ptr/layout are the pair the disposer was bound to, and
            // taking `release` guarantees this runs at most once
            unsafe { release(self.ptr, self.layout) };
            self.ptr = NonNull::dangling();
            self.len = 0;
        }
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        // SAFETY: ptr is valid for len floats (dangling with len 0 otherwise)
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        // SAFETY: unique ownership of a valid allocation of len floats
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("level", &self.level)
            .field("alignment", &self.layout.align())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_per_level() {
        for level in SimdLevel::ALL {
            let buffer = AlignedBuffer::zeroed(level.aligned_size(37), level);
            assert_eq!(buffer.as_ptr() as usize % level.alignment(), 0);
            assert_eq!(buffer.len() % level.lanes(), 0);
            assert!(buffer.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut buffer = AlignedBuffer::zeroed(64, SimdLevel::Avx2);
        buffer[63] = 1.0;
        buffer.release();
        assert!(buffer.is_released());
        assert!(buffer.is_empty());
        buffer.release();
        assert!(buffer.is_released());
        drop(buffer);
    }

    #[test]
    fn test_zero_length_buffer() {
        let mut buffer = AlignedBuffer::zeroed(0, SimdLevel::Sse2);
        assert!(buffer.is_empty());
        assert!(!buffer.is_released());
        buffer.release();
    }

    #[test]
    fn test_foreign_disposer_runs_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static RELEASED: AtomicUsize = AtomicUsize::new(0);

        unsafe fn counting_release(ptr: NonNull<f32>, layout: Layout) {
            RELEASED.fetch_add(1, Ordering::SeqCst);
            unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
        }

        let layout = Layout::from_size_align(16 * 4, 64).unwrap();
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<f32>()).unwrap();
        let mut buffer =
            unsafe { AlignedBuffer::from_raw_parts(ptr, 16, layout, SimdLevel::Avx512, counting_release) };
        buffer.release();
        buffer.release();
        drop(buffer);
        assert_eq!(RELEASED.load(Ordering::SeqCst), 1);
    }
}
