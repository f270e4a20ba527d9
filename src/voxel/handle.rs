//! Shared buffer handle with copy-on-write
//!
//! Objects spawned from the same model share one buffer until the first
//! mutation. [`VoxelHandle`] wraps the shared buffer; cloning the handle
//! aliases it, and `make_unique` severs the sharing with a snapshot copy at
//! the moment a writer needs exclusive access.

use std::sync::Arc;

use crate::voxel::buffer::VoxelBuffer;

/// Shared handle to a voxel buffer
#[derive(Debug, Clone)]
pub struct VoxelHandle {
    inner: Arc<VoxelBuffer>,
}

impl VoxelHandle {
    /// Wrap a buffer in a fresh, unshared handle
    pub fn new(buffer: VoxelBuffer) -> Self {
        Self {
            inner: Arc::new(buffer),
        }
    }

    /// Alias the underlying buffer into another handle
    pub fn share(&self) -> VoxelHandle {
        self.clone()
    }

    /// True when another live handle aliases the same buffer
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }

    /// Number of live handles on the underlying buffer
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// True when both handles point at the same storage
    pub fn aliases(&self, other: &VoxelHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Ensure exclusive ownership, then hand out mutable access
    ///
    /// When the buffer is shared, it is first duplicated through a snapshot
    /// so every other handle keeps the untouched original. An unshared handle
    /// pays nothing beyond the refcount check.
    pub fn make_unique(&mut self) -> &mut VoxelBuffer {
        if Arc::strong_count(&self.inner) > 1 {
            log::debug!(
                "voxel buffer shared by {} handles, copying before mutation",
                Arc::strong_count(&self.inner)
            );
            let copy = self.inner.snapshot().into_buffer();
            self.inner = Arc::new(copy);
        }
        Arc::get_mut(&mut self.inner).expect("buffer handle not unique after copy")
    }
}

impl std::ops::Deref for VoxelHandle {
    type Target = VoxelBuffer;

    fn deref(&self) -> &VoxelBuffer {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec3;
    use crate::voxel::color::Rgba;
    use crate::voxel::voxel::Voxel;

    fn sample_handle() -> VoxelHandle {
        let mut buffer = VoxelBuffer::new(UVec3::new(2, 2, 2));
        buffer.add_palette_color(Rgba::WHITE);
        *buffer.voxel_mut(0, 0, 0) = Voxel::new(0);
        VoxelHandle::new(buffer)
    }

    #[test]
    fn test_fresh_handle_is_unshared() {
        let handle = sample_handle();
        assert!(!handle.is_shared());
        assert_eq!(handle.handle_count(), 1);
    }

    #[test]
    fn test_share_aliases_storage() {
        let a = sample_handle();
        let b = a.share();
        assert!(a.is_shared());
        assert!(b.is_shared());
        assert!(a.aliases(&b));
        assert_eq!(a.handle_count(), 2);
    }

    #[test]
    fn test_make_unique_skips_copy_when_sole_owner() {
        let mut handle = sample_handle();
        let before = handle.cells().as_ptr();
        handle.make_unique();
        assert_eq!(handle.cells().as_ptr(), before);
    }

    #[test]
    fn test_make_unique_severs_sharing() {
        let mut a = sample_handle();
        let b = a.share();

        *a.make_unique().voxel_mut(1, 1, 1) = Voxel::new(0);

        assert!(!a.aliases(&b));
        assert!(!a.is_shared());
        assert!(!b.is_shared());
        assert!(a.voxel(1, 1, 1).is_active());
        assert!(b.voxel(1, 1, 1).is_empty());
        // The untouched cell came across in the copy
        assert!(a.voxel(0, 0, 0).is_active());
    }

    #[test]
    fn test_drop_releases_sharing() {
        let mut a = sample_handle();
        {
            let _b = a.share();
            assert!(a.is_shared());
        }
        assert!(!a.is_shared());
        let before = a.cells().as_ptr();
        a.make_unique();
        assert_eq!(a.cells().as_ptr(), before);
    }
}
