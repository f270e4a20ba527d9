//! Voxel data type

use bytemuck::{Pod, Zeroable};

/// Single voxel - exactly 3 bytes
///
/// `palette_index` points into the owning buffer's color table. `active` is a
/// presence flag where any nonzero value counts as present; destruction passes
/// write graded values into it, so equality treats all nonzero values as
/// equivalent. `normal` carries the baked normal-group id used by meshing.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Voxel {
    /// Index into the buffer palette
    pub palette_index: u8,
    /// Presence flag, any nonzero value is active
    pub active: u8,
    /// Baked normal-group id
    pub normal: u8,
}

impl Voxel {
    /// Empty/air voxel
    pub const EMPTY: Voxel = Voxel {
        palette_index: 0,
        active: 0,
        normal: 0,
    };

    /// Create an active voxel with the given palette index
    pub fn new(palette_index: u8) -> Self {
        Self {
            palette_index,
            active: 1,
            normal: 0,
        }
    }

    /// Create an active voxel with palette index and normal id
    pub fn with_normal(palette_index: u8, normal: u8) -> Self {
        Self {
            palette_index,
            active: 1,
            normal,
        }
    }

    /// Check if the voxel is present
    pub fn is_active(&self) -> bool {
        self.active > 0
    }

    /// Check if voxel is empty (air)
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }
}

impl PartialEq for Voxel {
    fn eq(&self, other: &Self) -> bool {
        self.palette_index == other.palette_index
            && (self.active == other.active || (self.active > 0 && other.active > 0))
            && self.normal == other.normal
    }
}

impl Eq for Voxel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Voxel>(), 3);
    }

    #[test]
    fn test_empty() {
        assert!(Voxel::EMPTY.is_empty());
        assert!(Voxel::default().is_empty());
        assert!(!Voxel::new(3).is_empty());
    }

    #[test]
    fn test_active_grades_compare_equal() {
        let a = Voxel { palette_index: 1, active: 5, normal: 0 };
        let b = Voxel { palette_index: 1, active: 200, normal: 0 };
        assert_eq!(a, b);
    }

    #[test]
    fn test_inactive_differs_from_active() {
        let empty = Voxel { palette_index: 1, active: 0, normal: 0 };
        let solid = Voxel { palette_index: 1, active: 1, normal: 0 };
        assert_ne!(empty, solid);
    }

    #[test]
    fn test_index_and_normal_compared_exactly() {
        assert_ne!(Voxel::new(1), Voxel::new(2));
        assert_ne!(Voxel::with_normal(1, 3), Voxel::with_normal(1, 4));
    }
}
