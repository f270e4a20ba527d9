//! Owned snapshot of a voxel buffer
//!
//! Snapshots are the cache/clone currency: fully owned copies of a buffer's
//! cells and palette with no aliasing in either direction. Providers keep
//! snapshots; live objects run on buffers.

use crate::core::types::UVec3;
use crate::voxel::buffer::VoxelBuffer;
use crate::voxel::color::Rgba;
use crate::voxel::voxel::Voxel;

/// Fully owned copy of a buffer's contents
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelSnapshot {
    dims: UVec3,
    cells: Vec<Voxel>,
    palette: Vec<Rgba>,
}

impl VoxelSnapshot {
    /// Copy a live buffer's contents
    pub fn from_buffer(buffer: &VoxelBuffer) -> Self {
        Self {
            dims: buffer.dims(),
            cells: buffer.cells().to_vec(),
            palette: buffer.palette().to_vec(),
        }
    }

    /// Move this snapshot's contents into a live buffer
    ///
    /// Consumes the snapshot, so the new buffer and any snapshot copy kept
    /// elsewhere never share storage.
    pub fn into_buffer(self) -> VoxelBuffer {
        VoxelBuffer::from_parts(self.dims, self.cells, self.palette)
    }

    /// Grid dimensions
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Cells in layout order
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    /// Palette colors
    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }
}
