//! Dense voxel buffer with palette
//!
//! The buffer is the per-object voxel store: a dense grid of palette-indexed
//! cells plus the color table they point into. Cells are laid out x-fastest,
//! `index = x + dims.x * (y + dims.y * z)`.

use rayon::prelude::*;

use crate::core::types::UVec3;
use crate::voxel::color::Rgba;
use crate::voxel::snapshot::VoxelSnapshot;
use crate::voxel::voxel::Voxel;

/// Cell count below which active-voxel counting stays on the calling thread
pub const PARALLEL_COUNT_THRESHOLD: usize = 200;

/// Maximum number of palette entries a buffer may hold
pub const MAX_PALETTE_COLORS: usize = 255;

/// Dense voxel grid with its color palette
#[derive(Debug)]
pub struct VoxelBuffer {
    dims: UVec3,
    cells: Vec<Voxel>,
    palette: Vec<Rgba>,
}

impl VoxelBuffer {
    /// Create a buffer of the given dimensions with every cell empty
    pub fn new(dims: UVec3) -> Self {
        let count = dims.x as usize * dims.y as usize * dims.z as usize;
        Self {
            dims,
            cells: vec![Voxel::EMPTY; count],
            palette: Vec::new(),
        }
    }

    /// Assemble a buffer from raw parts
    pub(crate) fn from_parts(dims: UVec3, cells: Vec<Voxel>, palette: Vec<Rgba>) -> Self {
        debug_assert_eq!(
            cells.len(),
            dims.x as usize * dims.y as usize * dims.z as usize
        );
        debug_assert!(palette.len() <= MAX_PALETTE_COLORS);
        Self { dims, cells, palette }
    }

    /// Copy a snapshot back into a live buffer
    pub fn from_snapshot(snapshot: &VoxelSnapshot) -> Self {
        snapshot.clone().into_buffer()
    }

    /// Take a fully owned copy of this buffer's contents
    pub fn snapshot(&self) -> VoxelSnapshot {
        VoxelSnapshot::from_buffer(self)
    }

    /// Grid dimensions
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Total cell count (active or not)
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Linear index of a cell, x-fastest
    pub fn linear_index(&self, x: u32, y: u32, z: u32) -> usize {
        debug_assert!(x < self.dims.x);
        debug_assert!(y < self.dims.y);
        debug_assert!(z < self.dims.z);
        (x + self.dims.x * (y + self.dims.y * z)) as usize
    }

    /// Read a cell
    pub fn voxel(&self, x: u32, y: u32, z: u32) -> Voxel {
        self.cells[self.linear_index(x, y, z)]
    }

    /// Mutable access to a cell
    pub fn voxel_mut(&mut self, x: u32, y: u32, z: u32) -> &mut Voxel {
        let index = self.linear_index(x, y, z);
        &mut self.cells[index]
    }

    /// All cells in layout order
    pub fn cells(&self) -> &[Voxel] {
        &self.cells
    }

    /// Mutable view of all cells in layout order
    pub fn cells_mut(&mut self) -> &mut [Voxel] {
        &mut self.cells
    }

    /// Palette colors, indexed by `Voxel::palette_index`
    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    /// Append a palette color, or `None` when the palette is full
    pub fn add_palette_color(&mut self, color: Rgba) -> Option<u8> {
        if self.palette.len() >= MAX_PALETTE_COLORS {
            return None;
        }
        self.palette.push(color);
        Some((self.palette.len() - 1) as u8)
    }

    /// Swap in a rebuilt palette; the previous table is dropped
    pub fn replace_palette(&mut self, colors: Vec<Rgba>) {
        debug_assert!(colors.len() <= MAX_PALETTE_COLORS);
        self.palette = colors;
    }

    /// True when no cell is active
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// True when strictly more than `min` cells are active
    ///
    /// Scans serially and stops at the first cell that settles the answer.
    pub fn has_more_active_than(&self, min: usize) -> bool {
        let mut count = 0;
        for cell in &self.cells {
            if cell.is_active() {
                count += 1;
                if count > min {
                    return true;
                }
            }
        }
        false
    }

    /// Count active cells
    ///
    /// Small buffers are scanned inline; at [`PARALLEL_COUNT_THRESHOLD`]
    /// cells and above the scan runs on the rayon pool and this call blocks
    /// until it finishes. Both paths return the same count.
    pub fn count_active(&self) -> usize {
        if self.cells.len() < PARALLEL_COUNT_THRESHOLD {
            let mut count = 0;
            for cell in &self.cells {
                if cell.is_active() {
                    count += 1;
                }
            }
            count
        } else {
            self.cells.par_iter().filter(|c| c.is_active()).count()
        }
    }
}
