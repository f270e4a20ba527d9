//! In-memory source model import
//!
//! [`SourceModel`] is the neutral form importers produce: declared grid
//! dimensions plus a list of populated cells with 8-bit colors.
//! [`VoxelBuffer::from_model`] turns one into a live buffer, building the
//! palette in first-seen order.

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::{IVec3, Result, UVec3};
use crate::voxel::buffer::{MAX_PALETTE_COLORS, VoxelBuffer};
use crate::voxel::color::Rgba;
use crate::voxel::voxel::Voxel;

/// One populated cell of a source model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCell {
    /// Grid position in the model's own space
    pub position: IVec3,
    /// 8-bit RGBA as stored by the source format
    pub color: [u8; 4],
    /// Baked normal-group id
    pub normal: u8,
}

/// Raw model data handed over by an importer
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    pub dims: UVec3,
    pub cells: Vec<ModelCell>,
}

impl SourceModel {
    /// Empty model with declared dimensions
    pub fn new(dims: UVec3) -> Self {
        Self {
            dims,
            cells: Vec::new(),
        }
    }

    /// Append a populated cell
    pub fn with_cell(mut self, position: IVec3, color: [u8; 4]) -> Self {
        self.cells.push(ModelCell {
            position,
            color,
            normal: 0,
        });
        self
    }
}

impl VoxelBuffer {
    /// Build a buffer from a source model
    ///
    /// The palette is deduplicated in first-seen order over the raw 8-bit
    /// colors; stored entries are rescaled into [0, 1] with alpha forced to
    /// 1. Cells the model does not populate stay empty. A populated cell
    /// outside the declared dimensions fails the whole import, as does a
    /// model with more distinct colors than the palette can hold.
    pub fn from_model(model: &SourceModel) -> Result<VoxelBuffer> {
        let mut palette: Vec<Rgba> = Vec::new();
        let mut lookup: HashMap<[u8; 4], usize> = HashMap::new();
        for cell in &model.cells {
            if !lookup.contains_key(&cell.color) {
                lookup.insert(cell.color, palette.len());
                let [r, g, b, _] = cell.color;
                palette.push(Rgba::from_rgb8(r, g, b));
            }
        }
        if palette.len() > MAX_PALETTE_COLORS {
            return Err(Error::PaletteOverflow(palette.len()));
        }

        let dims = model.dims;
        let count = dims.x as usize * dims.y as usize * dims.z as usize;
        let mut cells = vec![Voxel::EMPTY; count];
        for cell in &model.cells {
            let p = cell.position;
            if p.x < 0
                || p.y < 0
                || p.z < 0
                || p.x >= dims.x as i32
                || p.y >= dims.y as i32
                || p.z >= dims.z as i32
            {
                return Err(Error::CellOutOfBounds {
                    position: p,
                    bounds: dims,
                });
            }
            let index = (p.x as u32 + dims.x * (p.y as u32 + dims.y * p.z as u32)) as usize;
            cells[index] = Voxel {
                palette_index: lookup[&cell.color] as u8,
                active: 1,
                normal: cell.normal,
            };
        }

        log::info!(
            "imported model {}x{}x{}: {} populated cells, {} palette colors",
            dims.x,
            dims.y,
            dims.z,
            model.cells.len(),
            palette.len()
        );
        Ok(VoxelBuffer::from_parts(dims, cells, palette))
    }
}
