//! Working palette for a paint pass
//!
//! Paint edits resolve blended colors to palette indices. [`PaletteBuilder`]
//! wraps a buffer's palette in an editable copy with an exact-match lookup;
//! when the pass ends and the palette grew, the rebuilt table replaces the
//! buffer's in one swap.

use std::collections::HashMap;

use crate::voxel::buffer::MAX_PALETTE_COLORS;
use crate::voxel::color::Rgba;

/// Editable palette copy with O(1) exact color lookup
#[derive(Debug)]
pub struct PaletteBuilder {
    colors: Vec<Rgba>,
    lookup: HashMap<[u8; 4], u8>,
    changed: bool,
    warned_full: bool,
}

impl PaletteBuilder {
    /// Copy a buffer palette into an editable working set
    pub fn from_palette(palette: &[Rgba]) -> Self {
        debug_assert!(palette.len() <= MAX_PALETTE_COLORS);
        let mut lookup = HashMap::with_capacity(palette.len());
        for (i, color) in palette.iter().enumerate() {
            // First entry wins when two quantize to the same key
            lookup.entry(color.quantized()).or_insert(i as u8);
        }
        Self {
            colors: palette.to_vec(),
            lookup,
            changed: false,
            warned_full: false,
        }
    }

    /// Number of colors in the working set
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when no colors are present
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// True when the working set grew past the palette it was built from
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Exact-match lookup by quantized color
    pub fn lookup(&self, color: Rgba) -> Option<u8> {
        self.lookup.get(&color.quantized()).copied()
    }

    /// Index for a color, appending when it is new and the palette has room
    ///
    /// A full palette falls back to the nearest existing color by squared
    /// RGB distance, lowest index winning ties.
    pub fn get_or_add(&mut self, color: Rgba) -> u8 {
        if let Some(index) = self.lookup(color) {
            return index;
        }
        if self.colors.len() >= MAX_PALETTE_COLORS {
            if !self.warned_full {
                self.warned_full = true;
                log::warn!(
                    "palette full at {} colors, approximating new colors",
                    self.colors.len()
                );
            }
            return self.nearest_index(color);
        }
        let index = self.colors.len() as u8;
        self.colors.push(color);
        self.lookup.insert(color.quantized(), index);
        self.changed = true;
        index
    }

    /// Hand the rebuilt palette back for the buffer swap
    pub fn into_colors(self) -> Vec<Rgba> {
        self.colors
    }

    fn nearest_index(&self, color: Rgba) -> u8 {
        debug_assert!(!self.colors.is_empty());
        let mut best = 0;
        let mut best_dist = f32::MAX;
        for (i, candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_sq_rgb(*candidate);
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_hit_does_not_grow() {
        let mut builder =
            PaletteBuilder::from_palette(&[Rgba::rgb(1.0, 0.0, 0.0), Rgba::rgb(0.0, 1.0, 0.0)]);
        assert_eq!(builder.get_or_add(Rgba::rgb(1.0, 0.0, 0.0)), 0);
        assert_eq!(builder.get_or_add(Rgba::rgb(0.0, 1.0, 0.0)), 1);
        assert!(!builder.changed());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_new_color_appends() {
        let mut builder = PaletteBuilder::from_palette(&[Rgba::rgb(1.0, 0.0, 0.0)]);
        let index = builder.get_or_add(Rgba::rgb(0.0, 0.0, 1.0));
        assert_eq!(index, 1);
        assert!(builder.changed());

        let colors = builder.into_colors();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[1], Rgba::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_lookup_collapses_sub_quantum_differences() {
        // Closer than one 8-bit step quantizes onto the stored key
        let mut builder = PaletteBuilder::from_palette(&[Rgba::rgb(0.5, 0.5, 0.5)]);
        let index = builder.get_or_add(Rgba::rgb(0.5005, 0.5, 0.5));
        assert_eq!(index, 0);
        assert!(!builder.changed());
    }

    #[test]
    fn test_empty_palette_accepts_first_color() {
        let mut builder = PaletteBuilder::from_palette(&[]);
        assert!(builder.is_empty());
        assert_eq!(builder.get_or_add(Rgba::WHITE), 0);
        assert!(builder.changed());
    }

    #[test]
    fn test_full_palette_falls_back_to_nearest() {
        let mut palette = vec![Rgba::rgb(1.0, 0.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0)];
        for i in 0..(MAX_PALETTE_COLORS - 2) {
            // Cluster the filler colors near white, far from the query below
            palette.push(Rgba::rgb(1.0, 1.0, 0.5 + i as f32 * 0.001));
        }
        let mut builder = PaletteBuilder::from_palette(&palette);
        assert_eq!(builder.len(), MAX_PALETTE_COLORS);

        // Equidistant from red and blue; the lower index wins
        let index = builder.get_or_add(Rgba::rgb(0.5, 0.0, 0.5));
        assert_eq!(index, 0);
        assert!(!builder.changed());
        assert_eq!(builder.len(), MAX_PALETTE_COLORS);
    }
}
