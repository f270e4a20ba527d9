//! Impact-driven color painting

pub mod profile;
pub mod palette;
pub mod painter;

pub use profile::{BlendMode, ColorProfile, DEFAULT_SURFACE_TAG, ImpactEntry, ImpactType};
pub use palette::PaletteBuilder;
pub use painter::{ImpactAnchor, ImpactPainter, ImpactRequest, MAX_IMPACT_WAIT_FRAMES};
