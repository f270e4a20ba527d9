//! Error types for the rubble crate

use thiserror::Error;

use crate::core::types::{IVec3, UVec3};

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("model cell at {position} lies outside the declared bounds {bounds}")]
    CellOutOfBounds { position: IVec3, bounds: UVec3 },

    #[error("model uses {0} distinct colors, palette holds at most 255")]
    PaletteOverflow(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
