//! Voxel data structures and operations

pub mod voxel;
pub mod color;
pub mod buffer;
pub mod snapshot;
pub mod handle;
pub mod model;
pub mod library;

pub use voxel::Voxel;
pub use color::Rgba;
pub use buffer::{MAX_PALETTE_COLORS, PARALLEL_COUNT_THRESHOLD, VoxelBuffer};
pub use snapshot::VoxelSnapshot;
pub use handle::VoxelHandle;
pub use model::{ModelCell, SourceModel};
pub use library::SnapshotLibrary;
