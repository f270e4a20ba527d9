//! Rubble - destructible voxel buffers with impact-driven color painting

pub mod core;
pub mod math;
pub mod voxel;
pub mod object;
pub mod paint;
