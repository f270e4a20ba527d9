//! Destructible object boundary
//!
//! The painter does not own an object; it operates through this trait on
//! whatever the embedder's destructible object is. Everything a paint pass
//! needs crosses here: the buffer handle, the collision surface, the grid
//! transform, and the remesh request.

use crate::core::types::Mat4;
use crate::object::collider::CollisionSurface;
use crate::voxel::handle::VoxelHandle;

/// The painter's view of a destructible object
pub trait PaintTarget {
    /// Live buffer handle, when the object currently holds voxels
    fn voxels_mut(&mut self) -> Option<&mut VoxelHandle>;

    /// Collision surface impacts are projected onto and verified against
    fn collision(&self) -> Option<&dyn CollisionSurface>;

    /// Transform from world space into the voxel grid's local space
    fn world_to_local(&self) -> Mat4;

    /// Classification tag of the rendered mesh, if it carries one
    ///
    /// Consulted when the collision surface has no tag of its own.
    fn mesh_tag(&self) -> Option<&str> {
        None
    }

    /// Edge length of a single voxel in world units
    fn voxel_size(&self) -> f32;

    /// Ask the object to rebuild its render mesh after a color edit
    fn request_remesh(&mut self);
}
