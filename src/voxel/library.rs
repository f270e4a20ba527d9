//! Named snapshot store
//!
//! Spawners keep one snapshot per model and stamp out live buffers from it.
//! Combined with [`VoxelHandle::share`], a wave of spawned objects can run on
//! one shared buffer until the first of them is mutated.

use std::collections::HashMap;

use crate::voxel::buffer::VoxelBuffer;
use crate::voxel::handle::VoxelHandle;
use crate::voxel::snapshot::VoxelSnapshot;

/// In-memory store of named voxel snapshots
#[derive(Debug, Default)]
pub struct SnapshotLibrary {
    snapshots: Vec<VoxelSnapshot>,
    names: HashMap<String, usize>,
}

impl SnapshotLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Store a snapshot under a name, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, snapshot: VoxelSnapshot) {
        let name = name.into();
        match self.names.get(&name) {
            Some(&index) => self.snapshots[index] = snapshot,
            None => {
                self.names.insert(name, self.snapshots.len());
                self.snapshots.push(snapshot);
            }
        }
    }

    /// Look up a stored snapshot
    pub fn get(&self, name: &str) -> Option<&VoxelSnapshot> {
        self.names.get(name).map(|&index| &self.snapshots[index])
    }

    /// Stamp out an independent live buffer from a stored snapshot
    pub fn instantiate(&self, name: &str) -> Option<VoxelBuffer> {
        self.get(name).map(|snapshot| snapshot.clone().into_buffer())
    }

    /// Stamp out a shareable handle from a stored snapshot
    pub fn instantiate_handle(&self, name: &str) -> Option<VoxelHandle> {
        self.instantiate(name).map(VoxelHandle::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec3;
    use crate::voxel::color::Rgba;
    use crate::voxel::voxel::Voxel;

    fn sample_snapshot() -> VoxelSnapshot {
        let mut buffer = VoxelBuffer::new(UVec3::new(2, 2, 2));
        buffer.add_palette_color(Rgba::rgb(0.5, 0.5, 0.5));
        *buffer.voxel_mut(1, 0, 1) = Voxel::new(0);
        buffer.snapshot()
    }

    #[test]
    fn test_insert_and_get() {
        let mut library = SnapshotLibrary::new();
        assert!(library.is_empty());
        library.insert("crate", sample_snapshot());
        assert_eq!(library.len(), 1);
        assert!(library.get("crate").is_some());
        assert!(library.get("barrel").is_none());
    }

    #[test]
    fn test_insert_replaces_existing_name() {
        let mut library = SnapshotLibrary::new();
        library.insert("crate", sample_snapshot());

        let empty = VoxelBuffer::new(UVec3::new(1, 1, 1)).snapshot();
        library.insert("crate", empty);

        assert_eq!(library.len(), 1);
        assert_eq!(library.get("crate").unwrap().dims(), UVec3::new(1, 1, 1));
    }

    #[test]
    fn test_instantiate_is_independent() {
        let mut library = SnapshotLibrary::new();
        library.insert("crate", sample_snapshot());

        let mut buffer = library.instantiate("crate").unwrap();
        *buffer.voxel_mut(1, 0, 1) = Voxel::EMPTY;

        // The stored snapshot still has the cell
        assert!(library.get("crate").unwrap().cells()[buffer.linear_index(1, 0, 1)].is_active());
        assert!(library.instantiate("missing").is_none());
    }

    #[test]
    fn test_instantiate_handles_do_not_alias() {
        let mut library = SnapshotLibrary::new();
        library.insert("crate", sample_snapshot());

        let a = library.instantiate_handle("crate").unwrap();
        let b = library.instantiate_handle("crate").unwrap();
        assert!(!a.aliases(&b));

        // Sharing happens through the handle, not the library
        let c = a.share();
        assert!(a.aliases(&c));
    }
}
