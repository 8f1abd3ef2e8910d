use glam::Vec3;
use std::collections::BTreeMap;
use voxedit_common::ObjectId;

/// What the registry remembers about a live cube.
///
/// Cubes never move once created, so the cached position stays in step with
/// the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeEntry {
    pub position: Vec3,
}

/// The editor's own bookkeeping of cubes it manages.
///
/// Holds handles only; the scene owns the meshes. Keyed by `ObjectId`, so
/// iteration follows creation order and an id can appear at most once.
#[derive(Debug, Clone, Default)]
pub struct CubeRegistry {
    cubes: BTreeMap<ObjectId, CubeEntry>,
}

impl CubeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a cube. Returns false if it was already tracked.
    pub fn insert(&mut self, id: ObjectId, position: Vec3) -> bool {
        if self.cubes.contains_key(&id) {
            return false;
        }
        self.cubes.insert(id, CubeEntry { position });
        true
    }

    /// Stop tracking a cube. Returns its entry if it was tracked.
    pub fn remove(&mut self, id: ObjectId) -> Option<CubeEntry> {
        self.cubes.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.cubes.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&CubeEntry> {
        self.cubes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &CubeEntry)> {
        self.cubes.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.cubes.keys().copied().collect()
    }

    /// Lowest Y among tracked cubes: the resting layer.
    pub fn min_y(&self) -> Option<f32> {
        self.cubes
            .values()
            .map(|e| e.position.y)
            .reduce(f32::min)
    }

    /// Replace the whole registry with `entries`.
    pub fn reset<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (ObjectId, Vec3)>,
    {
        self.cubes = entries
            .into_iter()
            .map(|(id, position)| (id, CubeEntry { position }))
            .collect();
    }
}
