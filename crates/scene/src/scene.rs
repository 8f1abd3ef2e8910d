use crate::pick::{self, PickHit, Ray};
use glam::Vec3;
use std::collections::BTreeMap;
use voxedit_common::{Color, ObjectId};

/// Surface appearance of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub diffuse: Color,
}

impl Material {
    pub fn new(diffuse: Color) -> Self {
        Self { diffuse }
    }
}

/// Outline drawn along a box's twelve edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    /// Thickness as a fraction of the box edge length.
    pub width: f32,
}

/// An axis-aligned box owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    /// Center of the box.
    pub position: Vec3,
    /// Edge length.
    pub size: f32,
    pub material: Material,
    pub edges: Option<EdgeStyle>,
}

impl Mesh {
    pub fn aabb_min(&self) -> Vec3 {
        self.position - Vec3::splat(self.size * 0.5)
    }

    pub fn aabb_max(&self) -> Vec3 {
        self.position + Vec3::splat(self.size * 0.5)
    }
}

/// A record produced by every mutation to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Added { id: ObjectId, position: Vec3 },
    Removed { id: ObjectId, position: Vec3 },
    Recolored { id: ObjectId, old: Color, new: Color },
}

/// Owner of every mesh in the editor's 3D view.
///
/// Ids are allocated from a counter and never reused, so a stale id can only
/// miss, never alias a newer mesh. `BTreeMap` keeps iteration in creation
/// order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: BTreeMap<ObjectId, Mesh>,
    next_id: u64,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes in the scene.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Add a box and return its handle.
    pub fn add_box(
        &mut self,
        position: Vec3,
        size: f32,
        material: Material,
        edges: Option<EdgeStyle>,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.meshes.insert(
            id,
            Mesh {
                position,
                size,
                material,
                edges,
            },
        );
        self.event_log.push(SceneEvent::Added { id, position });
        id
    }

    /// Dispose of a mesh. Returns its data if it existed.
    pub fn remove(&mut self, id: ObjectId) -> Option<Mesh> {
        let mesh = self.meshes.remove(&id);
        if let Some(ref m) = mesh {
            self.event_log.push(SceneEvent::Removed {
                id,
                position: m.position,
            });
        }
        mesh
    }

    /// Replace a mesh's material. Returns false if the mesh does not exist.
    pub fn set_material(&mut self, id: ObjectId, material: Material) -> bool {
        let Some(mesh) = self.meshes.get_mut(&id) else {
            return false;
        };
        let old = mesh.material.diffuse;
        mesh.material = material;
        self.event_log.push(SceneEvent::Recolored {
            id,
            old,
            new: material.diffuse,
        });
        true
    }

    pub fn get(&self, id: ObjectId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.meshes.contains_key(&id)
    }

    /// All meshes in creation order.
    pub fn meshes(&self) -> impl Iterator<Item = (ObjectId, &Mesh)> {
        self.meshes.iter().map(|(id, mesh)| (*id, mesh))
    }

    /// Nearest mesh face hit by `ray`, if any.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let mut nearest: Option<PickHit> = None;
        for (id, mesh) in &self.meshes {
            let Some((distance, normal)) =
                pick::intersect_box(ray, mesh.aabb_min(), mesh.aabb_max())
            else {
                continue;
            };
            if nearest.as_ref().is_some_and(|n| n.distance <= distance) {
                continue;
            }
            nearest = Some(PickHit {
                id: *id,
                point: ray.at(distance),
                normal,
                distance,
            });
        }
        match &nearest {
            Some(hit) => tracing::trace!(id = %hit.id, distance = hit.distance, "pick hit"),
            None => tracing::trace!("pick missed"),
        }
        nearest
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Material {
        Material::new(Color::rgb(255, 0, 0))
    }

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.events().is_empty());
    }

    #[test]
    fn add_and_remove() {
        let mut scene = Scene::new();
        let id = scene.add_box(Vec3::ZERO, 1.0, red(), None);
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(id));

        let mesh = scene.remove(id).unwrap();
        assert_eq!(mesh.position, Vec3::ZERO);
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut scene = Scene::new();
        let a = scene.add_box(Vec3::ZERO, 1.0, red(), None);
        scene.remove(a);
        let b = scene.add_box(Vec3::ZERO, 1.0, red(), None);
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn set_material_recolors_in_place() {
        let mut scene = Scene::new();
        let id = scene.add_box(Vec3::new(1.0, 2.0, 3.0), 1.0, red(), None);
        let blue = Material::new(Color::rgb(0, 0, 255));
        assert!(scene.set_material(id, blue));
        let mesh = scene.get(id).unwrap();
        assert_eq!(mesh.material, blue);
        assert_eq!(mesh.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!scene.set_material(ObjectId(99), blue));
    }

    #[test]
    fn events_are_recorded() {
        let mut scene = Scene::new();
        let id = scene.add_box(Vec3::ZERO, 1.0, red(), None);
        scene.set_material(id, Material::new(Color::WHITE));
        scene.remove(id);
        let events = scene.drain_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], SceneEvent::Added { .. }));
        assert!(matches!(
            events[1],
            SceneEvent::Recolored { new: Color::WHITE, .. }
        ));
        assert!(matches!(events[2], SceneEvent::Removed { .. }));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn meshes_iterate_in_creation_order() {
        let mut scene = Scene::new();
        let ids: Vec<ObjectId> = (0..10)
            .map(|i| scene.add_box(Vec3::new(i as f32, 0.0, 0.0), 1.0, red(), None))
            .collect();
        let listed: Vec<ObjectId> = scene.meshes().map(|(id, _)| id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn pick_returns_nearest_mesh() {
        let mut scene = Scene::new();
        let far = scene.add_box(Vec3::new(0.0, 0.0, -10.0), 1.0, red(), None);
        let near = scene.add_box(Vec3::new(0.0, 0.0, -5.0), 1.0, red(), None);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.id, near);
        assert_ne!(hit.id, far);
        assert_eq!(hit.normal, Vec3::Z);
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn pick_miss_returns_none() {
        let mut scene = Scene::new();
        scene.add_box(Vec3::new(0.0, 0.0, -5.0), 1.0, red(), None);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(scene.pick(&ray).is_none());
    }

    #[test]
    fn pick_top_face_from_above() {
        let mut scene = Scene::new();
        let id = scene.add_box(Vec3::ZERO, 1.5, red(), None);
        let ray = Ray::new(Vec3::new(0.2, 10.0, -0.3), Vec3::NEG_Y);
        let hit = scene.pick(&ray).unwrap();
        assert_eq!(hit.id, id);
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.point.y - 0.75).abs() < 1e-5);
    }
}
