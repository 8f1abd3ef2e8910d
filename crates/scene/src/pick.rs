use glam::Vec3;
use voxedit_common::ObjectId;

/// A half-line in world space. `direction` is kept normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of resolving a ray against the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    /// World-space intersection point.
    pub point: Vec3,
    /// Outward unit normal of the face that was hit. Always axis-aligned.
    pub normal: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Slab test against an axis-aligned box.
///
/// Returns the entry distance and the outward normal of the entry face.
/// A box that contains the ray origin is not hit.
pub(crate) fn intersect_box(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let origin = ray.origin.to_array();
    let direction = ray.direction.to_array();
    let min = min.to_array();
    let max = max.to_array();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut normal = [0.0f32; 3];

    for axis in 0..3 {
        if direction[axis].abs() < 1e-8 {
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let inv_d = 1.0 / direction[axis];
        let mut t1 = (min[axis] - origin[axis]) * inv_d;
        let mut t2 = (max[axis] - origin[axis]) * inv_d;

        let mut n = [0.0f32; 3];
        n[axis] = -1.0;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            n[axis] = 1.0;
        }

        if t1 > t_near {
            t_near = t1;
            normal = n;
        }
        t_far = t_far.min(t2);

        if t_near > t_far {
            return None;
        }
    }

    if t_near < 0.0 {
        return None;
    }
    Some((t_near, Vec3::from_array(normal)))
}
