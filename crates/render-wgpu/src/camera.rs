use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use voxedit_common::CameraConfig;
use voxedit_scene::Ray;

const BETA_LIMIT: f32 = 0.01;
const MIN_RADIUS: f32 = 1.0;

/// Arc-rotate camera orbiting a target point.
///
/// `alpha` turns around the Y axis, `beta` is the polar angle measured from
/// +Y. Camera motion is view state only; it never touches the scene.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    wheel_precision: f32,
    angular_sensibility: f32,
    panning_sensibility: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            alpha: config.alpha,
            beta: config.beta.clamp(BETA_LIMIT, std::f32::consts::PI - BETA_LIMIT),
            radius: config.radius.max(MIN_RADIUS),
            fov: 0.8,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            wheel_precision: config.wheel_precision,
            angular_sensibility: config.angular_sensibility,
            panning_sensibility: config.panning_sensibility,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(ca * sb, cb, sa * sb)
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    /// Drag by `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.alpha -= dx / self.angular_sensibility;
        self.beta = (self.beta - dy / self.angular_sensibility)
            .clamp(BETA_LIMIT, std::f32::consts::PI - BETA_LIMIT);
    }

    /// Slide the target in the view plane by `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right();
        let up = right.cross(self.forward()).normalize_or_zero();
        let scale = self.radius / self.panning_sensibility;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Zoom by `lines` wheel notches; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius - lines * 3.0 / self.wheel_precision).max(MIN_RADIUS);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through the pixel at `cursor` on a `size` viewport.
    pub fn screen_ray(&self, cursor: Vec2, size: Vec2) -> Ray {
        let ndc_x = 2.0 * cursor.x / size.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / size.y.max(1.0);
        let inverse = self.view_projection().inverse();

        let near = inverse * glam::Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * glam::Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn default_camera_sits_in_front_and_above() {
        let cam = OrbitCamera::default();
        let p = cam.position();
        // alpha = -PI/2 puts the camera on -Z.
        assert!(p.z < 0.0);
        assert!(p.y > 0.0);
        assert!(p.x.abs() < 1e-3);
        assert!((p.length() - 80.0).abs() < 1e-3);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn rotation_clamps_beta() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 1e6);
        assert!(cam.beta >= BETA_LIMIT);
        cam.rotate(0.0, -1e6);
        assert!(cam.beta <= PI - BETA_LIMIT);
    }

    #[test]
    fn rotation_scales_with_sensibility() {
        let mut cam = OrbitCamera::default();
        let alpha = cam.alpha;
        cam.rotate(1100.0, 0.0);
        assert!((cam.alpha - (alpha - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn zoom_has_minimum_radius() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1.0);
        assert!((cam.radius - 78.5).abs() < 1e-5);
        cam.zoom(1000.0);
        assert_eq!(cam.radius, MIN_RADIUS);
    }

    #[test]
    fn pan_moves_target_not_angles() {
        let mut cam = OrbitCamera::default();
        let (alpha, beta) = (cam.alpha, cam.beta);
        cam.pan(100.0, 0.0);
        assert_ne!(cam.target, Vec3::ZERO);
        assert_eq!((cam.alpha, cam.beta), (alpha, beta));
        assert!(cam.target.y.abs() < 1e-4);
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = OrbitCamera::default();
        cam.set_aspect(800, 600);
        let ray = cam.screen_ray(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        let to_target = (cam.target - cam.position()).normalize();
        assert!(ray.direction.dot(to_target) > 0.999);
    }

    #[test]
    fn top_down_ray_hits_grid() {
        let config = CameraConfig {
            beta: 0.0,
            ..CameraConfig::default()
        };
        let cam = OrbitCamera::from_config(&config);
        let ray = cam.screen_ray(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
        assert!(ray.direction.y < -0.99);
    }
}
