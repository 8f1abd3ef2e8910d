use glam::Vec3;
use std::collections::BTreeMap;
use voxedit_scene::Scene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 30.0, -70.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Lists every mesh with its position and colour.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Scene ({} meshes) ===\n", scene.len()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (id, mesh) in scene.meshes() {
            let p = mesh.position;
            out.push_str(&format!(
                "  [{id}] pos=({:.2}, {:.2}, {:.2}) colour={}\n",
                p.x, p.y, p.z, mesh.material.diffuse
            ));
        }

        out
    }
}

/// Top-down height map: one character per column, the number of meshes
/// stacked in it (`.` for none, `+` for more than nine). Rows run along +Z.
#[derive(Debug)]
pub struct TopDownRenderer {
    cell_size: f32,
}

impl TopDownRenderer {
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self { cell_size }
    }

    fn column(&self, p: Vec3) -> (i32, i32) {
        // Grid centers may sit on half cells; the bias keeps them off the
        // floor() boundary.
        let x = (p.x / self.cell_size + 1e-3).floor() as i32;
        let z = (p.z / self.cell_size + 1e-3).floor() as i32;
        (z, x)
    }
}

impl Renderer for TopDownRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, _view: &RenderView) -> String {
        let mut columns: BTreeMap<(i32, i32), usize> = BTreeMap::new();
        for (_, mesh) in scene.meshes() {
            *columns.entry(self.column(mesh.position)).or_default() += 1;
        }
        if columns.is_empty() {
            return String::from("(empty)\n");
        }

        let (min_z, max_z, min_x, max_x) = columns.keys().fold(
            (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
            |(lz, hz, lx, hx), &(z, x)| (lz.min(z), hz.max(z), lx.min(x), hx.max(x)),
        );

        let mut out = String::new();
        for z in min_z..=max_z {
            for x in min_x..=max_x {
                let c = match columns.get(&(z, x)).copied().unwrap_or(0) {
                    0 => '.',
                    n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
                    _ => '+',
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}
