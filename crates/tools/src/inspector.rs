use serde::Serialize;
use voxedit_author::Editor;
use voxedit_common::{ColorChoice, Mode, ObjectId};
use voxedit_scene::Scene;

/// Read-only queries against the scene and editor for debugging and the
/// tool panel.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary(scene: &Scene, editor: &Editor) -> EditorSummary {
        let registry = editor.registry();
        let mut heights: Vec<f32> = registry.iter().map(|(_, e)| e.position.y).collect();
        heights.sort_by(f32::total_cmp);
        heights.dedup();

        EditorSummary {
            meshes: scene.len(),
            tracked: registry.len(),
            untracked: scene.meshes().filter(|(id, _)| !registry.contains(*id)).count(),
            base_y: registry.min_y(),
            layers: heights.len(),
            mode: editor.mode(),
            color: editor.color(),
            pending_events: scene.events().len(),
        }
    }

    pub fn inspect_object(scene: &Scene, editor: &Editor, id: ObjectId) -> Option<ObjectInfo> {
        scene.get(id).map(|mesh| {
            let p = mesh.position;
            ObjectInfo {
                id,
                position: [p.x, p.y, p.z],
                color: mesh.material.diffuse.to_hex(),
                tracked: editor.registry().contains(id),
            }
        })
    }

    /// Tracked cube ids in creation order.
    pub fn list_tracked(editor: &Editor) -> Vec<ObjectId> {
        editor.registry().ids()
    }
}

/// Summary of editor state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSummary {
    /// Meshes in the scene.
    pub meshes: usize,
    /// Cubes in the registry.
    pub tracked: usize,
    /// Scene meshes the registry does not know about.
    pub untracked: usize,
    pub base_y: Option<f32>,
    /// Distinct heights among tracked cubes.
    pub layers: usize,
    pub mode: Mode,
    pub color: ColorChoice,
    pub pending_events: usize,
}

impl std::fmt::Display for EditorSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Editor: mode={} colour={} cubes={} meshes={} layers={}",
            self.mode, self.color, self.tracked, self.meshes, self.layers
        )?;
        if let Some(y) = self.base_y {
            write!(f, " base_y={y:.2}")?;
        }
        Ok(())
    }
}

/// Detailed info about a single scene object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub position: [f32; 3],
    pub color: String,
    pub tracked: bool,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Object [{}] pos=({:.2}, {:.2}, {:.2}) colour={}{}",
            self.id,
            self.position[0],
            self.position[1],
            self.position[2],
            self.color,
            if self.tracked { "" } else { " (untracked)" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxedit_common::{Color, EditorConfig};
    use voxedit_scene::Material;

    fn setup(size: u32) -> (Editor, Scene) {
        let mut editor = Editor::with_seed(&EditorConfig::default(), 3);
        let mut scene = Scene::new();
        editor.generate_grid(&mut scene, size);
        (editor, scene)
    }

    #[test]
    fn summary_empty() {
        let editor = Editor::with_seed(&EditorConfig::default(), 0);
        let scene = Scene::new();
        let summary = SceneInspector::summary(&scene, &editor);
        assert_eq!(summary.meshes, 0);
        assert_eq!(summary.tracked, 0);
        assert_eq!(summary.layers, 0);
        assert_eq!(summary.base_y, None);
        assert_eq!(summary.mode, Mode::Create);
    }

    #[test]
    fn summary_counts_layers_and_strays() {
        let (mut editor, mut scene) = setup(3);
        editor.create_cube(&mut scene, Vec3::new(0.0, 1.5, 0.0));
        scene.add_box(Vec3::new(9.0, 0.0, 0.0), 1.0, Material::new(Color::BLACK), None);

        let summary = SceneInspector::summary(&scene, &editor);
        assert_eq!(summary.meshes, 11);
        assert_eq!(summary.tracked, 10);
        assert_eq!(summary.untracked, 1);
        assert_eq!(summary.layers, 2);
        assert_eq!(summary.base_y, Some(0.0));
        assert_eq!(summary.pending_events, 11);
    }

    #[test]
    fn inspect_object_found() {
        let mut editor = Editor::with_seed(&EditorConfig::default(), 0);
        let mut scene = Scene::new();
        editor.select_color(ColorChoice::Fixed(Color::rgb(0x12, 0x34, 0x56)));
        let id = editor.create_cube(&mut scene, Vec3::new(1.0, 2.0, 3.0));

        let info = SceneInspector::inspect_object(&scene, &editor, id).unwrap();
        assert_eq!(info.position, [1.0, 2.0, 3.0]);
        assert_eq!(info.color, "#123456");
        assert!(info.tracked);
        assert!(format!("{info}").contains("#123456"));
    }

    #[test]
    fn inspect_object_not_found() {
        let (editor, scene) = setup(1);
        assert!(SceneInspector::inspect_object(&scene, &editor, ObjectId(999)).is_none());
    }

    #[test]
    fn list_tracked_in_creation_order() {
        let (editor, _scene) = setup(2);
        let ids = SceneInspector::list_tracked(&editor);
        assert_eq!(ids, vec![ObjectId(0), ObjectId(1), ObjectId(2), ObjectId(3)]);
    }

    #[test]
    fn summary_display() {
        let (editor, scene) = setup(2);
        let s = format!("{}", SceneInspector::summary(&scene, &editor));
        assert!(s.contains("mode=Create"));
        assert!(s.contains("colour=random"));
        assert!(s.contains("cubes=4"));
    }
}
