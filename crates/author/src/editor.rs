use crate::grid::GridSpec;
use crate::palette::Palette;
use crate::registry::CubeRegistry;
use glam::Vec3;
use voxedit_common::{Color, ColorChoice, EditorConfig, Mode, ObjectId};
use voxedit_input::Action;
use voxedit_scene::{EdgeStyle, Material, PickHit, Scene};

/// The tool and colour currently selected in the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorState {
    pub mode: Mode,
    pub color: ColorChoice,
}

/// Fixed parameters for every cube the editor creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub cell_size: f32,
    pub border_color: Color,
    pub edges: Option<EdgeStyle>,
}

impl EditorSettings {
    pub fn from_config(config: &EditorConfig) -> Self {
        let edges = (config.edge_width > 0.0).then_some(EdgeStyle {
            color: config.edge_color,
            width: config.edge_width,
        });
        let cell_size = if config.cell_size.is_finite() && config.cell_size > 0.0 {
            config.cell_size
        } else {
            let fallback = EditorConfig::default().cell_size;
            tracing::warn!(
                "cell_size {} is not a positive finite number, using {fallback}",
                config.cell_size
            );
            fallback
        };
        Self {
            cell_size,
            border_color: config.border_color,
            edges,
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Summary of a bulk clear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearReport {
    /// Resting layer height; `None` when there was nothing to clear.
    pub base_y: Option<f32>,
    /// Cubes destroyed because they sat above the base layer.
    pub removed: usize,
    /// Registry size afterwards.
    pub retained: usize,
    /// Base-layer meshes that were not tracked before and now are.
    pub adopted: usize,
}

/// What an action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// The pick hit nothing.
    Missed,
    /// The pick hit a mesh the editor does not track.
    Untracked(ObjectId),
    Created {
        from: ObjectId,
        id: ObjectId,
        position: Vec3,
        color: Color,
    },
    Deleted(ObjectId),
    Painted {
        id: ObjectId,
        color: Color,
    },
    ModeSelected(Mode),
    ColorSelected(ColorChoice),
    Cleared(ClearReport),
    /// Unbound input.
    Ignored,
}

impl EditOutcome {
    /// Whether the scene or registry changed.
    pub fn is_mutation(&self) -> bool {
        match self {
            EditOutcome::Created { .. } | EditOutcome::Deleted(_) | EditOutcome::Painted { .. } => {
                true
            }
            EditOutcome::Cleared(report) => report.removed > 0 || report.adopted > 0,
            EditOutcome::Missed
            | EditOutcome::Untracked(_)
            | EditOutcome::ModeSelected(_)
            | EditOutcome::ColorSelected(_)
            | EditOutcome::Ignored => false,
        }
    }
}

/// The voxel editing state machine.
///
/// Owns the panel state, the cube registry, the palette and the colour RNG.
/// The scene is passed into every operation; the editor never owns meshes.
pub struct Editor {
    state: EditorState,
    registry: CubeRegistry,
    palette: Palette,
    settings: EditorSettings,
    rng: fastrand::Rng,
}

impl Editor {
    /// Create an editor from config. Uses `config.seed` when present.
    pub fn new(config: &EditorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            state: EditorState::default(),
            registry: CubeRegistry::new(),
            palette: Palette::new(config.palette.clone()),
            settings: EditorSettings::from_config(config),
            rng,
        }
    }

    /// Create an editor with a fixed colour seed, overriding the config.
    pub fn with_seed(config: &EditorConfig, seed: u64) -> Self {
        let mut editor = Self::new(config);
        editor.rng = fastrand::Rng::with_seed(seed);
        editor
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn color(&self) -> ColorChoice {
        self.state.color
    }

    pub fn registry(&self) -> &CubeRegistry {
        &self.registry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Populate the scene with a `size × size` grid. Border cells get the
    /// border colour, interior cells the current colour choice.
    pub fn generate_grid(&mut self, scene: &mut Scene, size: u32) -> usize {
        let spec = GridSpec::new(size, self.settings.cell_size);
        let mut created = 0;
        for cell in spec.cells() {
            let color = if cell.border {
                self.settings.border_color
            } else {
                self.palette.resolve(self.state.color, &mut self.rng)
            };
            self.spawn_cube(scene, cell.position, color);
            created += 1;
        }
        tracing::info!(
            "generated {size}x{size} grid ({created} cubes, {} border)",
            spec.border_count()
        );
        created
    }

    /// Apply one input action.
    pub fn apply(&mut self, scene: &mut Scene, action: Action) -> EditOutcome {
        match action {
            Action::SelectMode(mode) => self.select_mode(mode),
            Action::SelectColor(choice) => self.select_color(choice),
            Action::Clear => EditOutcome::Cleared(self.clear(scene)),
            Action::Pick(ray) => {
                let hit = scene.pick(&ray);
                self.handle_pick(scene, hit)
            }
            Action::Noop => EditOutcome::Ignored,
        }
    }

    pub fn select_mode(&mut self, mode: Mode) -> EditOutcome {
        self.state.mode = mode;
        tracing::info!("mode: {mode}");
        EditOutcome::ModeSelected(mode)
    }

    pub fn select_color(&mut self, choice: ColorChoice) -> EditOutcome {
        self.state.color = choice;
        tracing::info!("colour: {choice}");
        EditOutcome::ColorSelected(choice)
    }

    /// Dispatch a resolved pick to the active tool.
    pub fn handle_pick(&mut self, scene: &mut Scene, hit: Option<PickHit>) -> EditOutcome {
        let Some(hit) = hit else {
            return EditOutcome::Missed;
        };
        let Some(entry) = self.registry.get(hit.id).copied() else {
            tracing::debug!("pick on untracked object {}", hit.id);
            return EditOutcome::Untracked(hit.id);
        };

        match self.state.mode {
            Mode::Create => {
                let position = entry.position + hit.normal * self.settings.cell_size;
                let color = self.palette.resolve(self.state.color, &mut self.rng);
                let id = self.spawn_cube(scene, position, color);
                tracing::debug!("created {id} at {position} from {}", hit.id);
                EditOutcome::Created {
                    from: hit.id,
                    id,
                    position,
                    color,
                }
            }
            Mode::Delete => {
                if self.delete_cube(scene, hit.id) {
                    EditOutcome::Deleted(hit.id)
                } else {
                    EditOutcome::Untracked(hit.id)
                }
            }
            Mode::Paint => {
                let color = self.palette.resolve(self.state.color, &mut self.rng);
                scene.set_material(hit.id, Material::new(color));
                tracing::debug!("painted {} {color}", hit.id);
                EditOutcome::Painted { id: hit.id, color }
            }
        }
    }

    /// Add a cube at `position` with the current colour choice.
    pub fn create_cube(&mut self, scene: &mut Scene, position: Vec3) -> ObjectId {
        let color = self.palette.resolve(self.state.color, &mut self.rng);
        self.spawn_cube(scene, position, color)
    }

    /// Remove a tracked cube from registry and scene. Untracked ids are left
    /// alone and return false.
    pub fn delete_cube(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        scene.remove(id);
        tracing::debug!("deleted {id}");
        true
    }

    /// Destroy every tracked cube above the lowest layer, then rebuild the
    /// registry from the scene meshes sitting on that layer.
    ///
    /// The rebuild reads the scene rather than filtering the registry, so a
    /// base-layer mesh the registry had lost track of is adopted again.
    pub fn clear(&mut self, scene: &mut Scene) -> ClearReport {
        let Some(base_y) = self.registry.min_y() else {
            return ClearReport::default();
        };

        let mut removed = 0;
        for (id, entry) in self.registry.iter() {
            if entry.position.y > base_y && scene.remove(id).is_some() {
                removed += 1;
            }
        }

        let previous = std::mem::take(&mut self.registry);
        self.registry.reset(
            scene
                .meshes()
                .filter(|(_, mesh)| mesh.position.y == base_y)
                .map(|(id, mesh)| (id, mesh.position)),
        );
        let adopted = self
            .registry
            .iter()
            .filter(|(id, _)| !previous.contains(*id))
            .count();

        let report = ClearReport {
            base_y: Some(base_y),
            removed,
            retained: self.registry.len(),
            adopted,
        };
        tracing::info!(
            "cleared {removed} cubes above y={base_y}, {} remain",
            report.retained
        );
        report
    }

    fn spawn_cube(&mut self, scene: &mut Scene, position: Vec3, color: Color) -> ObjectId {
        let id = scene.add_box(
            position,
            self.settings.cell_size,
            Material::new(color),
            self.settings.edges,
        );
        self.registry.insert(id, position);
        id
    }
}
