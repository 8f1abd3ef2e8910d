use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voxedit_author::{EditOutcome, Editor};
use voxedit_common::{EditorConfig, Mode, ObjectId};
use voxedit_input::Action;
use voxedit_render::{DebugTextRenderer, RenderView, Renderer, TopDownRenderer};
use voxedit_scene::{Ray, Scene};
use voxedit_tools::SceneInspector;

#[derive(Parser)]
#[command(name = "voxedit-cli", about = "Headless voxel editor operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the initial grid size
    #[arg(long, global = true)]
    grid_size: Option<u32>,

    /// Seed for random colours
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate the initial grid and report on it
    Grid {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// List every mesh
        #[arg(long)]
        dump: bool,
        /// Print a top-down height map
        #[arg(long)]
        map: bool,
    },
    /// Delete a border cube, build on its neighbour, then clear
    Demo {
        /// Print a top-down height map after each step
        #[arg(long)]
        map: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = EditorConfig::load_or_default(cli.config.as_deref())
        .context("loading config")?;
    if let Some(size) = cli.grid_size {
        config.grid_size = size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    tracing::info!(
        "voxedit-cli starting ({0}x{0} grid, cell {1}, seed {2:?})",
        config.grid_size,
        config.cell_size,
        config.seed
    );

    match cli.command {
        Commands::Info => {
            println!("voxedit-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("author: {}", voxedit_author::crate_info());
            println!("render: {}", voxedit_render::crate_info());
            println!("tools: {}", voxedit_tools::crate_info());
            println!(
                "config: grid={0}x{0} cell={1} palette={2} colours",
                config.grid_size,
                config.cell_size,
                config.palette.len()
            );
        }
        Commands::Grid { json, dump, map } => {
            let (editor, scene) = setup(&config);
            let summary = SceneInspector::summary(&scene, &editor);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
            if dump {
                print!("{}", DebugTextRenderer::new().render(&scene, &RenderView::default()));
            }
            if map {
                print!("{}", top_down(&config, &scene));
            }
        }
        Commands::Demo { map } => run_demo(&config, map)?,
    }

    Ok(())
}

fn setup(config: &EditorConfig) -> (Editor, Scene) {
    let mut editor = Editor::new(config);
    let mut scene = Scene::new();
    editor.generate_grid(&mut scene, config.grid_size);
    (editor, scene)
}

fn top_down(config: &EditorConfig, scene: &Scene) -> String {
    TopDownRenderer::new(config.cell_size).render(scene, &RenderView::default())
}

/// A click straight down onto the top face of `id`.
fn click_from_above(scene: &Scene, id: ObjectId) -> anyhow::Result<Action> {
    let mesh = scene.get(id).ok_or_else(|| anyhow!("no mesh {id}"))?;
    let origin = mesh.position + Vec3::new(0.0, mesh.size * 20.0, 0.0);
    Ok(Action::Pick(Ray::new(origin, Vec3::NEG_Y)))
}

fn run_demo(config: &EditorConfig, map: bool) -> anyhow::Result<()> {
    let (mut editor, mut scene) = setup(config);
    let report = |step: &str, editor: &Editor, scene: &Scene| {
        tracing::debug!(
            step,
            registry = editor.registry().len(),
            meshes = scene.len(),
            "demo step"
        );
        println!("{step:<28} registry={:>4}", editor.registry().len());
        if map {
            print!("{}", top_down(config, scene));
        }
    };
    report("grid", &editor, &scene);

    let ids = editor.registry().ids();
    let (&corner, &neighbour) = match ids.as_slice() {
        [a, b, ..] => (a, b),
        _ => anyhow::bail!("demo needs a grid of at least 2x2"),
    };

    editor.apply(&mut scene, Action::SelectMode(Mode::Delete));
    let click = click_from_above(&scene, corner)?;
    let outcome = editor.apply(&mut scene, click);
    anyhow::ensure!(
        matches!(outcome, EditOutcome::Deleted(_)),
        "delete missed: {outcome:?}"
    );
    report("delete border cube", &editor, &scene);

    editor.apply(&mut scene, Action::SelectMode(Mode::Create));
    let click = click_from_above(&scene, neighbour)?;
    let outcome = editor.apply(&mut scene, click);
    if let EditOutcome::Created { id, position, color, .. } = outcome {
        println!(
            "  created {id} at ({:.2}, {:.2}, {:.2}) colour {color}",
            position.x, position.y, position.z
        );
    } else {
        anyhow::bail!("create missed: {outcome:?}");
    }
    report("create on neighbour", &editor, &scene);

    let outcome = editor.apply(&mut scene, Action::Clear);
    if let EditOutcome::Cleared(clear) = outcome {
        tracing::info!(
            "clear removed {} and adopted {} base cubes",
            clear.removed,
            clear.adopted
        );
        println!("  removed {} above base layer", clear.removed);
    }
    report("clear", &editor, &scene);

    println!("{}", SceneInspector::summary(&scene, &editor));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_builds_the_configured_grid() {
        let config = EditorConfig {
            grid_size: 4,
            seed: Some(1),
            ..EditorConfig::default()
        };
        let (editor, scene) = setup(&config);
        assert_eq!(editor.registry().len(), 16);
        assert_eq!(scene.len(), 16);
    }

    #[test]
    fn click_from_above_targets_the_mesh() {
        let (_, scene) = setup(&EditorConfig::default());
        let (id, _) = scene.meshes().next().unwrap();
        let Action::Pick(ray) = click_from_above(&scene, id).unwrap() else {
            panic!("expected a pick");
        };
        assert_eq!(scene.pick(&ray).unwrap().id, id);
        assert!(click_from_above(&scene, ObjectId(9999)).is_err());
    }

    #[test]
    fn demo_runs_and_rejects_tiny_grids() {
        let config = EditorConfig {
            grid_size: 3,
            seed: Some(5),
            ..EditorConfig::default()
        };
        run_demo(&config, true).unwrap();

        let config = EditorConfig {
            grid_size: 1,
            ..EditorConfig::default()
        };
        assert!(run_demo(&config, false).is_err());
    }
}
