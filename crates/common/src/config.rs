//! Editor configuration.
//!
//! Loaded from an optional YAML file; every field falls back to the default
//! that reproduces the stock editor (16×16 grid, 1.5 cell size, 12-colour
//! palette).

use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

/// Errors from loading or validating a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Arc-rotate camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Azimuth around the Y axis, radians.
    pub alpha: f32,
    /// Polar angle from +Y, radians.
    pub beta: f32,
    pub radius: f32,
    /// Larger is slower zoom.
    pub wheel_precision: f32,
    /// Pixels of drag per radian of rotation.
    pub angular_sensibility: f32,
    /// Larger is slower panning.
    pub panning_sensibility: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: -PI / 2.0,
            beta: PI / 2.5,
            radius: 80.0,
            wheel_precision: 2.0,
            angular_sensibility: 1100.0,
            panning_sensibility: 800.0,
        }
    }
}

/// Two opposing hemispheric lights plus a flat environment term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub top_intensity: f32,
    pub bottom_intensity: f32,
    pub environment_intensity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            top_intensity: 0.8,
            bottom_intensity: 0.5,
            environment_intensity: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side length of the initial grid, in cells.
    pub grid_size: u32,
    /// Cube edge length and spacing between grid cells.
    pub cell_size: f32,
    /// Swatches offered in the colour panel and used for random draws.
    pub palette: Vec<Color>,
    /// Colour of the outer ring of the initial grid.
    pub border_color: Color,
    pub edge_color: Color,
    /// Edge outline thickness as a fraction of the cube edge length.
    pub edge_width: f32,
    pub background: Color,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    /// Seed for random colour draws. `None` seeds from entropy.
    pub seed: Option<u64>,
}

pub const DEFAULT_PALETTE: [Color; 12] = [
    Color::rgb(0xFF, 0x6B, 0x6B),
    Color::rgb(0xFF, 0x9A, 0x3E),
    Color::rgb(0xFF, 0xD9, 0x3E),
    Color::rgb(0xFF, 0xFA, 0x65),
    Color::rgb(0xA2, 0xFF, 0x65),
    Color::rgb(0x65, 0xFF, 0x88),
    Color::rgb(0x65, 0xFF, 0xC3),
    Color::rgb(0x65, 0xEF, 0xFF),
    Color::rgb(0x65, 0xA6, 0xFF),
    Color::rgb(0x9A, 0x65, 0xFF),
    Color::rgb(0xFF, 0x65, 0xA6),
    Color::rgb(0xFF, 0x65, 0xE1),
];

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 16,
            cell_size: 1.5,
            palette: DEFAULT_PALETTE.to_vec(),
            border_color: Color::WHITE,
            edge_color: Color::BLACK,
            edge_width: 0.04,
            background: Color::rgb(0x30, 0x54, 0x73),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            seed: None,
        }
    }
}

impl EditorConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cell_size", self.cell_size)?;
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        if !(0.0..0.5).contains(&self.edge_width) {
            return Err(ConfigError::Invalid(format!(
                "edge_width must be in [0, 0.5), got {}",
                self.edge_width
            )));
        }

        let cam = &self.camera;
        finite("camera.alpha", cam.alpha)?;
        finite("camera.beta", cam.beta)?;
        positive("camera.radius", cam.radius)?;
        positive("camera.wheel_precision", cam.wheel_precision)?;
        positive("camera.angular_sensibility", cam.angular_sensibility)?;
        positive("camera.panning_sensibility", cam.panning_sensibility)?;

        let light = &self.lighting;
        finite("lighting.top_intensity", light.top_intensity)?;
        finite("lighting.bottom_intensity", light.bottom_intensity)?;
        finite("lighting.environment_intensity", light.environment_intensity)?;
        Ok(())
    }
}

fn finite(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")))
    }
}

/// Finite and strictly greater than zero.
fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.cell_size, 1.5);
        assert_eq!(config.palette.len(), 12);
        assert_eq!(config.border_color, Color::WHITE);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EditorConfig::from_yaml("grid_size: 8\nseed: 3\n").unwrap();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.cell_size, 1.5);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn palette_parses_hex_strings() {
        let config =
            EditorConfig::from_yaml("palette:\n  - \"#112233\"\n  - \"#abcdef\"\n").unwrap();
        assert_eq!(
            config.palette,
            vec![Color::rgb(0x11, 0x22, 0x33), Color::rgb(0xAB, 0xCD, 0xEF)]
        );
    }

    #[test]
    fn bad_colour_is_a_yaml_error() {
        let err = EditorConfig::from_yaml("border_color: white\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn empty_palette_rejected() {
        let err = EditorConfig::from_yaml("palette: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_positive_cell_size_rejected() {
        assert!(EditorConfig::from_yaml("cell_size: 0.0\n").is_err());
        assert!(EditorConfig::from_yaml("cell_size: -1.0\n").is_err());
    }

    #[test]
    fn non_finite_values_rejected() {
        assert!(EditorConfig::from_yaml("cell_size: .inf\n").is_err());
        assert!(EditorConfig::from_yaml("cell_size: .nan\n").is_err());
        assert!(EditorConfig::from_yaml("camera:\n  radius: .inf\n").is_err());
        assert!(EditorConfig::from_yaml("camera:\n  alpha: .nan\n").is_err());

        let mut config = EditorConfig::default();
        config.camera.angular_sensibility = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EditorConfig::default();
        config.edge_width = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.lighting.top_intensity = f32::NEG_INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_roundtrip_preserves_config() {
        let config = EditorConfig {
            grid_size: 4,
            seed: Some(9),
            ..EditorConfig::default()
        };
        let text = config.to_yaml().unwrap();
        assert_eq!(EditorConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "grid_size: 5").unwrap();
        writeln!(file, "cell_size: 2.0").unwrap();
        drop(file);

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.cell_size, 2.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        let config = EditorConfig::load_or_default(None).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
