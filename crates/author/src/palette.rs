use voxedit_common::config::DEFAULT_PALETTE;
use voxedit_common::{Color, ColorChoice};

/// The fixed set of colours offered as swatches and used for random draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette. An empty list falls back to the default palette so
    /// that random draws always have something to pick from.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            tracing::warn!("empty palette, using default colours");
            return Self::default();
        }
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Uniform draw from the palette.
    pub fn random(&self, rng: &mut fastrand::Rng) -> Color {
        self.colors[rng.usize(..self.colors.len())]
    }

    /// The colour a choice stands for right now.
    pub fn resolve(&self, choice: ColorChoice, rng: &mut fastrand::Rng) -> Color {
        match choice {
            ColorChoice::Fixed(color) => color,
            ColorChoice::Random => self.random(rng),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}
