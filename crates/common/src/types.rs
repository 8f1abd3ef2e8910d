use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable handle for an object owned by the scene.
///
/// Allocated sequentially, so ordering by id is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from parsing a colour string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("colour {0:?} must start with '#'")]
    MissingHash(String),
    #[error("colour {0:?} must have exactly six hex digits")]
    BadLength(String),
    #[error("colour {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// 8-bit RGB colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string. Hex digits are case-insensitive.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::BadLength(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|d| u8::from_str_radix(d, 16).ok())
                .ok_or_else(|| ColorError::BadDigit(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear-ish float channels in `[0, 1]` with alpha 1, for GPU upload.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// The active editing tool. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Extrude a new cube from the clicked face.
    #[default]
    Create,
    /// Remove the clicked cube.
    Delete,
    /// Recolour the clicked cube in place.
    Paint,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Create, Mode::Delete, Mode::Paint];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Create => "Create",
            Mode::Delete => "Delete",
            Mode::Paint => "Paint",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which colour new or repainted cubes receive.
///
/// Resolved at the moment of creation/painting; never applied retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Draw uniformly from the palette on every use.
    #[default]
    Random,
    Fixed(Color),
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Random => f.write_str("random"),
            ColorChoice::Fixed(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colour() {
        let c = Color::from_hex("#FF6B6B").unwrap();
        assert_eq!(c, Color::rgb(0xFF, 0x6B, 0x6B));
        assert_eq!(c.to_hex(), "#FF6B6B");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            Color::from_hex("#65efff").unwrap(),
            Color::from_hex("#65EFFF").unwrap()
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            Color::from_hex("FF6B6B"),
            Err(ColorError::MissingHash(_))
        ));
        assert!(matches!(
            Color::from_hex("#FFF"),
            Err(ColorError::BadLength(_))
        ));
        assert!(matches!(
            Color::from_hex("#GG0000"),
            Err(ColorError::BadDigit(_))
        ));
        assert!(Color::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn rgba_f32_bounds() {
        assert_eq!(Color::WHITE.to_rgba_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_rgba_f32(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn defaults() {
        assert_eq!(Mode::default(), Mode::Create);
        assert_eq!(ColorChoice::default(), ColorChoice::Random);
    }

    #[test]
    fn object_ids_order_by_allocation() {
        assert!(ObjectId(1) < ObjectId(2));
        assert_eq!(format!("{}", ObjectId(7)), "#7");
    }
}
