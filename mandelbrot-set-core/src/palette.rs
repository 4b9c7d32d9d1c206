//! Ordered color ramps used by the palette-based coloring schemes.

use crate::color::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Number of entries in the default palette (and of color pickers in the UI).
pub const DEFAULT_PALETTE_LEN: usize = 16;

const BASE_PALETTE: [[u8; 3]; DEFAULT_PALETTE_LEN] = [
    [9, 1, 47],
    [4, 4, 73],
    [0, 7, 100],
    [12, 44, 138],
    [24, 82, 177],
    [57, 125, 209],
    [134, 181, 229],
    [211, 236, 248],
    [241, 233, 191],
    [248, 201, 95],
    [255, 170, 0],
    [204, 128, 0],
    [153, 87, 0],
    [106, 52, 3],
    [66, 30, 15],
    [25, 7, 26],
];

/// Non-empty, ordered sequence of colors from low to high iteration count.
///
/// Serialized as a list of `#rrggbb` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::base()
    }
}

impl Palette {
    /// Build a palette. Fails if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// The 16-entry blue/orange ramp used by default.
    pub fn base() -> Self {
        Self {
            colors: BASE_PALETTE
                .iter()
                .map(|&[r, g, b]| Color::from_rgb(r, g, b))
                .collect(),
        }
    }

    /// `steps` colors sampled from `from` towards `to` at `t = i / steps`.
    pub fn linear(from: Color, to: Color, steps: usize) -> Result<Self, ConfigError> {
        let colors = (0..steps)
            .map(|i| from.lerp(&to, i as f32 / steps as f32))
            .collect();
        Self::new(colors)
    }

    /// Parse a palette from hex strings, in order.
    pub fn from_hex_strings<I, S>(hexes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = hexes
            .into_iter()
            .map(|h| Color::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`, wrapping around the palette length.
    pub fn wrapped(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Entry at `index`, clamped to the last entry.
    pub fn clamped(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// Flattened `[r, g, b, r, g, b, ...]` array for a `vec3[]` uniform.
    pub fn flatten(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = ConfigError;

    fn try_from(hexes: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_hex_strings(hexes)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.to_hex_strings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_palette_has_sixteen_entries() {
        let palette = Palette::base();
        assert_eq!(palette.len(), DEFAULT_PALETTE_LEN);
        assert_eq!(palette.colors()[0].to_hex(), "#09012f");
        assert_eq!(palette.colors()[15].to_hex(), "#19071a");
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(ConfigError::EmptyPalette));
        assert_eq!(
            Palette::from_hex_strings(Vec::<String>::new()),
            Err(ConfigError::EmptyPalette)
        );
    }

    #[test]
    fn flatten_emits_three_floats_per_color() {
        let palette = Palette::base();
        let flat = palette.flatten();
        assert_eq!(flat.len(), 3 * palette.len());
        assert_eq!(&flat[0..3], &[9.0 / 255.0, 1.0 / 255.0, 47.0 / 255.0]);
    }

    #[test]
    fn linear_palette_starts_at_first_color() {
        let palette = Palette::linear(Color::BLACK, Color::WHITE, 4).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.colors()[0], Color::BLACK);
        assert!((palette.colors()[2].r - 0.5).abs() < 1e-6);
        assert!(Palette::linear(Color::BLACK, Color::WHITE, 0).is_err());
    }

    #[test]
    fn wrapped_index_cycles() {
        let palette = Palette::base();
        assert_eq!(palette.wrapped(17), palette.wrapped(1));
        assert_eq!(palette.clamped(99), palette.colors()[15]);
    }

    #[test]
    fn hex_strings_round_trip() {
        let palette = Palette::base();
        let parsed = Palette::from_hex_strings(palette.to_hex_strings()).unwrap();
        assert_eq!(parsed.to_hex_strings(), palette.to_hex_strings());
    }

    #[test]
    fn palette_serialization() {
        let palette = Palette::base();
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.starts_with("[\"#09012f\""));
        let parsed: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), palette.len());
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }
}
