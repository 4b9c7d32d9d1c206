use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// RGB color with channels normalized to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parse a `#RRGGBB` string (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Color from 0-255 channel values.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Color from 0-1 fractions. Out-of-range values are clamped.
    pub fn from_fractions(r: f32, g: f32, b: f32) -> Self {
        let clamp = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Channels rounded to the nearest 0-255 step.
    pub fn to_rgb(&self) -> [u8; 3] {
        let quantize = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Linear interpolation; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl std::str::FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_channels() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn from_hex_accepts_missing_hash_and_uppercase() {
        assert_eq!(
            Color::from_hex("AABBCC").unwrap(),
            Color::from_rgb(0xaa, 0xbb, 0xcc)
        );
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        for bad in ["", "#fff", "#12345g", "#1234567", "#ééé"] {
            assert!(
                matches!(Color::from_hex(bad), Err(ConfigError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_round_trip_every_channel_value() {
        for v in 0..=255u8 {
            let hex = format!("#{v:02x}{:02x}{:02x}", 255 - v, v / 2);
            assert_eq!(Color::from_hex(&hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hex_round_trip_sampled_grid() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(51) {
                    let hex = format!("#{r:02x}{g:02x}{b:02x}");
                    assert_eq!(Color::from_hex(&hex).unwrap().to_hex(), hex);
                }
            }
        }
    }

    #[test]
    fn from_fractions_clamps() {
        let c = Color::from_fractions(-0.5, 0.25, 3.0);
        assert_eq!(c, Color::from_fractions(0.0, 0.25, 1.0));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.g - 0.5).abs() < 1e-6);
    }
}
