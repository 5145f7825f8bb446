//! RGB colors and linear blending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Componentwise linear interpolation, `self + (other - self) * t`.
    ///
    /// `t` is clamped to `0.0..=1.0`; each channel rounds to nearest.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Relative luminance (sRGB, WCAG formula), 0.0 (black) to 1.0 (white).
    pub fn luminance(self) -> f64 {
        fn linear(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{s}': expected #rrggbb"));
        }
        let part = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Rgb::new(part(0)?, part(2)?, part(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#3b82f6".parse::<Rgb>().unwrap(), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!("FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::WHITE;
        let b = Rgb::new(0x3b, 0x82, 0xf6);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        // Per channel: 255 + (59 - 255) / 2 = 157, then 192.5 and 250.5 rounded up.
        assert_eq!(a.lerp(b, 0.5), Rgb::new(157, 193, 251));
    }

    #[test]
    fn lerp_clamps_parameter() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(100, 100, 100);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, f64::NAN), a);
    }

    #[test]
    fn white_is_brighter_than_black() {
        assert!(Rgb::WHITE.luminance() > 0.99);
        assert!(Rgb::new(0, 0, 0).luminance() < 0.01);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102ff\"");
    }
}
