//! Color representation

use std::fmt;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Create from a hex string (e.g., "#7CAEAD" or "7CAEAD")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    /// Convert from HSV, each channel truncated to an integer in 0..=255
    ///
    /// Hue is cyclic: `h` and `h + 1.0` give the same color. Saturation and
    /// value are clamped to `0.0..=1.0`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (v, v, v)
        } else {
            let h6 = h * 6.0;
            let sector = h6.floor();
            let f = h6 - sector;
            let p = v * (1.0 - s);
            let q = v * (1.0 - s * f);
            let t = v * (1.0 - s * (1.0 - f));
            match (sector as i64).rem_euclid(6) {
                0 => (v, t, p),
                1 => (q, v, p),
                2 => (p, v, t),
                3 => (p, q, v),
                4 => (t, p, v),
                _ => (v, p, q),
            }
        };

        let channel = |c: f64| (c * 255.0).clamp(0.0, 255.0) as u8;
        Color::rgb(channel(r), channel(g), channel(b))
    }

    /// Convert to hex string (without # prefix), as PresentationML expects
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    // Common colors
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#7CAEAD"), Some(Color::rgb(0x7C, 0xAE, 0xAD)));
        assert_eq!(Color::from_hex("C00000"), Some(Color::rgb(192, 0, 0)));
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(255, 0, 0).to_hex(), "FF0000");
        assert_eq!(Color::rgb(0x4F, 0x7A, 0x27).to_string(), "#4F7A27");
    }

    #[test]
    fn test_from_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsv(0.5, 0.0, 0.5), Color::rgb(127, 127, 127));
    }

    #[test]
    fn test_from_hsv_department_saturation() {
        assert_eq!(Color::from_hsv(0.0, 0.8, 0.9), Color::rgb(229, 45, 45));
        assert_eq!(Color::from_hsv(1.0 / 12.0, 0.8, 0.9), Color::rgb(229, 137, 45));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(Color::from_hsv(0.0 / 12.0, 0.8, 0.9), Color::from_hsv(12.0 / 12.0, 0.8, 0.9));
    }

    proptest! {
        #[test]
        fn hue_is_cyclic_for_department_steps(n in 0u32..12) {
            let base = Color::from_hsv(n as f64 / 12.0, 0.8, 0.9);
            let wrapped = Color::from_hsv((n + 12) as f64 / 12.0, 0.8, 0.9);
            prop_assert_eq!(base, wrapped);
        }
    }
}
