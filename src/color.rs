//! RGB / HSL value types used throughout palette extraction.
//!
//! All channels are `f64` in `[0, 1]`. Hue is stored as a fraction of a full
//! turn (degrees / 360) so every HSL component shares the same range.

use std::fmt;
use std::hash::{Hash, Hasher};

use palette::Srgb;

use crate::error::PaletteError;

/// An opaque color with floating point channels in `[0, 1]`.
///
/// Equality and hashing are bitwise on the channels: two values are the same
/// key only when every channel is bit-identical. This is what pixel counting
/// relies on when it deduplicates colors.
#[derive(Clone, Copy, Debug)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from 8-bit channels (`channel / 255`).
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        let c: Srgb<f64> = Srgb::<u8>::new(red, green, blue).into_format();
        Self::new(c.red, c.green, c.blue)
    }

    /// Round to 8-bit channels, clamping anything outside `[0, 1]`.
    pub fn to_u8(self) -> [u8; 3] {
        let c: Srgb<u8> = Srgb::new(self.red, self.green, self.blue).into_format();
        [c.red, c.green, c.blue]
    }

    /// Parse `RRGGBB` or `#RRGGBB`.
    pub fn from_hex(s: &str) -> Result<Self, PaletteError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PaletteError::InvalidHex(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PaletteError::InvalidHex(s.to_string()))
        };
        Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Uppercase `RRGGBB`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("{r:02X}{g:02X}{b:02X}")
    }

    /// Hue, saturation and luminance of this color.
    ///
    /// Degenerate cases (all channels equal) report a hue and saturation of 0.
    pub fn to_hsl(self) -> Hsl {
        let Rgb { red, green, blue } = self;
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let luminance = (max + min) / 2.0;

        let saturation = if max == min {
            0.0
        } else if luminance < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let mut hue = if max == red {
            (green - blue) / delta
        } else if max == green {
            2.0 + (blue - red) / delta
        } else {
            4.0 + (red - green) / delta
        };
        hue *= 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        hue /= 360.0;
        if hue.is_nan() || hue >= 1.0 {
            hue = 0.0;
        }

        Hsl {
            hue,
            saturation,
            luminance,
        }
    }
}

impl PartialEq for Rgb {
    fn eq(&self, other: &Self) -> bool {
        self.red.to_bits() == other.red.to_bits()
            && self.green.to_bits() == other.green.to_bits()
            && self.blue.to_bits() == other.blue.to_bits()
    }
}

impl Eq for Rgb {}

impl Hash for Rgb {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.red.to_bits().hash(state);
        self.green.to_bits().hash(state);
        self.blue.to_bits().hash(state);
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}

/// Hue, saturation and luminance, each normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
}

impl Hsl {
    pub const fn new(hue: f64, saturation: f64, luminance: f64) -> Self {
        Self {
            hue,
            saturation,
            luminance,
        }
    }

    /// Same hue and saturation, different luminance.
    pub fn with_luminance(self, luminance: f64) -> Self {
        Self { luminance, ..self }
    }

    pub fn to_rgb(self) -> Rgb {
        let Hsl {
            hue,
            saturation,
            luminance,
        } = self;

        if saturation == 0.0 {
            return Rgb::new(luminance, luminance, luminance);
        }

        let t1 = if luminance < 0.5 {
            luminance * (1.0 + saturation)
        } else {
            luminance + saturation - luminance * saturation
        };
        let t2 = 2.0 * luminance - t1;

        let mut red = hue + 1.0 / 3.0;
        if red > 1.0 {
            red -= 1.0;
        }
        let mut blue = hue - 1.0 / 3.0;
        if blue < 0.0 {
            blue += 1.0;
        }

        Rgb::new(
            hue_to_channel(red, t1, t2),
            hue_to_channel(hue, t1, t2),
            hue_to_channel(blue, t1, t2),
        )
    }
}

fn hue_to_channel(t: f64, t1: f64, t2: f64) -> f64 {
    if t * 6.0 < 1.0 {
        t2 + (t1 - t2) * 6.0 * t
    } else if t * 2.0 < 1.0 {
        t1
    } else if t * 3.0 < 2.0 {
        t2 + (t1 - t2) * (2.0 / 3.0 - t) * 6.0
    } else {
        t2
    }
}

/// A color with an alpha channel. Used for text overlays, which are black or
/// white at some opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub const fn new(rgb: Rgb, alpha: f64) -> Self {
        Self { rgb, alpha }
    }

    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Alpha-over composite onto an opaque background. The result is opaque.
    pub fn composite_over(self, background: Rgb) -> Rgb {
        let a = self.alpha;
        let blend = |fg: f64, bg: f64| fg * a + bg * (1.0 - a);
        Rgb::new(
            blend(self.rgb.red, background.red),
            blend(self.rgb.green, background.green),
            blend(self.rgb.blue, background.blue),
        )
    }

    /// Uppercase `RRGGBBAA`.
    pub fn to_hex(self) -> String {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{}{alpha:02X}", self.rgb.to_hex())
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    fn assert_hsl_close(actual: Hsl, expected: Hsl) {
        assert_close(actual.hue, expected.hue, 0.005);
        assert_close(actual.saturation, expected.saturation, 0.005);
        assert_close(actual.luminance, expected.luminance, 0.005);
    }

    #[test]
    fn hsl_round_trips_through_rgb() {
        for degrees in [0.0, 70.0, 121.0, 216.0, 240.0, 241.0, 359.0] {
            let hsl = Hsl::new(degrees / 360.0, 1.0, 0.5);
            assert_hsl_close(hsl.to_rgb().to_hsl(), hsl);
        }
    }

    #[test]
    fn zero_saturation_is_gray() {
        let rgb = Hsl::new(0.3, 0.0, 0.5).to_rgb();
        assert_eq!(rgb, Rgb::new(0.5, 0.5, 0.5));
        assert_hsl_close(rgb.to_hsl(), Hsl::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn zero_luminance_is_black() {
        let hsl = Hsl::new(0.0, 0.5, 0.0).to_rgb().to_hsl();
        assert_hsl_close(hsl, Hsl::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn black_has_zero_hue_not_nan() {
        let hsl = Rgb::BLACK.to_hsl();
        assert_eq!(hsl, Hsl::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn pure_green_to_hsl() {
        assert_hsl_close(Rgb::new(0.0, 1.0, 0.0).to_hsl(), Hsl::new(120.0 / 360.0, 1.0, 0.5));
    }

    #[test]
    fn deep_purple_to_hsl() {
        let hsl = Rgb::from_u8(0x31, 0x1B, 0x92).to_hsl();
        assert_hsl_close(hsl, Hsl::new(251.09 / 360.0, 0.687, 0.339));
    }

    #[test]
    fn near_magenta_to_hsl() {
        let hsl = Rgb::from_u8(255, 0, 254).to_hsl();
        assert_hsl_close(hsl, Hsl::new(300.0 / 360.0, 1.0, 0.5));
    }

    #[test]
    fn hue_just_below_red_wraps_to_zero() {
        let hsl = Rgb::new(1.0, 0.0, 1e-17).to_hsl();
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 1.0);
    }

    #[test]
    fn equality_is_bitwise() {
        assert_eq!(Rgb::new(0.0, 0.0, 0.0), Rgb::BLACK);
        assert_ne!(Rgb::new(-0.0, 0.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn hash_matches_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Rgb::from_u8(10, 20, 30));
        set.insert(Rgb::from_u8(10, 20, 30));
        set.insert(Rgb::from_u8(10, 20, 31));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hex_round_trip() {
        let rgb = Rgb::from_hex("#311B92").unwrap();
        assert_eq!(rgb.to_u8(), [0x31, 0x1B, 0x92]);
        assert_eq!(rgb.to_hex(), "311B92");
        assert_eq!(Rgb::from_hex("ff00fe").unwrap(), Rgb::from_u8(255, 0, 254));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert!(matches!(Rgb::from_hex("12345"), Err(PaletteError::InvalidHex(_))));
        assert!(matches!(Rgb::from_hex("GG0000"), Err(PaletteError::InvalidHex(_))));
    }

    #[test]
    fn composite_over_blends_channels() {
        assert_eq!(Rgba::opaque(Rgb::WHITE).composite_over(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(Rgba::new(Rgb::WHITE, 0.0).composite_over(Rgb::BLACK), Rgb::BLACK);
        assert_eq!(
            Rgba::new(Rgb::WHITE, 0.5).composite_over(Rgb::BLACK),
            Rgb::new(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn overlay_hex_includes_alpha() {
        assert_eq!(Rgba::new(Rgb::BLACK, 0.75).to_hex(), "000000BF");
    }
}
