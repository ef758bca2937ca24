//! Color engine: hex / RGB / HSL conversion and brand palette derivation.
//!
//! The brand palette is a fixed ladder of ten shades derived from one base
//! color. Hue and saturation are held constant and only lightness moves:
//!
//! ```text
//! index      1   2   3   4   5   6   7   8   9   10
//! lightness  95  85  75  65  55  45  35  25  15  8
//! ```
//!
//! ## Usage
//!
//! ```
//! use adminshell_core::color::{generate_color_gradations, hex_to_rgb};
//!
//! let rgb = hex_to_rgb("#ABCDEF").unwrap();
//! assert_eq!((rgb.r, rgb.g, rgb.b), (171, 205, 239));
//!
//! let palette = generate_color_gradations("#0052d9");
//! assert_eq!(palette.get(1), Some("#e5efff"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{ShellError, ShellResult};

/// Number of shades in a brand palette
pub const PALETTE_SIZE: usize = 10;

/// HSL lightness (percent) of each palette shade, lightest first
pub const GRADATION_LIGHTNESS: [f64; PALETTE_SIZE] =
    [95.0, 85.0, 75.0, 65.0, 55.0, 45.0, 35.0, 25.0, 15.0, 8.0];

/// Base color used when no theme has been configured
pub const DEFAULT_PRIMARY_COLOR: &str = "#0052d9";

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_rgb(hex)
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| ShellError::InvalidColor(s.to_string()))
    }
}

/// HSL color: hue in degrees `[0, 360)`, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Same hue and saturation, different lightness.
    pub const fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.1}, {:.1}%, {:.1}%)", self.h, self.s, self.l)
    }
}

/// Parse a `#rrggbb` color into its channels.
///
/// The leading `#` is optional and digits are case-insensitive. Anything
/// else (including `#rgb` shorthand) yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format channels as lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_string()
}

/// Standard RGB to HSL conversion.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // achromatic
    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Standard HSL to RGB conversion, channels rounded to the nearest integer.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h / 360.0;
    let s = s / 100.0;
    let l = l / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(unit: f64) -> u8 {
    // clamp keeps the cast lossless
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Ten brand shades keyed `1..=10`, lightest first.
///
/// Serializes as a JSON object `{"1": "#...", ..., "10": "#..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    shades: [String; PALETTE_SIZE],
}

impl Palette {
    /// A palette with the same value in every slot.
    pub fn uniform(color: &str) -> Self {
        Self {
            shades: std::array::from_fn(|_| color.to_string()),
        }
    }

    /// Shade at a 1-based index.
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.shades.get(i))
            .map(String::as_str)
    }

    /// `(index, color)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.shades
            .iter()
            .enumerate()
            .map(|(i, color)| (i + 1, color.as_str()))
    }

    pub fn lightest(&self) -> &str {
        &self.shades[0]
    }

    pub fn darkest(&self) -> &str {
        &self.shades[PALETTE_SIZE - 1]
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Derive the ten-shade palette, reporting invalid input as an error.
pub fn try_generate_color_gradations(base_color: &str) -> ShellResult<Palette> {
    let hsl = hex_to_rgb(base_color)
        .ok_or_else(|| ShellError::InvalidColor(base_color.to_string()))?
        .to_hsl();

    let shades = GRADATION_LIGHTNESS.map(|l| hsl.with_lightness(l).to_rgb().to_hex());
    Ok(Palette { shades })
}

/// Derive the ten-shade palette from a base color.
///
/// Never fails: when `base_color` cannot be parsed the error is logged and
/// every slot holds `base_color` verbatim.
pub fn generate_color_gradations(base_color: &str) -> Palette {
    match try_generate_color_gradations(base_color) {
        Ok(palette) => palette,
        Err(e) => {
            tracing::error!(base_color, error = %e, "Failed to generate color gradations");
            Palette::uniform(base_color)
        }
    }
}

/// Built-in brand colors offered by the theme picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetColor {
    Blue,
    Green,
    Orange,
    Red,
    Purple,
    Cyan,
    Pink,
    Yellow,
}

impl PresetColor {
    pub const ALL: [PresetColor; 8] = [
        PresetColor::Blue,
        PresetColor::Green,
        PresetColor::Orange,
        PresetColor::Red,
        PresetColor::Purple,
        PresetColor::Cyan,
        PresetColor::Pink,
        PresetColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PresetColor::Blue => "blue",
            PresetColor::Green => "green",
            PresetColor::Orange => "orange",
            PresetColor::Red => "red",
            PresetColor::Purple => "purple",
            PresetColor::Cyan => "cyan",
            PresetColor::Pink => "pink",
            PresetColor::Yellow => "yellow",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            PresetColor::Blue => DEFAULT_PRIMARY_COLOR,
            PresetColor::Green => "#00a870",
            PresetColor::Orange => "#ed7b2f",
            PresetColor::Red => "#e34d59",
            PresetColor::Purple => "#834ec2",
            PresetColor::Cyan => "#029cd4",
            PresetColor::Pink => "#ed49b4",
            PresetColor::Yellow => "#e37318",
        }
    }

    /// Look up a preset by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_parses_uppercase() {
        assert_eq!(hex_to_rgb("#ABCDEF"), Some(Rgb::new(171, 205, 239)));
    }

    #[test]
    fn test_hex_to_rgb_hash_is_optional() {
        assert_eq!(hex_to_rgb("0052d9"), Some(Rgb::new(0, 82, 217)));
    }

    #[test]
    fn test_hex_to_rgb_rejects_bad_input() {
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(hex_to_rgb("#abc"), None);
        assert_eq!(hex_to_rgb("#abcde"), None);
        assert_eq!(hex_to_rgb("#abcdef0"), None);
        assert_eq!(hex_to_rgb("##abcdef"), None);
        assert_eq!(hex_to_rgb("#+bcdef"), None);
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#ääää"), None);
    }

    #[test]
    fn test_rgb_to_hex_zero_pads() {
        assert_eq!(rgb_to_hex(0, 5, 255), "#0005ff");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    }

    #[test]
    fn test_hex_roundtrip_lowercases() {
        let rgb = hex_to_rgb("#ABCDEF").unwrap();
        assert_eq!(rgb_to_hex(rgb.r, rgb.g, rgb.b), "#abcdef");
    }

    #[test]
    fn test_rgb_to_hsl_primary_colors() {
        let red = rgb_to_hsl(255, 0, 0);
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

        let green = rgb_to_hsl(0, 255, 0);
        assert_eq!((green.h, green.s, green.l), (120.0, 100.0, 50.0));

        let blue = rgb_to_hsl(0, 0, 255);
        assert_eq!((blue.h, blue.s, blue.l), (240.0, 100.0, 50.0));
    }

    #[test]
    fn test_rgb_to_hsl_achromatic() {
        let gray = rgb_to_hsl(128, 128, 128);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.l - 50.196).abs() < 0.001);
    }

    #[test]
    fn test_rgb_to_hsl_wraps_negative_hue() {
        // magenta-ish: red is max and g < b
        let hsl = rgb_to_hsl(255, 0, 128);
        assert!(hsl.h > 300.0 && hsl.h < 360.0);
    }

    #[test]
    fn test_hsl_to_rgb_known_values() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), Rgb::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0), Rgb::new(255, 255, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_default_palette_matches_known_shades() {
        let palette = generate_color_gradations(DEFAULT_PRIMARY_COLOR);
        let shades: Vec<_> = palette.iter().map(|(_, c)| c).collect();
        assert_eq!(
            shades,
            vec![
                "#e5efff", "#b3cfff", "#80b0ff", "#4d90ff", "#1a70ff", "#0057e6", "#0043b3",
                "#003080", "#001d4d", "#000f29",
            ]
        );
    }

    #[test]
    fn test_palette_lightness_descends_and_hue_holds() {
        let base = rgb_to_hsl(0x00, 0x52, 0xd9);
        let palette = generate_color_gradations("#0052d9");

        let first = hex_to_rgb(palette.get(1).unwrap()).unwrap().to_hsl();
        let last = hex_to_rgb(palette.get(10).unwrap()).unwrap().to_hsl();
        assert!(first.l > last.l);

        for (index, color) in palette.iter() {
            let hsl = hex_to_rgb(color).unwrap().to_hsl();
            assert!((hsl.h - base.h).abs() < 1.0, "hue drift at shade {}", index);
            assert!((hsl.s - base.s).abs() < 1.0, "saturation drift at shade {}", index);
        }
    }

    #[test]
    fn test_gray_palette_stays_gray() {
        let palette = generate_color_gradations("#808080");
        assert_eq!(palette.lightest(), "#f2f2f2");
        assert_eq!(palette.darkest(), "#141414");
        for (_, color) in palette.iter() {
            let rgb = hex_to_rgb(color).unwrap();
            assert!(rgb.r == rgb.g && rgb.g == rgb.b);
        }
    }

    #[test]
    fn test_invalid_base_falls_back_to_raw_string() {
        let palette = generate_color_gradations("not-a-color");
        assert_eq!(palette.iter().count(), PALETTE_SIZE);
        for (_, color) in palette.iter() {
            assert_eq!(color, "not-a-color");
        }
    }

    #[test]
    fn test_try_generate_reports_invalid_color() {
        let err = try_generate_color_gradations("#12").unwrap_err();
        assert!(matches!(err, ShellError::InvalidColor(ref s) if s == "#12"));
    }

    #[test]
    fn test_palette_index_bounds() {
        let palette = Palette::uniform("#000000");
        assert!(palette.get(0).is_none());
        assert!(palette.get(1).is_some());
        assert!(palette.get(10).is_some());
        assert!(palette.get(11).is_none());
    }

    #[test]
    fn test_palette_serializes_as_indexed_object() {
        let palette = generate_color_gradations("#0052d9");
        let json = serde_json::to_value(&palette).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 10);
        assert_eq!(object["1"], "#e5efff");
        assert_eq!(object["10"], "#000f29");
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(PresetColor::from_name("Green"), Some(PresetColor::Green));
        assert_eq!(PresetColor::from_name("teal"), None);
        assert_eq!(PresetColor::Blue.hex(), DEFAULT_PRIMARY_COLOR);
        for preset in PresetColor::ALL {
            assert!(hex_to_rgb(preset.hex()).is_some());
        }
    }

    #[test]
    fn test_rgb_from_str() {
        let rgb: Rgb = "#00a870".parse().unwrap();
        assert_eq!(rgb, Rgb::new(0, 168, 112));
        assert!("teal".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hsl_display() {
        assert_eq!(Hsl::new(217.327, 100.0, 42.549).to_string(), "hsl(217.3, 100.0%, 42.5%)");
    }
}
