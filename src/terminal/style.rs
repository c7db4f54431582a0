use crossterm::style::Color;
use serde::Deserialize;

/// A colour in HSL space.
/// hue: 0-360, saturation: 0-100, lightness: 0-100
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self { hue, saturation, lightness }
    }

    pub fn to_color(self) -> Color {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

/// Colours used to paint the grid
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Characters of the word that are shown literally
    pub revealed: Hsl,
    /// Scrambled characters
    pub noise: Hsl,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self { revealed: Hsl::new(120.0, 90.0, 55.0), noise: Hsl::new(120.0, 30.0, 25.0) }
    }
}

/// Convert HSL to RGB color
/// H: hue (0-360), S: saturation (0-100), L: lightness (0-100)
pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::Rgb { r: ((r + m) * 255.0).round() as u8, g: ((g + m) * 255.0).round() as u8, b: ((b + m) * 255.0).round() as u8 }
}
