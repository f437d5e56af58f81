// File: crates/dashplot-core/src/palette.rs
// Summary: Light/Dark palettes passed explicitly into chart rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ChartResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || ChartError::InvalidData(format!("invalid hex color '{s}'"));
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2).ok_or_else(bad)?, 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in hex.chars().enumerate() {
                    let d = ch.to_digit(16).ok_or_else(bad)? as u8;
                    c[i] = d * 17;
                }
                Ok(Self::rgb(c[0], c[1], c[2]))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }

    /// Opacity in [0, 1], as used by SVG `fill-opacity`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

/// `#rrggbb` when opaque, CSS `rgba()` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.opacity())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub background: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    /// Line/bar series colors, by series position.
    pub series: Vec<Color>,
    /// Donut slice colors, by slice position (not by value).
    pub slices: Vec<Color>,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: Color::rgb(0xff, 0xff, 0xff),
            grid: Color::rgb(0xe5, 0xe7, 0xeb),
            axis_label: Color::rgb(0x6b, 0x72, 0x80),
            tooltip_background: Color::rgb(0xff, 0xff, 0xff),
            tooltip_text: Color::rgb(0x11, 0x18, 0x27),
            series: vec![
                Color::rgb(0x46, 0x5f, 0xff), // brand
                Color::rgb(0x9c, 0xb9, 0xff),
                Color::rgb(0x12, 0xb7, 0x6a),
            ],
            slices: vec![
                Color::rgb(0x46, 0x5f, 0xff),
                Color::rgb(0x7a, 0x5a, 0xf8),
                Color::rgb(0x0b, 0xa5, 0xec),
                Color::rgb(0xf7, 0x90, 0x09),
                Color::rgb(0xee, 0x46, 0xbc),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: Color::rgb(0x10, 0x18, 0x28),
            grid: Color::rgb(0x1d, 0x29, 0x39),
            axis_label: Color::rgb(0x98, 0xa2, 0xb3),
            tooltip_background: Color::rgb(0x1d, 0x29, 0x39),
            tooltip_text: Color::rgb(0xf2, 0xf4, 0xf7),
            series: vec![
                Color::rgb(0x7a, 0x91, 0xff),
                Color::rgb(0x46, 0x5f, 0xff).with_alpha(160),
                Color::rgb(0x32, 0xd5, 0x83),
            ],
            slices: vec![
                Color::rgb(0x7a, 0x91, 0xff),
                Color::rgb(0x9b, 0x8a, 0xfb),
                Color::rgb(0x36, 0xbf, 0xfa),
                Color::rgb(0xfd, 0xb0, 0x22),
                Color::rgb(0xf4, 0x7a, 0xd4),
            ],
        }
    }

    /// Color for series `index`, wrapping around the list.
    pub fn series_color(&self, index: usize) -> ChartResult<Color> {
        pick(&self.series, index)
    }

    /// Color for slice `index`, wrapping around the list.
    pub fn slice_color(&self, index: usize) -> ChartResult<Color> {
        pick(&self.slices, index)
    }
}

impl Default for Palette {
    fn default() -> Self { Self::light() }
}

fn pick(colors: &[Color], index: usize) -> ChartResult<Color> {
    if colors.is_empty() {
        return Err(ChartError::EmptyPalette);
    }
    Ok(colors[index % colors.len()])
}

/// Return a list of built-in palette presets.
pub fn presets() -> Vec<Palette> {
    vec![Palette::light(), Palette::dark()]
}

/// Find a palette by its `name`, falling back to light.
pub fn find(name: &str) -> Palette {
    presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Palette::light)
}
