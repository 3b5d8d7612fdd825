//! The fixed 12-color palette and CSS color parsing for the drawing surface.

use crate::error::{ChartError, Result};

/// Default series/segment colors, in cycling order.
pub const DEFAULT_COLORS: [&str; 12] = [
    "#4A90E2", // blue
    "#50C878", // emerald
    "#FF6B6B", // coral
    "#FFD93D", // yellow
    "#A29BFE", // lavender
    "#FD79A8", // pink
    "#FDCB6E", // sand
    "#00B894", // teal
    "#6C5CE7", // violet
    "#E17055", // terracotta
    "#74B9FF", // sky
    "#55EFC4", // mint
];

/// Border drawn between slices of segment-based charts.
pub const SEGMENT_BORDER: &str = "#fff";

/// Immutable ordered color palette.
///
/// Injected into both the renderer and the settings builder so they cycle the
/// same colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: &DEFAULT_COLORS,
        }
    }
}

impl Palette {
    /// Palette over a custom static color list. Empty lists fall back to the default.
    pub fn new(colors: &'static [&'static str]) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Color at `idx`, cycling.
    #[inline]
    pub fn color(&self, idx: usize) -> &'static str {
        self.colors[idx % self.colors.len()]
    }

    pub fn first(&self) -> &'static str {
        self.colors[0]
    }

    pub fn colors(&self) -> &'static [&'static str] {
        self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// One palette color per index in `0..n`.
    pub fn cycle(&self, n: usize) -> Vec<String> {
        (0..n).map(|i| self.color(i).to_string()).collect()
    }
}

/// RGBA color with 8-bit channels and a float alpha, as plotters expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_plotters(self) -> plotters::style::RGBAColor {
        plotters::style::RGBAColor(self.r, self.g, self.b, self.a)
    }

    /// Normalized `#rrggbb` form (alpha dropped).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parse the CSS color forms the tool produces or accepts from saved data:
/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// and a handful of keywords.
pub fn parse_color(input: &str) -> Result<Rgba> {
    let s = input.trim();
    let invalid = || ChartError::InvalidColor(input.to_string());

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args).ok_or_else(invalid);
    }

    match lower.as_str() {
        "white" => Ok(Rgba::rgb(255, 255, 255)),
        "black" => Ok(Rgba::rgb(0, 0, 0)),
        "red" => Ok(Rgba::rgb(255, 0, 0)),
        "green" => Ok(Rgba::rgb(0, 128, 0)),
        "blue" => Ok(Rgba::rgb(0, 0, 255)),
        "gray" | "grey" => Ok(Rgba::rgb(128, 128, 128)),
        "transparent" => Ok(Rgba::new(0, 0, 0, 0.0)),
        _ => Err(invalid()),
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            nibble(3)? as f64 / 255.0,
        )),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)? as f64 / 255.0,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let a = match parts.get(3) {
        Some(s) => s.parse::<f64>().ok()?.clamp(0.0, 1.0),
        None => 1.0,
    };
    Some(Rgba::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_after_twelve() {
        let p = Palette::default();
        assert_eq!(p.len(), 12);
        assert_eq!(p.color(0), "#4A90E2");
        assert_eq!(p.color(12), "#4A90E2");
        assert_eq!(p.color(13), "#50C878");
        assert_eq!(p.cycle(3), vec!["#4A90E2", "#50C878", "#FF6B6B"]);
    }

    #[test]
    fn empty_custom_palette_falls_back() {
        static NONE: [&str; 0] = [];
        assert_eq!(Palette::new(&NONE), Palette::default());
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#fff").unwrap(), Rgba::rgb(255, 255, 255));
        assert_eq!(parse_color("#4A90E2").unwrap(), Rgba::rgb(0x4A, 0x90, 0xE2));
        let c = parse_color("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#zzz").is_err());
    }

    #[test]
    fn parses_functional_and_keywords() {
        assert_eq!(
            parse_color("rgba(10, 20, 30, 0.5)").unwrap(),
            Rgba::new(10, 20, 30, 0.5)
        );
        assert_eq!(parse_color("RGB(1,2,3)").unwrap(), Rgba::rgb(1, 2, 3));
        assert_eq!(parse_color("white").unwrap(), Rgba::rgb(255, 255, 255));
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(Rgba::rgb(74, 144, 226).to_hex(), "#4A90E2");
    }
}
