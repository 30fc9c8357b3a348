use std::fmt;

use image::Rgba;
use palette::Srgb;

use crate::error::{PlotError, Result};

/// Neutral gray used for reference points (and single-file plots).
pub const REFERENCE_HEX: &str = "#555555";
/// Red used for candidate points.
pub const CANDIDATE_HEX: &str = "#db2525";

// ---------------------------------------------------------------------------
// PlotColor – a colour as the caller wrote it
// ---------------------------------------------------------------------------

/// A marker colour, either by name/hex code or as RGBA components in `[0, 1]`.
/// The renderer resolves both kinds the same way through [`PlotColor::to_rgba`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlotColor {
    /// `#rrggbb`, `#rgb`, or an SVG colour name such as `gray`. Fully opaque.
    Named(String),
    Rgba { r: f32, g: f32, b: f32, a: f32 },
}

impl PlotColor {
    pub fn named(name: &str) -> Self {
        PlotColor::Named(name.to_string())
    }

    pub fn reference() -> Self {
        PlotColor::named(REFERENCE_HEX)
    }

    pub fn candidate() -> Self {
        PlotColor::named(CANDIDATE_HEX)
    }

    /// Resolve to 8-bit RGBA.
    pub fn to_rgba(&self) -> Result<Rgba<u8>> {
        match self {
            PlotColor::Named(name) => {
                let rgb = parse_named(name)?;
                Ok(Rgba([rgb.red, rgb.green, rgb.blue, 255]))
            }
            PlotColor::Rgba { r, g, b, a } => {
                let channels = [*r, *g, *b, *a];
                if channels.iter().any(|c| !(0.0..=1.0).contains(c)) {
                    return Err(PlotError::Color(format!(
                        "components of {self} must lie in [0, 1]"
                    )));
                }
                Ok(Rgba(channels.map(|c| (c * 255.0).round() as u8)))
            }
        }
    }

    /// Same hue with the given opacity.
    pub fn with_alpha(&self, alpha: f64) -> Result<PlotColor> {
        let Rgba([r, g, b, _]) = self.to_rgba()?;
        Ok(PlotColor::Rgba {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: alpha as f32,
        })
    }
}

impl fmt::Display for PlotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotColor::Named(name) => write!(f, "{name}"),
            PlotColor::Rgba { r, g, b, a } => write!(f, "rgba({r:.3}, {g:.3}, {b:.3}, {a:.3})"),
        }
    }
}

fn parse_named(name: &str) -> Result<Srgb<u8>> {
    let trimmed = name.trim();
    if trimmed.starts_with('#') {
        return trimmed
            .parse::<Srgb<u8>>()
            .map_err(|e| PlotError::Color(format!("`{name}`: {e}")));
    }
    palette::named::from_str(&trimmed.to_ascii_lowercase())
        .ok_or_else(|| PlotError::Color(format!("unknown colour name `{name}`")))
}
