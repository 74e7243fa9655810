//! Card rendering pipeline: color math, style derivation, text fitting,
//! bullet layout and final composition.

pub mod bullets;
pub mod color;
pub mod compose;
pub mod style;
pub mod text;

use serde::Deserialize;

use crate::card::color::Rgb;

/// Horizontal text alignment for the card title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    /// Parse a loose alignment string; anything unrecognized maps to center.
    pub fn parse(s: &str) -> Align {
        match s.trim().to_lowercase().as_str() {
            "left" => Align::Left,
            "right" => Align::Right,
            _ => Align::Center,
        }
    }
}

/// Resolved color, font and alignment configuration for one composition.
///
/// Immutable once resolved; [`compose`](crate::card::compose::compose) takes
/// it by value and applies its compose-time adjustments to a local copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub primary: Rgb,
    pub bg: Rgb,
    pub fg: Rgb,
    /// Requested font resource name; `None` means "use fallback".
    pub font: Option<String>,
    pub align: Align,
}

/// Externally supplied style override, e.g. from a brand-inference service.
///
/// Channels arrive as `[r, g, b]` arrays; missing fields fall back to the
/// derived or default style values when converted with
/// [`Style::from_override`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleOverride {
    pub primary: Option<[u8; 3]>,
    pub bg: Option<[u8; 3]>,
    pub fg: Option<[u8; 3]>,
    pub font: Option<String>,
    pub align: Option<Align>,
}

impl Style {
    /// Merge an explicit override on top of a base style, field by field.
    pub fn from_override(over: &StyleOverride, base: Style) -> Style {
        Style {
            primary: over.primary.map(|c| (c[0], c[1], c[2])).unwrap_or(base.primary),
            bg: over.bg.map(|c| (c[0], c[1], c[2])).unwrap_or(base.bg),
            fg: over.fg.map(|c| (c[0], c[1], c[2])).unwrap_or(base.fg),
            font: over.font.clone().or(base.font),
            align: over.align.unwrap_or(base.align),
        }
    }
}
