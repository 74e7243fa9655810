//! Flowcard
//!
//! Renders a fixed-size 1200x630 share-card PNG from a short textual brief
//! (headline plus bullet phrases) and style hints derived from a recorded
//! UI-flow description.
//!
//! # Design
//!
//! - **Total rendering core**: malformed colors, missing fonts and
//!   overflowing text degrade to documented fallbacks; only the output
//!   sink can fail a composition.
//! - **Three-tier style resolution**: explicit override, else derivation
//!   from flow signals, else hardcoded defaults.
//! - **Deterministic output**: identical inputs produce byte-identical
//!   PNGs.
//!
//! # Example
//!
//! ```no_run
//! use flowcard::{compose, Brief};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let brief = Brief {
//!     overlay: "Buy a Widget".to_string(),
//!     elements: vec!["Search".into(), "Open".into(), "Buy".into()],
//! };
//! compose(&brief, Path::new("social.png"), None, None)?;
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod brief;
pub mod card;
pub mod error;
pub mod flow;
pub mod prompts;
pub mod report;

pub use ai::{CompletionCache, CompletionProvider};
pub use brief::{parse_brief, Brief};
pub use card::color::Rgb;
pub use card::compose::{compose, compose_to_writer, render};
pub use card::style::derive_style;
pub use card::{Align, Style, StyleOverride};
pub use error::{Error, Result};
pub use flow::{load_flow, Flow};

/// Fixed canvas dimensions and layout constants.
///
/// Global for the process and never mutated; every composition draws onto
/// the same 1200x630 budget.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub pad_x: u32,
    pub pad_top: u32,
    pub pad_between: u32,
    pub bullet_gap: u32,
    pub bullet_indent: u32,
}

pub const CANVAS: CanvasSpec = CanvasSpec {
    width: 1200,
    height: 630,
    pad_x: 72,
    pad_top: 72,
    pad_between: 20,
    bullet_gap: 14,
    bullet_indent: 24,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_constants() {
        assert_eq!(CANVAS.width, 1200);
        assert_eq!(CANVAS.height, 630);
        assert_eq!(CANVAS.pad_x, 72);
        assert_eq!(CANVAS.pad_top, 72);
    }

    #[test]
    fn test_brief_fallback_shape() {
        let b = Brief::fallback();
        assert_eq!(b.overlay, "Arcade Flow");
        assert_eq!(b.elements.len(), 2);
    }
}
