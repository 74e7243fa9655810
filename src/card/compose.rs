//! Final card composition: style resolution, title and bullet drawing,
//! PNG encoding.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::brief::Brief;
use crate::card::bullets::{draw_bullets, layout_bullets};
use crate::card::color::{contrast, is_neutral, rel_luminance, BLACK, WHITE};
use crate::card::style::derive_style;
use crate::card::text::fit_text;
use crate::card::{Align, Style, StyleOverride};
use crate::error::{Error, Result};
use crate::flow::Flow;
use crate::CANVAS;

const TITLE_MAX_LINES: usize = 2;
const TITLE_START_SIZE: u32 = 80;
const TITLE_MIN_SIZE: u32 = 40;
const BULLET_START_SIZE: u32 = 40;
const BULLET_MIN_SIZE: u32 = 24;
const MAX_BULLETS: usize = 5;

const FALLBACK_TITLE: &str = "Arcade Flow";
const PLACEHOLDER_BULLETS: [&str; 3] = ["Step 1", "Step 2", "Step 3"];

/// Three-tier style resolution: explicit override, else flow derivation,
/// else the hardcoded defaults (which derivation produces for an absent
/// flow).
fn resolve_style(flow: Option<&Flow>, over: Option<&StyleOverride>) -> Style {
    let derived = derive_style(flow);
    match over {
        Some(over) => Style::from_override(over, derived),
        None => derived,
    }
}

/// Compose-time color adjustments.
///
/// Promotion: a neutral background paired with a brand-looking primary is
/// replaced by the primary when the primary reads well against white or
/// black. This intentionally applies to explicitly overridden styles too.
/// Afterwards a dark background always forces white text.
fn adjust_colors(style: &mut Style) {
    if is_neutral(style.bg) && !is_neutral(style.primary) {
        let cw = contrast(style.primary, WHITE);
        let cb = contrast(style.primary, BLACK);
        if cw.max(cb) >= 4.5 {
            debug!("promoting primary {:?} to background", style.primary);
            style.bg = style.primary;
            style.fg = if cw >= cb { WHITE } else { BLACK };
        }
    }
    if rel_luminance(style.bg) < 0.2 {
        style.fg = WHITE;
    }
}

fn title_x(align: Align, line_width: u32) -> u32 {
    match align {
        Align::Left => CANVAS.pad_x,
        Align::Right => CANVAS.width.saturating_sub(CANVAS.pad_x + line_width),
        Align::Center => CANVAS.width.saturating_sub(line_width) / 2,
    }
}

/// Render a brief onto a fresh canvas. Pure and deterministic; the only
/// fallible part of composition is writing the result out.
pub fn render(brief: &Brief, flow: Option<&Flow>, over: Option<&StyleOverride>) -> RgbImage {
    let mut style = resolve_style(flow, over);
    adjust_colors(&mut style);

    let bg = image::Rgb([style.bg.0, style.bg.1, style.bg.2]);
    let mut img = RgbImage::from_pixel(CANVAS.width, CANVAS.height, bg);

    let content_width = CANVAS.width - CANVAS.pad_x * 2;

    // Title
    let overlay = brief.overlay.trim();
    let overlay = if overlay.is_empty() { FALLBACK_TITLE } else { overlay };
    let (title_font, title_lines) = fit_text(
        overlay,
        content_width,
        TITLE_MAX_LINES,
        TITLE_START_SIZE,
        TITLE_MIN_SIZE,
        style.font.as_deref(),
    );

    let mut y = CANVAS.pad_top;
    for line in &title_lines {
        let (tw, th) = title_font.measure(line);
        title_font.draw(&mut img, title_x(style.align, tw) as i32, y as i32, line, style.fg);
        y += th + 8;
    }

    y += CANVAS.pad_between;

    // Bullets
    let mut bullets: Vec<String> = brief
        .elements
        .iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .take(MAX_BULLETS)
        .collect();
    if bullets.is_empty() {
        bullets = PLACEHOLDER_BULLETS.iter().map(|s| s.to_string()).collect();
    }

    let body_max_height = CANVAS.height.saturating_sub(y + CANVAS.pad_top);
    let (body_font, wrapped) = layout_bullets(
        &bullets,
        style.font.as_deref(),
        content_width,
        body_max_height,
        BULLET_START_SIZE,
        BULLET_MIN_SIZE,
    );
    draw_bullets(&mut img, y, &wrapped, &body_font, style.fg, CANVAS.pad_x);

    img
}

/// Render a brief and stream the PNG into `writer`.
pub fn compose_to_writer<W: Write + Seek>(
    brief: &Brief,
    writer: &mut W,
    flow: Option<&Flow>,
    over: Option<&StyleOverride>,
) -> Result<()> {
    let img = render(brief, flow, over);
    img.write_to(writer, ImageFormat::Png)
        .map_err(|e| Error::EncodeError(e.to_string()))
}

/// Render a brief and write the PNG to `path`.
///
/// Success is signaled by the write completing; a failing sink is the only
/// error composition can surface.
pub fn compose(
    brief: &Brief,
    path: &Path,
    flow: Option<&Flow>,
    over: Option<&StyleOverride>,
) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::SinkError(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    compose_to_writer(brief, &mut writer, flow, over)?;
    writer
        .flush()
        .map_err(|e| Error::SinkError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::color::Rgb;

    fn count_pixels(img: &RgbImage, color: Rgb) -> usize {
        img.pixels()
            .filter(|p| p.0 == [color.0, color.1, color.2])
            .count()
    }

    #[test]
    fn canvas_has_fixed_dimensions() {
        let brief = Brief::default();
        let img = render(&brief, None, None);
        assert_eq!((img.width(), img.height()), (1200, 630));
    }

    #[test]
    fn promotion_overrides_neutral_background() {
        let over = StyleOverride {
            primary: Some([33, 66, 231]),
            bg: Some([128, 128, 128]),
            fg: Some([0, 0, 0]),
            ..Default::default()
        };
        let mut style = resolve_style(None, Some(&over));
        adjust_colors(&mut style);
        assert_eq!(style.bg, (33, 66, 231));
        assert_eq!(style.fg, WHITE);
    }

    #[test]
    fn promotion_picks_the_stronger_contrast_side() {
        // pure red contrasts better with black (5.25) than white (4.0)
        let over = StyleOverride {
            primary: Some([255, 0, 0]),
            bg: Some([128, 128, 128]),
            ..Default::default()
        };
        let mut style = resolve_style(None, Some(&over));
        adjust_colors(&mut style);
        assert_eq!(style.bg, (255, 0, 0));
        assert_eq!(style.fg, BLACK);
    }

    #[test]
    fn non_neutral_override_background_is_respected() {
        let over = StyleOverride {
            primary: Some([255, 0, 0]),
            bg: Some([0, 80, 200]),
            fg: Some([255, 255, 255]),
            ..Default::default()
        };
        let mut style = resolve_style(None, Some(&over));
        adjust_colors(&mut style);
        assert_eq!(style.bg, (0, 80, 200));
    }

    #[test]
    fn dark_background_forces_white_text() {
        let over = StyleOverride {
            primary: Some([10, 10, 14]),
            bg: Some([10, 10, 14]),
            fg: Some([0, 0, 0]),
            ..Default::default()
        };
        let mut style = resolve_style(None, Some(&over));
        adjust_colors(&mut style);
        assert_eq!(style.fg, WHITE);
    }

    #[test]
    fn empty_brief_renders_placeholder_card() {
        let brief = Brief { overlay: String::new(), elements: vec![] };
        let img = render(&brief, None, None);
        // default style promotes the blue primary; white glyphs land on it
        assert!(count_pixels(&img, WHITE) > 0);
        assert!(count_pixels(&img, (33, 66, 231)) > 0);
    }

    #[test]
    fn title_alignment_positions() {
        assert_eq!(title_x(Align::Left, 100), CANVAS.pad_x);
        assert_eq!(title_x(Align::Right, 100), CANVAS.width - CANVAS.pad_x - 100);
        assert_eq!(title_x(Align::Center, 100), (CANVAS.width - 100) / 2);
    }
}
