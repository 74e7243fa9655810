//! Bullet-list layout and drawing.
//!
//! Extends the single-string fitter to a list of bullet blocks under a
//! vertical budget. Degradation order: shrink the font, then drop whole
//! trailing bullets. A bullet is never partially rendered.

use image::RgbImage;
use log::debug;

use crate::card::color::Rgb;
use crate::card::text::{resolve_font, wrap_text, CardFont};
use crate::CANVAS;

/// Space reserved for the marker and text indent inside the width budget.
const MARKER_RESERVE: u32 = 36;
/// Minimum per-line advance used when budgeting block heights.
const MIN_LINE_HEIGHT: u32 = 28;
/// Vertical cost added per bullet block during budgeting.
const BLOCK_PADDING: u32 = 12;
const MARKER_RADIUS: i32 = 6;

/// Height one bullet block contributes to the budget.
fn block_height(font: &CardFont, lines: &[String]) -> u32 {
    font.line_height().max(MIN_LINE_HEIGHT) * lines.len() as u32 + BLOCK_PADDING
}

/// Wrap every bullet at the largest size whose total height fits.
///
/// Sizes descend from `start_size` to `min_size` in steps of 2. When even
/// the minimum size overflows `max_height`, whole bullets are kept in order
/// while the running total fits; the first overflowing bullet and all
/// after it are dropped.
pub fn layout_bullets(
    bullets: &[String],
    font_name: Option<&str>,
    max_width: u32,
    max_height: u32,
    start_size: u32,
    min_size: u32,
) -> (CardFont, Vec<Vec<String>>) {
    let wrap_width = max_width.saturating_sub(MARKER_RESERVE);

    let mut font = resolve_font(font_name, min_size as f32);
    let mut wrapped: Vec<Vec<String>> = Vec::new();
    let mut fits = false;

    let mut size = i64::from(start_size);
    while size >= i64::from(min_size) {
        font = resolve_font(font_name, size as f32);
        wrapped = bullets
            .iter()
            .map(|b| wrap_text(b, &font, wrap_width))
            .collect();
        let total: u32 = wrapped.iter().map(|lines| block_height(&font, lines)).sum();
        if total <= max_height {
            fits = true;
            break;
        }
        size -= 2;
    }

    if !fits {
        let mut kept = Vec::new();
        let mut total = 0u32;
        for lines in wrapped {
            let block = block_height(&font, &lines);
            if total + block > max_height {
                break;
            }
            total += block;
            kept.push(lines);
        }
        debug!(
            "bullet budget exceeded at minimum size; keeping {} of {} bullets",
            kept.len(),
            bullets.len()
        );
        wrapped = kept;
    }

    (font, wrapped)
}

fn fill_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
                continue;
            }
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x as u32, y as u32, image::Rgb([color.0, color.1, color.2]));
            }
        }
    }
}

/// Draw laid-out bullet blocks starting at `start_y`; returns the vertical
/// cursor after the last block.
pub fn draw_bullets(
    img: &mut RgbImage,
    start_y: u32,
    wrapped: &[Vec<String>],
    font: &CardFont,
    fg: Rgb,
    content_x: u32,
) -> u32 {
    let mut y = start_y;
    let lh = font.line_height();
    for lines in wrapped {
        // marker centered on the first wrapped line
        let cy = y as i32 + lh as i32 / 2;
        fill_circle(img, content_x as i32 + MARKER_RADIUS, cy, MARKER_RADIUS, fg);
        let tx = content_x + CANVAS.bullet_indent;
        for line in lines {
            font.draw(img, tx as i32, y as i32, line, fg);
            y += lh;
        }
        y += CANVAS.bullet_gap;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn roomy_budget_keeps_every_bullet_at_start_size() {
        let items = bullets(&["Search", "Open", "Buy"]);
        let (font, wrapped) = layout_bullets(&items, None, 1000, 5000, 40, 24);
        assert_eq!(wrapped.len(), 3);
        let total: u32 = wrapped.iter().map(|l| block_height(&font, l)).sum();
        assert!(total <= 5000);
    }

    #[test]
    fn tight_budget_drops_whole_trailing_bullets() {
        let items = bullets(&["one", "two", "three", "four", "five"]);
        // Height for roughly one block at the minimum size.
        let (font, wrapped) = layout_bullets(&items, None, 1000, 45, 40, 24);
        assert!(wrapped.len() < items.len());
        let total: u32 = wrapped.iter().map(|l| block_height(&font, l)).sum();
        assert!(total <= 45);
        // whichever bullets survive are complete
        for (kept, original) in wrapped.iter().zip(items.iter()) {
            assert_eq!(kept.join(" "), *original);
        }
    }

    #[test]
    fn zero_budget_renders_nothing() {
        let items = bullets(&["something"]);
        let (_, wrapped) = layout_bullets(&items, None, 1000, 0, 40, 24);
        assert!(wrapped.is_empty());
    }

    #[test]
    fn draw_advances_cursor_past_every_block() {
        let items = bullets(&["alpha", "beta"]);
        let (font, wrapped) = layout_bullets(&items, None, 1000, 5000, 40, 24);
        let mut img = RgbImage::from_pixel(1200, 630, image::Rgb([0, 0, 0]));
        let end = draw_bullets(&mut img, 100, &wrapped, &font, (255, 255, 255), 72);
        let expected: u32 = wrapped
            .iter()
            .map(|l| font.line_height() * l.len() as u32 + CANVAS.bullet_gap)
            .sum();
        assert_eq!(end, 100 + expected);
        // the marker left a lit pixel at the first line's center
        let cy = 100 + font.line_height() / 2;
        assert_eq!(*img.get_pixel(72 + MARKER_RADIUS as u32, cy), image::Rgb([255, 255, 255]));
    }
}
