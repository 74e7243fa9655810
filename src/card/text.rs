//! Font resolution, text measurement and adaptive fitting.
//!
//! Font loading walks an ordered candidate list and bottoms out in a
//! built-in 8x8 bitmap face that cannot fail to load, so every caller
//! always gets a usable font. Fitting shrinks the size until the wrapped
//! text meets its line and width budget, degrading to truncation when even
//! the minimum size overflows.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use font8x8::legacy::BASIC_LEGACY;
use image::RgbImage;
use log::debug;
use rusttype::{point, Font, Scale};

use crate::card::color::Rgb;

const FONT_EXTENSIONS: [&str; 2] = [".ttf", ".otf"];
const GENERIC_FALLBACKS: [&str; 4] = ["Inter.ttf", "Arial.ttf", "Helvetica.ttf", "DejaVuSans.ttf"];

/// Cell size of the built-in bitmap face.
const BUILTIN_CELL: u32 = 8;

static FONT_CACHE: OnceLock<Mutex<HashMap<String, Option<Font<'static>>>>> = OnceLock::new();

/// A font resolved for one candidate size.
///
/// Either a TrueType face with a uniform scale, or the guaranteed built-in
/// bitmap face scaled by an integer factor.
#[derive(Clone)]
pub enum CardFont {
    Truetype { font: Font<'static>, size: f32 },
    Builtin { scale: u32 },
}

fn font_cache() -> &'static Mutex<HashMap<String, Option<Font<'static>>>> {
    FONT_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn load_truetype(candidate: &str) -> Option<Font<'static>> {
    if let Ok(cache) = font_cache().lock() {
        if let Some(cached) = cache.get(candidate) {
            return cached.clone();
        }
    }
    let mut paths = vec![PathBuf::from(candidate)];
    paths.push(PathBuf::from("fonts").join(candidate));
    let loaded = paths.iter().find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        Font::try_from_vec(bytes)
    });
    if let Ok(mut cache) = font_cache().lock() {
        cache.insert(candidate.to_string(), loaded.clone());
    }
    loaded
}

fn has_font_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    FONT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Resolve a font for the requested name and pixel size.
///
/// Candidates are tried in order: the name as given, derived filename
/// variants when it lacks a font extension, then a fixed list of generic
/// faces. Each candidate is looked up as a path and under `fonts/`. When
/// nothing loads, the built-in bitmap face is returned, so this function
/// is total.
pub fn resolve_font(name: Option<&str>, size: f32) -> CardFont {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(name) = name {
        candidates.push(name.to_string());
        if !has_font_extension(name) {
            candidates.push(format!("{name}.ttf"));
            candidates.push(format!("{name}-Regular.ttf"));
            candidates.push(format!("{name}-Medium.ttf"));
        }
    }
    candidates.extend(GENERIC_FALLBACKS.iter().map(|s| s.to_string()));

    for candidate in &candidates {
        if let Some(font) = load_truetype(candidate) {
            return CardFont::Truetype { font, size };
        }
    }
    debug!("no TrueType candidate loaded for {:?}; using builtin face", name);
    let scale = ((size / BUILTIN_CELL as f32).round() as u32).max(1);
    CardFont::Builtin { scale }
}

impl CardFont {
    /// Pixel width and height of a single line of text.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            CardFont::Truetype { font, size } => {
                let scale = Scale::uniform(*size);
                let v = font.v_metrics(scale);
                let height = (v.ascent - v.descent).ceil().max(1.0) as u32;
                let glyphs: Vec<_> = font.layout(text, scale, point(0.0, v.ascent)).collect();
                let width = glyphs
                    .iter()
                    .filter_map(|g| g.pixel_bounding_box())
                    .map(|bb| bb.max.x)
                    .max()
                    .unwrap_or(0)
                    .max(0) as u32;
                (width, height)
            }
            CardFont::Builtin { scale } => {
                let cell = BUILTIN_CELL * scale;
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }

    /// Height used when advancing between lines of this font.
    pub fn line_height(&self) -> u32 {
        self.measure("Ag").1
    }

    /// Draw one line with its top-left corner at `(x, y)`, alpha-blending
    /// glyph coverage over the existing canvas.
    pub fn draw(&self, img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb) {
        match self {
            CardFont::Truetype { font, size } => {
                let scale = Scale::uniform(*size);
                let v = font.v_metrics(scale);
                let glyphs = font.layout(text, scale, point(x as f32, y as f32 + v.ascent));
                for glyph in glyphs {
                    let Some(bb) = glyph.pixel_bounding_box() else { continue };
                    glyph.draw(|gx, gy, coverage| {
                        let px = gx as i32 + bb.min.x;
                        let py = gy as i32 + bb.min.y;
                        blend_pixel(img, px, py, color, coverage);
                    });
                }
            }
            CardFont::Builtin { scale } => {
                let cell = (BUILTIN_CELL * scale) as i32;
                let mut caret = x;
                for ch in text.chars() {
                    if let Some(bitmap) = BASIC_LEGACY.get(ch as usize) {
                        for (row, bits) in bitmap.iter().enumerate() {
                            for col in 0..8 {
                                if bits & (1 << col) == 0 {
                                    continue;
                                }
                                let sx = caret + col as i32 * *scale as i32;
                                let sy = y + row as i32 * *scale as i32;
                                for dy in 0..*scale as i32 {
                                    for dx in 0..*scale as i32 {
                                        blend_pixel(img, sx + dx, sy + dy, color, 1.0);
                                    }
                                }
                            }
                        }
                    }
                    caret += cell;
                }
            }
        }
    }
}

fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() || coverage <= 0.0 {
        return;
    }
    let a = coverage.min(1.0);
    let inv = 1.0 - a;
    let dst = img.get_pixel_mut(x, y);
    dst.0[0] = (f32::from(color.0) * a + f32::from(dst.0[0]) * inv) as u8;
    dst.0[1] = (f32::from(color.1) * a + f32::from(dst.0[1]) * inv) as u8;
    dst.0[2] = (f32::from(color.2) * a + f32::from(dst.0[2]) * inv) as u8;
}

/// Greedy word wrap against a pixel width budget.
///
/// A word that alone exceeds the budget is kept on its own line rather than
/// split; empty input yields a single empty line.
pub fn wrap_text(text: &str, font: &CardFont, max_width: u32) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in words {
        let mut test = current.clone();
        test.push(word);
        let (width, _) = font.measure(&test.join(" "));
        if width <= max_width || current.is_empty() {
            current.push(word);
        } else {
            lines.push(current.join(" "));
            current = vec![word];
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Fit text into a line/width budget by shrinking the font.
///
/// Candidate sizes descend from `start_size` to `min_size` in steps of 2;
/// the first size whose wrapped output stays within both budgets wins. When
/// none does, the text is wrapped at `min_size` and truncated to
/// `max_lines`, tolerating width overflow rather than failing.
pub fn fit_text(
    text: &str,
    max_width: u32,
    max_lines: usize,
    start_size: u32,
    min_size: u32,
    font_name: Option<&str>,
) -> (CardFont, Vec<String>) {
    let mut size = i64::from(start_size);
    while size >= i64::from(min_size) {
        let font = resolve_font(font_name, size as f32);
        let lines = wrap_text(text, &font, max_width);
        if lines.len() <= max_lines && lines.iter().all(|l| font.measure(l).0 <= max_width) {
            return (font, lines);
        }
        size -= 2;
    }
    debug!("text does not fit at minimum size; truncating to {max_lines} lines");
    let font = resolve_font(font_name, min_size as f32);
    let mut lines = wrap_text(text, &font, max_width);
    lines.truncate(max_lines);
    (font, lines)
}
