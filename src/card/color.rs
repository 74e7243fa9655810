//! Color and contrast math for card rendering.
//!
//! Everything here is total: malformed input yields `None`, never a panic.
//! Contrast follows the WCAG relative-luminance ratio.

/// An opaque RGB color; one byte per channel, no alpha.
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const BLACK: Rgb = (0, 0, 0);

/// Parse a `#rrggbb` hex string into an RGB triple.
///
/// Only the exact 7-character form (after a single trim) is accepted; any
/// other input yields `None`.
pub fn hex_to_rgb(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let digits = s.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format an RGB triple as a lowercase `#rrggbb` string.
///
/// Canonical inverse of [`hex_to_rgb`]; used as the key form for color
/// frequency tables.
pub fn rgb_to_hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}

/// Linear interpolation between two colors with `t` clamped to `[0, 1]`.
/// Output channels are truncated, not rounded.
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t) as u8;
    (ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

/// WCAG sRGB relative luminance in `[0, 1]`.
pub fn rel_luminance(c: Rgb) -> f64 {
    fn channel(v: u8) -> f64 {
        let v = f64::from(v) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(c.0) + 0.7152 * channel(c.1) + 0.0722 * channel(c.2)
}

/// WCAG contrast ratio between two colors. Symmetric; self-contrast is 1.0.
pub fn contrast(a: Rgb, b: Rgb) -> f64 {
    let la = rel_luminance(a);
    let lb = rel_luminance(b);
    let (l1, l2) = if la > lb { (la, lb) } else { (lb, la) };
    (l1 + 0.05) / (l2 + 0.05)
}

/// Pick white or black, whichever reads better on `bg`. Ties favor white.
pub fn best_fg_for_bg(bg: Rgb) -> Rgb {
    if contrast(bg, WHITE) >= contrast(bg, BLACK) {
        WHITE
    } else {
        BLACK
    }
}

/// Whether a color is grayscale-like (near-gray, near-white or near-black)
/// and therefore a poor candidate for a brand primary.
pub fn is_neutral(c: Rgb) -> bool {
    let max = c.0.max(c.1).max(c.2);
    let min = c.0.min(c.1).min(c.2);
    if max - min <= 8 {
        return true;
    }
    let lum = rel_luminance(c);
    lum >= 0.92 || lum <= 0.08
}
