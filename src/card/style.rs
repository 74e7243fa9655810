//! Style derivation from flow signals.
//!
//! Turns the loose color/theme/font hints carried by a recorded flow into a
//! fully resolved [`Style`]. Every branch has a default, so derivation never
//! fails regardless of how sparse or malformed the flow is.

use log::debug;

use crate::card::color::{
    best_fg_for_bg, contrast, hex_to_rgb, is_neutral, mix, rgb_to_hex, Rgb, BLACK, WHITE,
};
use crate::card::{Align, Style};
use crate::flow::Flow;

pub const DEFAULT_BG: Rgb = (24, 24, 36);
pub const DEFAULT_FG: Rgb = WHITE;
pub const DEFAULT_PRIMARY: Rgb = (33, 66, 231);

/// Gather every hotspot and path color across all steps, in traversal order.
pub fn candidate_colors(flow: &Flow) -> Vec<&str> {
    let mut colors = Vec::new();
    for step in &flow.steps {
        for hs in &step.hotspots {
            colors.extend(hs.bg_color.as_deref());
            colors.extend(hs.text_color.as_deref());
        }
        for path in &step.paths {
            colors.extend(path.button_color.as_deref());
            colors.extend(path.button_text_color.as_deref());
        }
    }
    colors
}

/// Frequency table keyed by canonical hex, preserving first-seen order so
/// ties resolve deterministically.
#[derive(Default)]
struct ColorCounts {
    entries: Vec<(String, usize)>,
}

impl ColorCounts {
    fn bump(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-count entry; on equal counts the earlier-seen color wins.
    fn winner(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (key, count) in &self.entries {
            if best.map_or(true, |(_, n)| *count > n) {
                best = Some((key, *count));
            }
        }
        best.map(|(key, _)| key)
    }
}

/// Most frequent brand-looking color among the candidates, if any.
///
/// Neutral (grayscale-like) colors are only considered when no non-neutral
/// candidate exists; unparseable values contribute nothing.
fn pick_primary(candidates: &[&str]) -> Option<Rgb> {
    let mut non_neutral = ColorCounts::default();
    let mut all = ColorCounts::default();
    for value in candidates {
        let Some(rgb) = hex_to_rgb(value) else {
            debug!("dropping unparseable flow color {:?}", value);
            continue;
        };
        let key = rgb_to_hex(rgb);
        all.bump(&key);
        if !is_neutral(rgb) {
            non_neutral.bump(&key);
        }
    }
    let table = if non_neutral.is_empty() { &all } else { &non_neutral };
    table.winner().and_then(hex_to_rgb)
}

/// Last CHAPTER-step theme, lower-cased; "dark" when none is present.
fn detect_theme(flow: &Flow) -> String {
    flow.steps
        .iter()
        .filter(|s| s.is_chapter())
        .filter_map(|s| s.theme.as_deref())
        .last()
        .map(|t| t.trim().to_lowercase())
        .unwrap_or_else(|| "dark".to_string())
}

/// Last CHAPTER-step text alignment, restricted to left/center/right.
fn preferred_align(flow: &Flow) -> Align {
    flow.steps
        .iter()
        .filter(|s| s.is_chapter())
        .filter_map(|s| s.text_align.as_deref())
        .last()
        .map(Align::parse)
        .unwrap_or(Align::Center)
}

fn preferred_font(flow: &Flow) -> Option<String> {
    flow.font
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}

/// Infer a complete style from a flow, or the hardcoded defaults when the
/// flow is absent.
pub fn derive_style(flow: Option<&Flow>) -> Style {
    let Some(flow) = flow else {
        return Style {
            primary: DEFAULT_PRIMARY,
            bg: DEFAULT_BG,
            fg: DEFAULT_FG,
            font: None,
            align: Align::Center,
        };
    };

    let theme = detect_theme(flow);
    let primary = pick_primary(&candidate_colors(flow)).unwrap_or(DEFAULT_PRIMARY);

    let cw = contrast(primary, WHITE);
    let cb = contrast(primary, BLACK);
    let (bg, fg) = if cw.max(cb) >= 4.5 {
        // The primary reads well against white or black, so use it directly.
        (primary, if cw >= cb { WHITE } else { BLACK })
    } else {
        let base = if theme == "light" { WHITE } else { BLACK };
        let bg = mix(primary, base, 0.85);
        (bg, best_fg_for_bg(bg))
    };

    Style {
        primary,
        bg,
        fg,
        font: preferred_font(flow),
        align: preferred_align(flow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(json: &str) -> Flow {
        serde_json::from_str(json).expect("valid flow json")
    }

    #[test]
    fn absent_flow_yields_defaults() {
        let st = derive_style(None);
        assert_eq!(st.primary, DEFAULT_PRIMARY);
        assert_eq!(st.align, Align::Center);
        assert!(st.font.is_none());
    }

    #[test]
    fn default_primary_promotes_to_background() {
        // (33, 66, 231) has contrast ~7 against white, so the empty flow
        // resolves to a blue card with white text.
        let st = derive_style(Some(&flow("{}")));
        assert_eq!(st.bg, DEFAULT_PRIMARY);
        assert_eq!(st.fg, WHITE);
    }

    #[test]
    fn frequent_hotspot_color_wins() {
        let mut steps = String::new();
        for _ in 0..5 {
            steps.push_str(r##"{"hotspots":[{"bgColor":"#ff0000"}]},"##);
        }
        steps.push_str(r##"{"hotspots":[{"textColor":"#ffffff"}]}"##);
        let st = derive_style(Some(&flow(&format!(r#"{{"steps":[{}]}}"#, steps))));
        assert_eq!(st.primary, (255, 0, 0));
        // red clears 4.5:1 against black (5.25 vs 4.0 against white), so it
        // becomes the background with black text
        assert_eq!(st.bg, (255, 0, 0));
        assert_eq!(st.fg, BLACK);
    }

    #[test]
    fn neutral_only_candidates_fall_back_to_full_table() {
        let st = derive_style(Some(&flow(
            r##"{"steps":[{"hotspots":[{"bgColor":"#808080"},{"bgColor":"#808080"},{"bgColor":"#ffffff"}]}]}"##,
        )));
        assert_eq!(st.primary, (128, 128, 128));
    }

    #[test]
    fn tie_breaks_by_first_seen_order() {
        let st = derive_style(Some(&flow(
            r##"{"steps":[{"hotspots":[{"bgColor":"#00aa00"},{"bgColor":"#aa0000"}]}]}"##,
        )));
        assert_eq!(st.primary, (0, 0xaa, 0));
    }

    #[test]
    fn unparseable_colors_contribute_nothing() {
        let st = derive_style(Some(&flow(
            r##"{"steps":[{"hotspots":[{"bgColor":"not-a-color"},{"bgColor":"#zzz"}]}]}"##,
        )));
        assert_eq!(st.primary, DEFAULT_PRIMARY);
    }

    #[test]
    fn derived_background_always_clears_contrast_threshold() {
        // For any 8-bit color the better of white/black contrast is at
        // least ~4.58, so every derived card ends up with readable text.
        for bg_hex in ["#c8b43c", "#777777", "#ff00ff", "#2f4f4f"] {
            let json = format!(
                r#"{{"steps":[{{"hotspots":[{{"bgColor":"{bg_hex}"}}]}}]}}"#
            );
            let st = derive_style(Some(&flow(&json)));
            assert!(contrast(st.bg, st.fg) >= 4.5, "unreadable card for {bg_hex}");
        }
    }

    #[test]
    fn last_chapter_step_wins_for_theme_and_align() {
        let json = r#"{"steps":[
            {"type":"CHAPTER","theme":"light","textAlign":"left"},
            {"type":"STEP","theme":"dark","textAlign":"right"},
            {"type":"CHAPTER","textAlign":"right"}
        ]}"#;
        let st = derive_style(Some(&flow(json)));
        assert_eq!(st.align, Align::Right);
    }

    #[test]
    fn font_is_trimmed_and_empty_means_absent() {
        let st = derive_style(Some(&flow(r#"{"font":"  Inter  "}"#)));
        assert_eq!(st.font.as_deref(), Some("Inter"));
        let st = derive_style(Some(&flow(r#"{"font":"   "}"#)));
        assert!(st.font.is_none());
    }
}
