//! Prompt pairs for the completion provider. Kept short and deterministic.

/// Analyst persona: turns a flow JSON into a structured text report.
pub const SYSTEM_ANALYST: &str = "You are an expert product analyst. Given an Arcade flow JSON, write a clear, concise report. Use these sections strictly:\n\nTITLE: <short, human-friendly title>\nSUMMARY: <2-3 sentences describing the user goal and outcome>\n\nSTEPS:\n1. <action and target element>\n2. <action and target element>\n...\n\nTAGS: <comma-separated keywords>\n\nOnly output text in this exact structure.";

pub fn user_analyst(flow_json: &str) -> String {
    format!(
        "Analyze the following Arcade flow JSON and produce the report as specified.\n\nFLOW JSON:\n{flow_json}\n"
    )
}

/// Brief persona: produces the minified JSON brief for the share card.
pub const SYSTEM_IMAGE: &str = "You create compact JSON briefs for a social share image. Return ONLY minified JSON with keys: overlay (string), elements (array of short bullet strings). No code fences, no extra text.";

pub fn user_image(title: &str, plain_summary: &str) -> String {
    format!(
        "Create a JSON brief for a 1200x630 social card based on this title and plain summary.\n\nTITLE: {title}\nSUMMARY: {plain_summary}\n\nConstraints:\n- overlay should be a concise, compelling headline (<= 80 chars).\n- elements: 3-5 short bullets (<= 60 chars each)."
    )
}

/// Brand-style persona: infers a palette and font from flow hints.
pub const SYSTEM_STYLE: &str = "You infer brand style (colors + font) from provided hints. Return ONLY minified JSON with EXACT keys in THIS order: primary_color, background_color, text_color, accent_color, font_family. All colors must be 7-char lowercase hex strings like #2142e7. No code fences, no commentary, no extra keys. Rules: prefer non-neutral colors observed in the flow as primary; neutrals are white/black/greys. Set background_color to the primary if contrast (>=4.5) is met with #ffffff or #000000; set text_color to whichever has better contrast. If a font family is provided, use it; otherwise choose a clean UI font (Inter, Roboto, Arial).";

pub fn user_style(flow_name: &str, flow_font: Option<&str>, seen_colors: &[&str]) -> String {
    format!(
        "Given the following context, infer a brand palette and font for a social image.\n\nFLOW NAME: {flow_name}\nFLOW FONT (if any): {font}\nSEEN COLORS (from hotspots/buttons): {colors}\n\nOutput a single JSON object with exactly: primary_color, background_color, text_color, accent_color, font_family.",
        font = flow_font.unwrap_or("none"),
        colors = seen_colors.join(", "),
    )
}
