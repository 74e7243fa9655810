//! The brief: title and bullet content for one card.
//!
//! Briefs usually arrive as JSON produced by a completion provider, which
//! means tolerating code fences and substituting a safe fallback when the
//! payload does not parse.

use log::warn;
use serde::Deserialize;

/// Title and ordered bullet phrases to render.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Brief {
    #[serde(default)]
    pub overlay: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

impl Brief {
    /// The documented substitute for an unparseable brief payload.
    pub fn fallback() -> Brief {
        Brief {
            overlay: "Arcade Flow".to_string(),
            elements: vec!["Step 1".to_string(), "Step 2".to_string()],
        }
    }
}

/// Remove ``` / ```json fences around a payload, if present.
pub fn strip_code_fences(s: &str) -> String {
    let s = s.trim();
    if !s.starts_with("```") {
        return s.to_string();
    }
    let mut body = s.trim_start_matches('`').trim_start();
    if body.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
        body = body[4..].trim_start();
    }
    body.trim_end_matches(['`', '\n', '\r', '\t', ' ']).to_string()
}

/// Parse a raw brief payload, tolerating code fences.
///
/// Any payload that does not parse as the expected structure yields
/// [`Brief::fallback`] rather than an error.
pub fn parse_brief(raw: &str) -> Brief {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str(&cleaned) {
        Ok(brief) => brief,
        Err(e) => {
            warn!("brief payload did not parse ({}); using fallback", e);
            Brief::fallback()
        }
    }
}
