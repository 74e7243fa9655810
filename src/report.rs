//! Section extraction from free-form analyst reports.
//!
//! The analyst prompt asks for `TITLE:` and `SUMMARY:` sections, but the
//! response is still free text, so extraction scans line by line and falls
//! back gracefully when a section is missing.

/// Pull the title and plain summary out of analyst output.
///
/// The title is the remainder of the first `TITLE:` line. The summary runs
/// from after `SUMMARY:` until a blank line or a `STEPS:` header, joined
/// into one sentence-flowing string. Fallbacks: `fallback_title` (or
/// "Arcade Flow") for the title, the first non-empty line for the summary.
pub fn extract_title_and_summary(text: &str, fallback_title: Option<&str>) -> (String, String) {
    let mut title = None;
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut in_summary = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if in_summary {
            if trimmed.is_empty() || has_header(trimmed, "STEPS:") {
                in_summary = false;
            } else {
                summary_lines.push(trimmed);
            }
            continue;
        }
        if title.is_none() {
            if let Some(rest) = header_rest(trimmed, "TITLE:") {
                let rest = rest.trim();
                if !rest.is_empty() {
                    title = Some(rest.to_string());
                }
                continue;
            }
        }
        if let Some(rest) = header_rest(trimmed, "SUMMARY:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                summary_lines.push(rest);
            }
            in_summary = true;
        }
    }

    let summary = if summary_lines.is_empty() {
        text.lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string()
    } else {
        summary_lines.join(" ")
    };

    let title = title
        .or_else(|| fallback_title.map(|t| t.to_string()).filter(|t| !t.trim().is_empty()))
        .unwrap_or_else(|| "Arcade Flow".to_string());

    (title, summary)
}

fn has_header(line: &str, header: &str) -> bool {
    line.get(..header.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(header))
}

fn header_rest<'a>(line: &'a str, header: &str) -> Option<&'a str> {
    has_header(line, header).then(|| &line[header.len()..])
}
