//! Schema for recorded UI-flow descriptions.
//!
//! A flow is only consumed as a signal source for style derivation, so the
//! schema is deliberately lenient: every field is optional, wrong-typed
//! values deserialize to `None` rather than failing the whole document, and
//! unknown fields are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Keep a JSON value only when it is a string; any other type reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(v.as_str().map(|s| s.to_string()))
}

/// Deserialize an array element-by-element, dropping entries that do not
/// match the expected shape. A non-array value reads as an empty list.
fn lenient_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    match v {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// A recorded UI walkthrough, trimmed to the fields style derivation reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub font: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub steps: Vec<Step>,
}

/// One step of a flow. "CHAPTER"-type steps carry presentation hints
/// (theme, text alignment); other steps contribute hotspot and path colors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub step_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text_align: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub hotspots: Vec<Hotspot>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub paths: Vec<FlowPath>,
}

impl Step {
    pub fn is_chapter(&self) -> bool {
        self.step_type.as_deref() == Some("CHAPTER")
    }
}

/// A highlighted click target within a step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    #[serde(default, deserialize_with = "lenient_string")]
    pub bg_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text_color: Option<String>,
}

/// A navigation choice offered by a step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowPath {
    #[serde(default, deserialize_with = "lenient_string")]
    pub button_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub button_text_color: Option<String>,
}

/// Read and parse a flow JSON file.
pub fn load_flow(path: &Path) -> Result<Flow> {
    let data = fs::read_to_string(path)
        .map_err(|e| Error::FlowError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&data).map_err(|e| Error::FlowError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_flow() {
        let flow: Flow = serde_json::from_str(
            r##"{
                "name": "Buy a Widget",
                "font": "Inter",
                "steps": [
                    {"type": "CHAPTER", "theme": "light", "textAlign": "left"},
                    {"hotspots": [{"bgColor": "#ff0000", "textColor": "#ffffff"}],
                     "paths": [{"buttonColor": "#ff0000", "buttonTextColor": "#000000"}]}
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(flow.name.as_deref(), Some("Buy a Widget"));
        assert!(flow.steps[0].is_chapter());
        assert_eq!(flow.steps[1].hotspots[0].bg_color.as_deref(), Some("#ff0000"));
        assert_eq!(
            flow.steps[1].paths[0].button_text_color.as_deref(),
            Some("#000000")
        );
    }

    #[test]
    fn wrong_typed_fields_read_as_absent() {
        let flow: Flow = serde_json::from_str(
            r#"{"name": 42, "font": null, "steps": [{"type": "CHAPTER", "theme": 7}]}"#,
        )
        .unwrap();
        assert!(flow.name.is_none());
        assert!(flow.font.is_none());
        assert!(flow.steps[0].theme.is_none());
    }

    #[test]
    fn malformed_collections_read_as_empty() {
        let flow: Flow = serde_json::from_str(
            r#"{"steps": [7, {"hotspots": "nope"}, {"hotspots": [{"bogus": 1}]}]}"#,
        )
        .unwrap();
        // the bare number is dropped, the object steps survive
        assert_eq!(flow.steps.len(), 2);
        assert!(flow.steps[0].hotspots.is_empty());
    }

    #[test]
    fn empty_object_is_a_valid_flow() {
        let flow: Flow = serde_json::from_str("{}").unwrap();
        assert!(flow.steps.is_empty());
        assert!(flow.name.is_none());
    }
}
