//! Completion provider interface and on-disk response cache.
//!
//! The renderer only needs "produce a string given a prompt pair", so the
//! provider is a trait; the HTTP-backed client lives behind the `openai`
//! feature. The cache is an append-only jsonl record store keyed by a
//! sha256 digest of the prompt pair, loaded once at startup.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::card::color::hex_to_rgb;
use crate::card::StyleOverride;
use crate::error::{Error, Result};

/// Anything that can answer a system/user prompt pair with text.
pub trait CompletionProvider {
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[derive(Serialize, Deserialize)]
struct CacheRecord {
    k: String,
    v: String,
}

/// Append-only completion cache.
///
/// Records are one JSON object per line; malformed lines are skipped on
/// load so a torn write never poisons the store.
pub struct CompletionCache {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl CompletionCache {
    /// Load the cache from `path`, creating parent directories as needed.
    /// A missing file is an empty cache.
    pub fn load(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::CacheError(e.to_string()))?;
        }
        let mut entries = HashMap::new();
        match fs::read_to_string(path) {
            Ok(data) => {
                for line in data.lines() {
                    match serde_json::from_str::<CacheRecord>(line) {
                        Ok(rec) => {
                            entries.insert(rec.k, rec.v);
                        }
                        Err(_) => warn!("skipping malformed cache line"),
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::CacheError(e.to_string())),
        }
        debug!("loaded {} cached completions from {}", entries.len(), path.display());
        Ok(Self { path: path.to_path_buf(), entries })
    }

    /// Cache key: sha256 over the canonical JSON form of the prompt pair.
    fn key(system: &str, user: &str) -> String {
        let payload = serde_json::json!({ "system": system, "user": user });
        hex::encode(Sha256::digest(payload.to_string().as_bytes()))
    }

    /// Return the cached completion for this prompt pair, or ask the
    /// provider and append the answer to the store.
    pub fn complete_or_fetch(
        &mut self,
        provider: &dyn CompletionProvider,
        system: &str,
        user: &str,
    ) -> Result<String> {
        let key = Self::key(system, user);
        if let Some(hit) = self.entries.get(&key) {
            debug!("completion cache hit");
            return Ok(hit.clone());
        }
        let value = provider.complete(system, user)?;
        let record = CacheRecord { k: key.clone(), v: value.clone() };
        let line = serde_json::to_string(&record)
            .map_err(|e| Error::CacheError(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::CacheError(e.to_string()))?;
        writeln!(file, "{}", line).map_err(|e| Error::CacheError(e.to_string()))?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }
}

/// Shape of the style-inference completion payload.
#[derive(Deserialize)]
struct InferredStyle {
    primary_color: Option<String>,
    background_color: Option<String>,
    text_color: Option<String>,
    font_family: Option<String>,
}

/// Parse a style-inference completion into a [`StyleOverride`].
///
/// Hex fields that do not parse become absent; a payload that is not the
/// expected object at all yields `None`, letting the caller fall back to
/// flow derivation.
pub fn style_override_from_inference(raw: &str) -> Option<StyleOverride> {
    let cleaned = crate::brief::strip_code_fences(raw);
    let inferred: InferredStyle = serde_json::from_str(&cleaned).ok()?;
    let rgb = |field: &Option<String>| {
        field
            .as_deref()
            .and_then(hex_to_rgb)
            .map(|c| [c.0, c.1, c.2])
    };
    Some(StyleOverride {
        primary: rgb(&inferred.primary_color),
        bg: rgb(&inferred.background_color),
        fg: rgb(&inferred.text_color),
        font: inferred
            .font_family
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty()),
        align: None,
    })
}

/// OpenAI-compatible chat completion client.
#[cfg(feature = "openai")]
pub mod openai {
    use super::*;
    use std::time::Duration;

    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

    pub struct OpenAiClient {
        client: reqwest::blocking::Client,
        base_url: String,
        api_key: String,
        model: String,
    }

    impl OpenAiClient {
        pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
            Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
        }

        pub fn with_base_url(
            api_key: String,
            model: Option<String>,
            base_url: String,
        ) -> Result<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .map_err(|e| Error::ConfigError(format!("HTTP client: {}", e)))?;
            Ok(Self {
                client,
                base_url,
                api_key,
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            })
        }
    }

    impl CompletionProvider for OpenAiClient {
        fn complete(&self, system: &str, user: &str) -> Result<String> {
            let body = serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user }
                ],
                "temperature": 0.4
            });
            let resp = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .map_err(|e| Error::CompletionError(e.to_string()))?;
            if !resp.status().is_success() {
                return Err(Error::CompletionError(format!(
                    "provider returned {}",
                    resp.status()
                )));
            }
            let payload: serde_json::Value = resp
                .json()
                .map_err(|e| Error::CompletionError(e.to_string()))?;
            payload["choices"][0]["message"]["content"]
                .as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| {
                    Error::CompletionError("response missing message content".to_string())
                })
        }
    }
}
