//! Aligner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tagger::RULE_TAGGER;
use crate::Result;

/// Environment variable overriding [`AlignerConfig::subword_model`].
pub const ENV_SUBWORD_MODEL: &str = "METALIGN_SUBWORD_MODEL";

/// Environment variable overriding [`AlignerConfig::tagger`].
pub const ENV_TAGGER: &str = "METALIGN_TAGGER";

/// Default subword model.
pub const DEFAULT_SUBWORD_MODEL: &str = "bert-base-uncased";

/// Which resources a [`crate::TokenAligner`] is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Hub model ID or local path of the subword tokenizer
    pub subword_model: String,
    /// Linguistic tagger name
    pub tagger: String,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            subword_model: DEFAULT_SUBWORD_MODEL.to_string(),
            tagger: RULE_TAGGER.to_string(),
        }
    }
}

impl AlignerConfig {
    /// Set the subword model.
    #[must_use]
    pub fn with_subword_model(mut self, model: impl Into<String>) -> Self {
        self.subword_model = model.into();
        self
    }

    /// Set the tagger.
    #[must_use]
    pub fn with_tagger(mut self, tagger: impl Into<String>) -> Self {
        self.tagger = tagger.into();
        self
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        log::debug!("[config] loaded {}", path.as_ref().display());
        Ok(config)
    }

    /// Defaults overlaid with `METALIGN_SUBWORD_MODEL` / `METALIGN_TAGGER`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Overlay non-empty environment overrides onto this config.
    #[must_use]
    pub fn overlay_env(self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup(ENV_SUBWORD_MODEL).filter(|v| !v.trim().is_empty()) {
            self.subword_model = model;
        }
        if let Some(tagger) = lookup(ENV_TAGGER).filter(|v| !v.trim().is_empty()) {
            self.tagger = tagger;
        }
        self
    }
}
