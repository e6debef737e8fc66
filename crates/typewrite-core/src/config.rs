//! TOML configuration for a typing effect.
//!
//! Every field is optional at parse time so a file and command-line
//! overrides can be layered with [`EffectConfig::merge`]. Missing and invalid
//! values are reported by [`EffectConfig::build_machine`], before anything
//! runs.

use crate::error::TypewriteError;
use crate::machine::TypingMachine;
use crate::timing::Timings;
use crate::words::WordList;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "typewrite.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error(transparent)]
    Invalid(#[from] TypewriteError),
}

/// Top-level shape of `typewrite.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default, skip_serializing_if = "DisplayConfig::is_empty")]
    pub display: DisplayConfig,
}

/// `[timing]`, all in milliseconds. Signed so negatives reach validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleting_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_after_typed_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_after_deleted_ms: Option<i64>,
}

/// `[display]`: decoration around the animated text on a terminal line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret: Option<String>,
}

impl DisplayConfig {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none() && self.caret.is_none()
    }
}

impl EffectConfig {
    /// Example configuration written by `typewrite init`.
    pub fn sample() -> Self {
        Self {
            words: Some(
                ["Experiences", "Interfaces", "Development", "Websites"]
                    .map(String::from)
                    .to_vec(),
            ),
            timing: TimingConfig {
                typing_ms: Some(90),
                deleting_ms: Some(50),
                pause_after_typed_ms: Some(1000),
                pause_after_deleted_ms: Some(300),
            },
            display: DisplayConfig {
                prefix: Some("Building ".to_string()),
                suffix: None,
                caret: Some("|".to_string()),
            },
        }
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Parse config text; `origin` only labels errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: origin.to_string(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: EffectConfig) -> EffectConfig {
        EffectConfig {
            words: overrides.words.or(self.words),
            timing: TimingConfig {
                typing_ms: overrides.timing.typing_ms.or(self.timing.typing_ms),
                deleting_ms: overrides.timing.deleting_ms.or(self.timing.deleting_ms),
                pause_after_typed_ms: overrides
                    .timing
                    .pause_after_typed_ms
                    .or(self.timing.pause_after_typed_ms),
                pause_after_deleted_ms: overrides
                    .timing
                    .pause_after_deleted_ms
                    .or(self.timing.pause_after_deleted_ms),
            },
            display: DisplayConfig {
                prefix: overrides.display.prefix.or(self.display.prefix),
                suffix: overrides.display.suffix.or(self.display.suffix),
                caret: overrides.display.caret.or(self.display.caret),
            },
        }
    }

    pub fn word_list(&self) -> Result<WordList, ConfigError> {
        let words = self.words.as_ref().ok_or(ConfigError::Missing("words"))?;
        Ok(WordList::new(words.iter().cloned())?)
    }

    pub fn timings(&self) -> Result<Timings, ConfigError> {
        let t = &self.timing;
        Ok(Timings::from_millis(
            t.typing_ms.ok_or(ConfigError::Missing("timing.typing_ms"))?,
            t.deleting_ms
                .ok_or(ConfigError::Missing("timing.deleting_ms"))?,
            t.pause_after_typed_ms
                .ok_or(ConfigError::Missing("timing.pause_after_typed_ms"))?,
            t.pause_after_deleted_ms
                .ok_or(ConfigError::Missing("timing.pause_after_deleted_ms"))?,
        )?)
    }

    /// Validate everything and produce a machine at its initial state.
    pub fn build_machine(&self) -> Result<TypingMachine, ConfigError> {
        Ok(TypingMachine::new(self.word_list()?, self.timings()?))
    }
}
