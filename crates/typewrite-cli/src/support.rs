use crate::cli::EffectArgs;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use typewrite_core::{
    ConfigError, DEFAULT_CONFIG_PATH, DisplayConfig, EffectConfig, TimingConfig, TypingMachine,
};

/// Where the effective config came from, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    FlagsOnly,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) => path.clone(),
            ConfigSource::FlagsOnly => "(command-line flags only)".to_string(),
        }
    }
}

/// File layer (explicit `--config`, else `typewrite.toml` if it exists) with
/// flag overrides on top.
pub fn resolve_config(args: &EffectArgs) -> Result<(EffectConfig, ConfigSource), ConfigError> {
    let (base, source) = match &args.config {
        Some(path) => (EffectConfig::load(path)?, ConfigSource::File(path.clone())),
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => (
            EffectConfig::load(DEFAULT_CONFIG_PATH)?,
            ConfigSource::File(DEFAULT_CONFIG_PATH.to_string()),
        ),
        None => (EffectConfig::default(), ConfigSource::FlagsOnly),
    };
    Ok((base.merge(overrides(args)), source))
}

fn overrides(args: &EffectArgs) -> EffectConfig {
    EffectConfig {
        words: (!args.words.is_empty()).then(|| args.words.clone()),
        timing: TimingConfig {
            typing_ms: args.typing_ms,
            deleting_ms: args.deleting_ms,
            pause_after_typed_ms: args.pause_typed_ms,
            pause_after_deleted_ms: args.pause_deleted_ms,
        },
        display: DisplayConfig::default(),
    }
}

pub fn resolve_config_or_exit(args: &EffectArgs) -> (EffectConfig, ConfigSource) {
    resolve_config(args).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn build_machine_or_exit(config: &EffectConfig) -> TypingMachine {
    config.build_machine().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn print_json<T: Serialize>(value: &T) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|err| {
        eprintln!("error: failed to render json output: {err}");
        std::process::exit(1);
    });
    println!("{rendered}");
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
