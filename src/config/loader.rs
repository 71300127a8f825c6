//! Configuration file loading with precedence handling.

use crate::anim::intersection::{MarginParseError, RootMargin, Threshold};
use crate::anim::reveal::TrackerOptions;
use crate::anim::typewriter::{
    TypewriterTiming, DEFAULT_DELETE_INTERVAL, DEFAULT_HOLD, DEFAULT_TYPE_INTERVAL,
};
use crate::state::toast::DEFAULT_TOAST_DURATION;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default event loop tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Threshold used by content sections unless configured otherwise.
pub const DEFAULT_SECTION_THRESHOLD: f64 = 0.2;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<MarginParseError> for ConfigError {
    fn from(e: MarginParseError) -> Self {
        ConfigError::InvalidValue {
            key: "reveal.root_margin",
            reason: e.to_string(),
        }
    }
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/folio/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Portfolio content to show instead of the embedded one.
    #[serde(default)]
    pub content_path: Option<PathBuf>,

    /// Event loop tick in milliseconds.
    #[serde(default)]
    pub tick_interval_ms: Option<u64>,

    /// How long a notification stays up before sliding out.
    #[serde(default)]
    pub toast_duration_ms: Option<u64>,

    /// Play enter animations and the typewriter.
    #[serde(default)]
    pub animations: Option<bool>,

    /// Typewriter timing overrides.
    #[serde(default)]
    pub typewriter: Option<TypewriterSection>,

    /// Reveal options for the content sections.
    #[serde(default)]
    pub reveal: Option<RevealSection>,
}

/// `[typewriter]` table.
///
/// ```toml
/// [typewriter]
/// type_interval_ms = 100
/// delete_interval_ms = 50
/// hold_ms = 2000
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct TypewriterSection {
    /// Delay between typed characters.
    #[serde(default)]
    pub type_interval_ms: Option<u64>,
    /// Delay between deleted characters.
    #[serde(default)]
    pub delete_interval_ms: Option<u64>,
    /// Hold on the full phrase before deleting.
    #[serde(default)]
    pub hold_ms: Option<u64>,
}

/// `[reveal]` table, applied to the content sections.
///
/// ```toml
/// [reveal]
/// threshold = 0.2
/// root_margin = "0px 0px -2px 0px"
/// freeze_once_visible = false
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RevealSection {
    /// Visible fraction, `0.0..=1.0`.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// CSS-style margin shorthand in `px` or `%`.
    #[serde(default)]
    pub root_margin: Option<String>,
    /// Keep sections intersecting once they have been seen.
    #[serde(default)]
    pub freeze_once_visible: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Portfolio content file; `None` means the embedded portfolio.
    pub content_path: Option<PathBuf>,
    /// Event loop tick.
    pub tick_interval: Duration,
    /// Notification display time.
    pub toast_duration: Duration,
    /// Play animations. When `false` everything renders in its end state.
    pub animations: bool,
    /// Typewriter cadence.
    pub typewriter: TypewriterTiming,
    /// Tracker options for content sections.
    pub reveal: TrackerOptions,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            content_path: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            toast_duration: DEFAULT_TOAST_DURATION,
            animations: true,
            typewriter: TypewriterTiming::default(),
            reveal: default_section_reveal(),
        }
    }
}

/// Tracker options for content sections: threshold 0.2, no margin.
pub fn default_section_reveal() -> TrackerOptions {
    let threshold = Threshold::new(DEFAULT_SECTION_THRESHOLD).unwrap_or_default();
    TrackerOptions::default().with_threshold(threshold)
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/folio/folio.log` on Linux, or the platform's
/// state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("folio").join("folio.log")
    } else {
        PathBuf::from("folio.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/folio/config.toml` on Linux, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `FOLIO_CONFIG` environment variable
/// 3. Default path `~/.config/folio/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("FOLIO_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for an out-of-range threshold or a
/// malformed root margin.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let typewriter = config.typewriter.unwrap_or_default();
    let typewriter = TypewriterTiming {
        type_interval: typewriter
            .type_interval_ms
            .map_or(DEFAULT_TYPE_INTERVAL, Duration::from_millis),
        delete_interval: typewriter
            .delete_interval_ms
            .map_or(DEFAULT_DELETE_INTERVAL, Duration::from_millis),
        hold: typewriter.hold_ms.map_or(DEFAULT_HOLD, Duration::from_millis),
    };

    let reveal_file = config.reveal.unwrap_or_default();
    let mut reveal = defaults.reveal;
    if let Some(value) = reveal_file.threshold {
        let threshold = Threshold::new(value).map_err(|e| ConfigError::InvalidValue {
            key: "reveal.threshold",
            reason: e.to_string(),
        })?;
        reveal = reveal.with_threshold(threshold);
    }
    if let Some(margin) = reveal_file.root_margin {
        reveal = reveal.with_root_margin(RootMargin::parse(&margin)?);
    }
    if let Some(freeze) = reveal_file.freeze_once_visible {
        reveal = reveal.freeze_once_visible(freeze);
    }

    Ok(ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        content_path: config.content_path.or(defaults.content_path),
        tick_interval: config
            .tick_interval_ms
            .map_or(defaults.tick_interval, |ms| Duration::from_millis(ms.max(1))),
        toast_duration: config
            .toast_duration_ms
            .map_or(defaults.toast_duration, Duration::from_millis),
        animations: config.animations.unwrap_or(defaults.animations),
        typewriter: typewriter.clamped(),
        reveal,
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FOLIO_CONTENT`: Override content file
/// - `FOLIO_NO_ANIMATION`: Disable animations when set to anything but `0`/`false`
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(content) = std::env::var("FOLIO_CONTENT") {
        if !content.is_empty() {
            config.content_path = Some(PathBuf::from(content));
        }
    }

    if let Ok(value) = std::env::var("FOLIO_NO_ANIMATION") {
        if !matches!(value.trim(), "" | "0" | "false") {
            config.animations = false;
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    content_override: Option<PathBuf>,
    no_animation: bool,
) -> ResolvedConfig {
    if let Some(content) = content_override {
        config.content_path = Some(content);
    }

    if no_animation {
        config.animations = false;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
