//! Error types for folio.
//!
//! Each layer has its own `thiserror` enum; [`AppError`] is the top-level
//! union that startup code returns, composing the others via `From` so `?`
//! works across layers.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`ContentError`] - Portfolio content read/parse/validation failures
//!   - [`TypewriterError`] - Headline typewriter construction failures
//!   - [`MarginParseError`] - Invalid reveal root margin in config
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Startup errors are fatal: they are reported on stderr and the process
//! exits non-zero. Once the page is running, the only fallible operations
//! are contact actions ([`crate::contact::ContactError`]), which are shown
//! as an error toast and logged, never propagated.

use crate::anim::intersection::MarginParseError;
use crate::anim::typewriter::TypewriterError;
use crate::config::ConfigError;
use crate::model::content::ContentError;
use thiserror::Error;

/// Top-level application error encompassing all startup failure modes.
///
/// # Examples
///
/// ```no_run
/// use folio::model::error::AppError;
/// use folio::model::content::Portfolio;
///
/// fn load() -> Result<Portfolio, AppError> {
///     // ContentError converts to AppError via From
///     Ok(Portfolio::embedded()?)
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Portfolio content could not be loaded.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// The headline typewriter could not be built.
    #[error("Headline error: {0}")]
    Typewriter(#[from] TypewriterError),

    /// A reveal root margin in the configuration is malformed.
    #[error("Reveal margin error: {0}")]
    Margin(#[from] MarginParseError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the page cannot be shown. The caller
    /// restores the terminal, then exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn app_error_from_content_error() {
        let err: AppError = ContentError::Invalid("no phrases".to_string()).into();
        assert!(matches!(err, AppError::Content(_)));
        assert!(err.to_string().contains("no phrases"));
    }

    #[test]
    fn app_error_from_config_error() {
        let err: AppError = ConfigError::ParseError {
            path: PathBuf::from("/tmp/config.toml"),
            reason: "expected '='".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("/tmp/config.toml"));
    }

    #[test]
    fn app_error_from_typewriter_error() {
        let err: AppError = TypewriterError::NoPhrases.into();
        assert!(matches!(err, AppError::Typewriter(TypewriterError::NoPhrases)));
    }

    #[test]
    fn app_error_from_io_error() {
        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
        assert!(err.to_string().starts_with("Terminal error"));
    }
}
