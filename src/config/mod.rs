//! Configuration module.
//!
//! Precedence: Defaults → config file → environment → CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    default_section_reveal, load_config_file, load_config_with_precedence, merge_config,
    ConfigError, ConfigFile, ResolvedConfig, RevealSection, TypewriterSection,
};
