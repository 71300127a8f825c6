//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_returns_some_path() {
    let path = default_config_path();
    assert!(
        path.is_some(),
        "default_config_path should return Some on supported platforms"
    );
}

#[test]
fn default_config_path_contains_folio_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("folio") && path_str.ends_with("config.toml"),
        "Path should contain 'folio' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("folio_test_config.toml");

    let toml_content = r#"
content_path = "/srv/portfolio.toml"
tick_interval_ms = 40
toast_duration_ms = 1500
animations = false

[typewriter]
type_interval_ms = 80
hold_ms = 1000

[reveal]
threshold = 0.5
root_margin = "0px 0px -2px 0px"
freeze_once_visible = true
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.content_path, Some(PathBuf::from("/srv/portfolio.toml")));
    assert_eq!(config.tick_interval_ms, Some(40));
    assert_eq!(config.toast_duration_ms, Some(1500));
    assert_eq!(config.animations, Some(false));
    let typewriter = config.typewriter.expect("typewriter table");
    assert_eq!(typewriter.type_interval_ms, Some(80));
    assert_eq!(typewriter.delete_interval_ms, None);
    assert_eq!(typewriter.hold_ms, Some(1000));
    let reveal = config.reveal.expect("reveal table");
    assert_eq!(reveal.threshold, Some(0.5));
    assert_eq!(reveal.root_margin.as_deref(), Some("0px 0px -2px 0px"));
    assert_eq!(reveal.freeze_once_visible, Some(true));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("folio_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("folio_test_unknown.toml");

    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown keys should be rejected, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = env::temp_dir().join("folio_test_partial.toml");

    fs::write(&config_path, "animations = true\n# Other fields omitted\n")
        .expect("Failed to write partial test config");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.animations, Some(true));
    assert_eq!(config.typewriter, None);

    fs::remove_file(config_path).ok();
}

// ===== merge_config =====

#[test]
fn merge_config_without_file_returns_defaults() {
    let resolved = merge_config(None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.tick_interval, DEFAULT_TICK_INTERVAL);
    assert_eq!(resolved.reveal.threshold.get(), DEFAULT_SECTION_THRESHOLD);
    assert!(resolved.animations);
}

#[test]
fn merge_config_applies_typewriter_overrides_and_keeps_other_defaults() {
    let file = ConfigFile {
        typewriter: Some(TypewriterSection {
            type_interval_ms: Some(60),
            ..Default::default()
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.typewriter.type_interval, Duration::from_millis(60));
    assert_eq!(resolved.typewriter.delete_interval, DEFAULT_DELETE_INTERVAL);
    assert_eq!(resolved.typewriter.hold, DEFAULT_HOLD);
}

#[test]
fn merge_config_clamps_zero_intervals() {
    let file = ConfigFile {
        tick_interval_ms: Some(0),
        typewriter: Some(TypewriterSection {
            type_interval_ms: Some(0),
            delete_interval_ms: Some(0),
            hold_ms: Some(0),
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.tick_interval, Duration::from_millis(1));
    assert_eq!(resolved.typewriter.type_interval, Duration::from_millis(1));
    assert_eq!(resolved.typewriter.hold, Duration::from_millis(1));
}

#[test]
fn merge_config_builds_reveal_options() {
    let file = ConfigFile {
        reveal: Some(RevealSection {
            threshold: Some(0.75),
            root_margin: Some("10%".to_string()),
            freeze_once_visible: Some(true),
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.reveal.threshold.get(), 0.75);
    assert_eq!(resolved.reveal.root_margin, RootMargin::parse("10%").unwrap());
    assert!(resolved.reveal.freeze_once_visible);
}

#[test]
fn merge_config_rejects_out_of_range_threshold() {
    let file = ConfigFile {
        reveal: Some(RevealSection {
            threshold: Some(1.5),
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = merge_config(Some(file)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "reveal.threshold",
            ..
        }
    ));
}

#[test]
fn merge_config_rejects_malformed_root_margin() {
    let file = ConfigFile {
        reveal: Some(RevealSection {
            root_margin: Some("ten pixels".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = merge_config(Some(file)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "reveal.root_margin",
            ..
        }
    ));
}

#[test]
fn merge_config_rejects_oversized_percent_margin() {
    let file = ConfigFile {
        reveal: Some(RevealSection {
            root_margin: Some("0px 0px 1e20% 0px".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = merge_config(Some(file)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "reveal.root_margin",
            ..
        }
    ));
}

// ===== Precedence =====

#[test]
#[serial]
fn load_config_with_precedence_uses_explicit_path_over_env() {
    let explicit = env::temp_dir().join("folio_test_explicit.toml");
    let from_env = env::temp_dir().join("folio_test_env.toml");
    fs::write(&explicit, "tick_interval_ms = 10\n").unwrap();
    fs::write(&from_env, "tick_interval_ms = 20\n").unwrap();

    env::set_var("FOLIO_CONFIG", &from_env);
    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    env::remove_var("FOLIO_CONFIG");

    assert_eq!(config.tick_interval_ms, Some(10));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial]
fn load_config_with_precedence_falls_back_to_env_var() {
    let from_env = env::temp_dir().join("folio_test_env_only.toml");
    fs::write(&from_env, "toast_duration_ms = 900\n").unwrap();

    env::set_var("FOLIO_CONFIG", &from_env);
    let config = load_config_with_precedence(None).unwrap().unwrap();
    env::remove_var("FOLIO_CONFIG");

    assert_eq!(config.toast_duration_ms, Some(900));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial]
fn env_overrides_set_content_and_disable_animation() {
    env::set_var("FOLIO_CONTENT", "/tmp/other.toml");
    env::set_var("FOLIO_NO_ANIMATION", "1");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("FOLIO_CONTENT");
    env::remove_var("FOLIO_NO_ANIMATION");

    assert_eq!(config.content_path, Some(PathBuf::from("/tmp/other.toml")));
    assert!(!config.animations);
}

#[test]
#[serial]
fn env_override_false_keeps_animation() {
    env::set_var("FOLIO_NO_ANIMATION", "false");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("FOLIO_NO_ANIMATION");

    assert!(config.animations);
}

#[test]
#[serial]
fn env_overrides_without_vars_change_nothing() {
    env::remove_var("FOLIO_CONTENT");
    env::remove_var("FOLIO_NO_ANIMATION");
    let config = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(config, ResolvedConfig::default());
}

#[test]
fn cli_overrides_take_precedence() {
    let base = ResolvedConfig {
        content_path: Some(PathBuf::from("/from/file.toml")),
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base, Some(PathBuf::from("/from/cli.toml")), true);

    assert_eq!(config.content_path, Some(PathBuf::from("/from/cli.toml")));
    assert!(!config.animations);
}

#[test]
fn cli_without_flags_keeps_config() {
    let base = ResolvedConfig {
        animations: true,
        content_path: Some(PathBuf::from("/from/file.toml")),
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base.clone(), None, false);
    assert_eq!(config, base);
}
