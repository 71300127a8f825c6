//! Page styling configuration.
//!
//! One [`Palette`] holds every style the page uses, so `--no-color` and
//! `NO_COLOR` only need to be checked once.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles for every element of the page.
///
/// Without colors, emphasis falls back to modifiers (bold, reversed) so
/// focus and highlights stay visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Owner's name in the nav bar and hero.
    pub name: Style,
    /// Section headings.
    pub heading: Style,
    /// Headline, card titles and dates.
    pub accent: Style,
    /// Paragraph text.
    pub body: Style,
    /// Subtitles, placeholders and inactive nav labels.
    pub muted: Style,
    /// Technology tags.
    pub tag: Style,
    /// Filled part of a skill bar.
    pub bar_filled: Style,
    /// Empty part of a skill bar.
    pub bar_empty: Style,
    /// Focused card, field or button.
    pub focused: Style,
    /// Nav labels of sections in view.
    pub nav_active: Style,
    /// Info toasts.
    pub info: Style,
    /// Error toasts.
    pub error: Style,
}

impl Palette {
    /// Palette for the given color setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                name: Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                heading: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                accent: Style::default().fg(Color::Magenta),
                body: Style::default().fg(Color::Gray),
                muted: Style::default().fg(Color::DarkGray),
                tag: Style::default().fg(Color::Blue),
                bar_filled: Style::default().fg(Color::Cyan),
                bar_empty: Style::default().fg(Color::DarkGray),
                focused: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                nav_active: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                info: Style::default().fg(Color::Green),
                error: Style::default().fg(Color::Red),
            }
        } else {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            Self {
                name: bold,
                heading: bold,
                accent: Style::default(),
                body: Style::default(),
                muted: Style::default(),
                tag: Style::default(),
                bar_filled: Style::default(),
                bar_empty: Style::default(),
                focused: Style::default().add_modifier(Modifier::REVERSED),
                nav_active: bold.add_modifier(Modifier::UNDERLINED),
                info: Style::default(),
                error: bold,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ===== ColorConfig Tests =====

    #[test]
    #[serial]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        let config = ColorConfig::from_env_and_args(false);
        assert!(config.colors_enabled(), "Colors should be enabled by default");
    }

    #[test]
    #[serial]
    fn color_config_no_color_env_any_value_disables() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR with empty string should disable colors"
        );
    }

    // ===== Palette Tests =====

    #[test]
    #[serial]
    fn colored_palette_uses_foreground_colors() {
        std::env::remove_var("NO_COLOR");
        let palette = Palette::with_color_config(ColorConfig::from_env_and_args(false));
        assert!(palette.heading.fg.is_some());
        assert!(palette.error.fg.is_some());
    }

    #[test]
    fn plain_palette_has_no_colors_but_keeps_focus_visible() {
        let palette = Palette::with_color_config(ColorConfig::from_env_and_args(true));
        assert!(palette.heading.fg.is_none());
        assert!(palette.body.fg.is_none());
        assert!(palette.focused.add_modifier.contains(Modifier::REVERSED));
    }
}
