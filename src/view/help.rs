//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the active key bindings grouped by
//! category. Triggered by '?', dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::helpers::{centered_rect, empty_line};
use super::styles::Palette;
use crate::config::KeyBindings;
use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Width of the key column, in cells.
const KEY_COLUMN: usize = 20;

/// Shortcut groups in display order.
const CATEGORIES: [(&str, &[(KeyAction, &str)]); 4] = [
    (
        "Navigation",
        &[
            (KeyAction::ScrollDown, "Scroll down"),
            (KeyAction::ScrollUp, "Scroll up"),
            (KeyAction::PageDown, "Page down"),
            (KeyAction::PageUp, "Page up"),
            (KeyAction::ScrollToTop, "Go to top"),
            (KeyAction::ScrollToBottom, "Go to bottom"),
        ],
    ),
    (
        "Sections",
        &[
            (KeyAction::NextSection, "Next section"),
            (KeyAction::PrevSection, "Previous section"),
            (KeyAction::JumpToContact, "Jump to contact"),
        ],
    ),
    (
        "Contact",
        &[
            (KeyAction::FocusNext, "Focus next card or field"),
            (KeyAction::FocusPrev, "Focus previous card or field"),
            (KeyAction::Activate, "Copy, open link or send"),
            (KeyAction::ClearFocus, "Leave the contact section"),
        ],
    ),
    (
        "Application",
        &[
            (KeyAction::Quit, "Quit"),
            (KeyAction::Help, "Show or hide this help"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, bindings: &KeyBindings, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(bindings, palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.heading),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint sits on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        palette.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Build the help content lines grouped by category.
fn build_help_content(bindings: &KeyBindings, palette: &Palette) -> Vec<Line<'static>> {
    let key_style = palette.accent.add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (index, (category, actions)) in CATEGORIES.iter().enumerate() {
        if index > 0 {
            lines.push(empty_line());
        }
        lines.push(Line::from(Span::styled(*category, palette.heading)));
        for (action, description) in actions.iter() {
            let mut keys: Vec<String> = bindings.keys_for(*action).into_iter().map(key_label).collect();
            // Ctrl+C quits regardless of bindings
            if *action == KeyAction::Quit {
                keys.push("Ctrl+c".to_string());
            }
            let keys = keys.join("/");
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN$}"), key_style),
                Span::styled(*description, palette.body),
            ]));
        }
    }
    lines
}

/// Human-readable name of a key, e.g. `Ctrl+d` or `PgDn`.
pub fn key_label(key: KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => return "Shift+Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{base}")
    } else {
        base
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
