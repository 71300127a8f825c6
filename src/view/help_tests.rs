//! Tests for help overlay widget

use super::*;
use crate::view::styles::ColorConfig;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    let bindings = KeyBindings::default();
    let palette = Palette::with_color_config(ColorConfig::from_env_and_args(true));

    terminal
        .draw(|frame| {
            render_help_overlay(frame, &bindings, &palette);
        })
        .unwrap();

    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn render_help_overlay_shows_centered_modal() {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    let palette = Palette::with_color_config(ColorConfig::from_env_and_args(true));

    terminal
        .draw(|frame| {
            render_help_overlay(frame, &KeyBindings::default(), &palette);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();

    // Top-left corner of a 70% x 80% popup on 80x24
    assert_eq!(buffer[(12, 2)].symbol(), "┌");
    // Outside the popup stays empty
    assert_eq!(buffer[(0, 0)].symbol(), " ");
}

#[test]
fn render_help_overlay_contains_navigation_shortcuts() {
    let rendered_text = render(100, 40);

    assert!(
        rendered_text.contains("Navigation"),
        "Should show Navigation category"
    );
    assert!(
        rendered_text.contains("j/↓"),
        "Should list both scroll down keys"
    );
    assert!(rendered_text.contains("Scroll up"));
    assert!(rendered_text.contains("g/Home"));
}

#[test]
fn render_help_overlay_contains_section_and_contact_shortcuts() {
    let rendered_text = render(100, 40);

    assert!(rendered_text.contains("Sections"));
    assert!(rendered_text.contains("Jump to contact"));
    assert!(rendered_text.contains("Contact"));
    assert!(
        rendered_text.contains("Tab"),
        "Should show Tab for moving focus"
    );
    assert!(rendered_text.contains("Shift+Tab"));
}

#[test]
fn render_help_overlay_lists_quit_keys_including_ctrl_c() {
    let rendered_text = render(100, 40);

    assert!(rendered_text.contains("q/Ctrl+c"));
    assert!(rendered_text.contains("Show or hide this help"));
}

#[test]
fn render_help_overlay_shows_dismissal_hint() {
    let rendered_text = render(100, 40);

    assert!(
        rendered_text.contains("Press Esc or ? to close"),
        "Should show how to dismiss the overlay"
    );
}

#[test]
fn key_label_names_modifiers_and_special_keys() {
    assert_eq!(
        key_label(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
        "Ctrl+d"
    );
    assert_eq!(
        key_label(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
        "Space"
    );
    assert_eq!(
        key_label(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
        "Shift+Tab"
    );
    assert_eq!(
        key_label(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE)),
        "PgDn"
    );
}

#[test]
fn every_bound_action_appears_in_help() {
    let bindings = KeyBindings::default();
    let palette = Palette::with_color_config(ColorConfig::from_env_and_args(true));
    let content = build_help_content(&bindings, &palette);

    let listed = CATEGORIES
        .iter()
        .map(|(_, actions)| actions.len())
        .sum::<usize>();
    let headers = CATEGORIES.len();
    let separators = CATEGORIES.len() - 1;
    assert_eq!(content.len(), listed + headers + separators);
}

fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        result.push('\n');
    }
    result
}
