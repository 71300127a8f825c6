//! Contact form text input (pure state transitions).
//!
//! While a form field has focus, printable keys and Backspace edit it
//! instead of reaching the key bindings. Enter adds a line break only in
//! the message field; elsewhere it falls through to the Activate binding.

use crate::state::form::FormField;
use crate::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Route `key` to the focused form field.
///
/// Returns whether the key was consumed. Keys are never consumed when no
/// field has focus.
pub fn handle_form_key(state: &mut AppState, key: KeyEvent) -> bool {
    let Some(field) = state.focused_field() else {
        return false;
    };

    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.form.insert_char(field, ch);
            true
        }
        KeyCode::Backspace => {
            state.form.backspace(field);
            true
        }
        KeyCode::Enter if field == FormField::Message => {
            state.form.insert_char(field, '\n');
            true
        }
        _ => false,
    }
}
