//! Page scrolling keyboard action handler.
//!
//! Pure functions that transform AppState in response to scroll and section
//! navigation actions. Reveal trackers see the new position on the next
//! [`crate::state::page::PageState::sync`].

use crate::model::{KeyAction, SectionId};
use crate::state::AppState;

/// Handle a scroll keyboard action.
///
/// Page moves use the viewport height minus one row of overlap. Non-scroll
/// actions leave the state unchanged.
pub fn handle_scroll_action(state: &mut AppState, action: KeyAction) {
    let page_rows = i64::from(state.page.viewport_height().saturating_sub(1).max(1));

    match action {
        KeyAction::ScrollUp => state.page.scroll_by(-1),
        KeyAction::ScrollDown => state.page.scroll_by(1),
        KeyAction::PageUp => state.page.scroll_by(-page_rows),
        KeyAction::PageDown => state.page.scroll_by(page_rows),
        KeyAction::ScrollToTop => state.page.scroll_to(0),
        KeyAction::ScrollToBottom => {
            let bottom = state.page.max_scroll();
            state.page.scroll_to(bottom);
        }
        KeyAction::NextSection => state.page.next_section(),
        KeyAction::PrevSection => state.page.prev_section(),
        KeyAction::JumpToContact => state.page.scroll_to_section(SectionId::Contact),
        _ => {}
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
