//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the page up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the page down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page height. Default: Ctrl+d/Page Down/Space
    PageDown,
    /// Jump to the top of the page. Default: g/Home
    ScrollToTop,
    /// Jump to the bottom of the page. Default: G/End
    ScrollToBottom,

    // Section navigation
    /// Scroll to the start of the next section. Default: n/]
    NextSection,
    /// Scroll to the start of the previous section. Default: p/[
    PrevSection,
    /// Scroll to the contact section. Default: c
    JumpToContact,

    // Focus
    /// Focus the next contact method or form field. Default: Tab
    FocusNext,
    /// Focus the previous contact method or form field. Default: Shift+Tab
    FocusPrev,
    /// Run the focused contact action or submit the form. Default: Enter
    Activate,
    /// Drop focus, or close the help overlay. Default: Esc
    ClearFocus,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}

impl KeyAction {
    /// Whether the action moves the page.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
                | KeyAction::NextSection
                | KeyAction::PrevSection
                | KeyAction::JumpToContact
        )
    }
}
