//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the page.

/// Height of the navigation bar in lines.
pub const NAV_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for keyboard hints and scroll position.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Columns left blank on each side of the page content.
pub const PAGE_MARGIN: u16 = 2;

/// Widest the page content grows on large terminals.
pub const MAX_CONTENT_WIDTH: u16 = 96;

/// How far an item starts to the right of its resting place while it
/// reveals. Text is wrapped narrower by this much so sliding never clips.
pub const SLIDE_COLUMNS: u16 = 4;

/// Width of a full skill bar in cells.
pub const SKILL_BAR_WIDTH: u16 = 24;

/// Rows reserved for the message field of the contact form.
pub const MESSAGE_FIELD_ROWS: usize = 4;

/// Width of a toast, borders included.
pub const TOAST_WIDTH: u16 = 40;

/// Height of a toast, borders included.
pub const TOAST_HEIGHT: u16 = 3;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
