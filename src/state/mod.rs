//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.

pub mod app_state;
pub mod form;
pub mod form_input_handler;
pub mod page;
pub mod scroll_handler;
pub mod toast;

// Re-export for convenience
pub use app_state::{AppState, Focus};
pub use form::{ContactForm, FormError, FormField, Submission};
pub use form_input_handler::handle_form_key;
pub use page::{PageState, SectionState};
pub use scroll_handler::handle_scroll_action;
pub use toast::{Toast, ToastKind, ToastPhase, ToastQueue};
