//! Domain model types (pure).
//!
//! Page content, section identity and key actions. All types here are plain
//! data with smart constructors.

pub mod content;
pub mod error;
pub mod key_action;
pub mod section;

// Re-export for convenience
pub use content::{ContentError, Portfolio};
pub use error::AppError;
pub use key_action::KeyAction;
pub use section::{SectionId, UnknownSection};
