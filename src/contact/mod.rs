//! Contact method actions (impure shell).
//!
//! Each contact method on the page is bound to one [`ContactAction`]. Running
//! it goes through a [`ContactPlatform`] so tests can substitute a fake for the
//! clipboard and the browser.
//!
//! Clipboard transports, tried in order:
//! 1. OSC 52 escape sequence (works over SSH)
//! 2. System clipboard via `arboard`

use crate::state::toast::ToastQueue;
use serde::Deserialize;
use std::io::Write;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// What activating a contact method does.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContactAction {
    /// Put `text` on the clipboard and show `notice`.
    Copy {
        /// Copied text.
        text: String,
        /// Toast shown after copying.
        notice: String,
    },
    /// Open `url` in the user's browser.
    Open {
        /// Link to open.
        url: String,
    },
}

impl ContactAction {
    /// Short hint shown under the method, e.g. "Enter to copy".
    pub fn hint(&self) -> &'static str {
        match self {
            ContactAction::Copy { .. } => "Enter to copy",
            ContactAction::Open { .. } => "Enter to open in browser",
        }
    }
}

/// Failures from the clipboard or the URL opener.
#[derive(Debug, Error)]
pub enum ContactError {
    /// OSC 52 write failed.
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(#[source] std::io::Error),

    /// System clipboard operation failed.
    #[error("System clipboard failed: {0}")]
    Clipboard(String),

    /// No handler could open the URL.
    #[error("Failed to open {url}: {source}")]
    Open {
        /// URL that failed to open.
        url: String,
        /// Error from the opener.
        #[source]
        source: std::io::Error,
    },
}

/// Side effects a contact action needs from the host.
pub trait ContactPlatform {
    /// Put `text` on the clipboard.
    fn copy_text(&mut self, text: &str) -> Result<(), ContactError>;
    /// Open `url` in the default browser.
    fn open_url(&mut self, url: &str) -> Result<(), ContactError>;
}

/// The real clipboard and browser.
#[derive(Debug, Default)]
pub struct SystemPlatform;

impl SystemPlatform {
    /// Copies text using the OSC 52 escape sequence. The terminal intercepts
    /// it and sets its clipboard.
    fn copy_osc52(text: &str) -> Result<(), ContactError> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", osc52_sequence(&encoded)).map_err(ContactError::Osc52)?;
        stdout.flush().map_err(ContactError::Osc52)
    }

    fn copy_system(text: &str) -> Result<(), ContactError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ContactError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ContactError::Clipboard(e.to_string()))
    }
}

impl ContactPlatform for SystemPlatform {
    fn copy_text(&mut self, text: &str) -> Result<(), ContactError> {
        if Self::copy_osc52(text).is_ok() {
            return Ok(());
        }
        Self::copy_system(text)
    }

    fn open_url(&mut self, url: &str) -> Result<(), ContactError> {
        open::that(url).map_err(|source| ContactError::Open {
            url: url.to_string(),
            source,
        })
    }
}

/// `ESC ] 52 ; c ; <base64> ESC \`, where `c` selects the system clipboard.
fn osc52_sequence(encoded: &str) -> String {
    format!("\x1b]52;c;{}\x1b\\", encoded)
}

/// Run `action` and report the outcome as a toast.
///
/// Success of a copy shows the action's notice. Any failure shows an error
/// toast and is logged; nothing is retried.
pub fn dispatch(
    action: &ContactAction,
    platform: &mut dyn ContactPlatform,
    toasts: &mut ToastQueue,
    now: Duration,
) -> Result<(), ContactError> {
    let result = match action {
        ContactAction::Copy { text, notice } => platform.copy_text(text).map(|()| {
            info!(chars = text.chars().count(), "copied contact to clipboard");
            toasts.info(notice.clone(), now);
        }),
        ContactAction::Open { url } => platform.open_url(url).map(|()| {
            info!(%url, "opened contact link");
        }),
    };

    if let Err(e) = &result {
        warn!(error = %e, "contact action failed");
        let message = match action {
            ContactAction::Copy { .. } => "Could not copy to clipboard",
            ContactAction::Open { .. } => "Could not open the link",
        };
        toasts.error(message, now);
    }
    result
}
