//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Transitions
//! are plain methods or handler functions; side effects (clipboard,
//! browser, terminal) stay in the shell.

use crate::anim::typewriter::{Typewriter, TypewriterError};
use crate::config::ResolvedConfig;
use crate::model::{Portfolio, SectionId};
use crate::state::form::{ContactForm, FormField, Submission};
use crate::state::page::PageState;
use crate::state::toast::ToastQueue;
use chrono::{DateTime, Utc};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

/// What keyboard focus is on. Focus only ever sits inside the contact
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Contact card by index into the portfolio's contact methods.
    ContactMethod(usize),
    /// A form field.
    Field(FormField),
    /// The send button.
    Submit,
}

/// Application state.
///
/// # State Machine
///
/// - **Focus**: `None` → contact cards → form fields → submit button and
///   around again (via `focus_next` / `focus_prev`); `clear_focus` returns
///   to `None`.
/// - **Help**: toggled by the help action; Esc closes it before anything
///   else.
/// - **Toasts**: pushed by contact actions and form submits, expired by
///   the event loop tick.
#[derive(Debug)]
pub struct AppState {
    /// The content being shown. Read-only after startup.
    portfolio: Portfolio,

    /// Scroll position, layout and section reveal trackers.
    pub page: PageState,

    /// Headline typewriter. Shared with the ticker, which holds it weakly.
    headline: Rc<RefCell<Typewriter>>,

    /// Keyboard focus inside the contact section.
    pub focus: Option<Focus>,

    /// Contact form contents.
    pub form: ContactForm,

    /// Notifications currently on screen.
    pub toasts: ToastQueue,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// Create the state for `portfolio` with the headline starting at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TypewriterError::NoPhrases`] if the profile has no phrases.
    pub fn new(
        portfolio: Portfolio,
        config: &ResolvedConfig,
        now: Duration,
    ) -> Result<Self, TypewriterError> {
        let headline = Typewriter::new(portfolio.profile.phrases.clone(), config.typewriter, now)?;
        Ok(Self {
            portfolio,
            page: PageState::new(config.reveal, config.animations),
            headline: Rc::new(RefCell::new(headline)),
            focus: None,
            form: ContactForm::new(),
            toasts: ToastQueue::new(config.toast_duration),
            help_visible: false,
        })
    }

    /// The content being shown.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Handle for subscribing the headline to a ticker.
    pub fn headline_handle(&self) -> &Rc<RefCell<Typewriter>> {
        &self.headline
    }

    /// Borrow the headline typewriter.
    pub fn headline(&self) -> Ref<'_, Typewriter> {
        self.headline.borrow()
    }

    /// Headline text to draw. Without animations this is the full first
    /// phrase.
    pub fn headline_text(&self) -> String {
        let headline = self.headline.borrow();
        if self.page.animations() {
            headline.displayed().to_string()
        } else {
            headline.phrases()[0].clone()
        }
    }

    // ===== Focus =====

    /// Every focus target in Tab order.
    pub fn focus_order(&self) -> Vec<Focus> {
        (0..self.portfolio.contact.methods.len())
            .map(Focus::ContactMethod)
            .chain(FormField::ALL.into_iter().map(Focus::Field))
            .chain(std::iter::once(Focus::Submit))
            .collect()
    }

    /// Move focus forward, wrapping, and scroll to the contact section.
    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    /// Move focus backward, wrapping, and scroll to the contact section.
    pub fn focus_prev(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = self
            .focus
            .and_then(|focus| order.iter().position(|f| *f == focus));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        self.focus = order.get(index).copied();

        if !self
            .page
            .section(SectionId::Contact)
            .tracker()
            .is_intersecting()
        {
            self.page.scroll_to_section(SectionId::Contact);
        }
    }

    /// Drop keyboard focus.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// The form field being edited, if any.
    pub fn focused_field(&self) -> Option<FormField> {
        match self.focus {
            Some(Focus::Field(field)) => Some(field),
            _ => None,
        }
    }

    // ===== Form =====

    /// Submit the contact form.
    ///
    /// A valid form is cleared, logged and acknowledged with a toast. An
    /// invalid one keeps its values and shows the first problem.
    pub fn submit_form(&mut self, now: Duration, at: DateTime<Utc>) -> Option<Submission> {
        match self.form.submit(at) {
            Ok(submission) => {
                info!(
                    name = %submission.name,
                    email = %submission.email,
                    subject = %submission.subject,
                    chars = submission.message.chars().count(),
                    submitted_at = %submission.submitted_at.to_rfc3339(),
                    "contact form submitted"
                );
                self.toasts.info("Message sent!", now);
                self.focus = None;
                Some(submission)
            }
            Err(e) => {
                self.toasts.error(e.to_string(), now);
                None
            }
        }
    }

    // ===== Help =====

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
