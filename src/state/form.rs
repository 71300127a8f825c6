//! Contact form state (pure).
//!
//! Submitting never leaves the process: a valid form produces a
//! [`Submission`] which the shell logs, then the form is cleared.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Longest accepted value per field, in characters.
pub const MAX_FIELD_CHARS: usize = 2000;

/// One input of the contact form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Sender's name.
    Name,
    /// Reply address.
    Email,
    /// Subject line.
    Subject,
    /// Message body.
    Message,
}

impl FormField {
    /// Every field in Tab order.
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    /// Label drawn above the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    /// Hint shown while the input is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Your name",
            FormField::Email => "you@example.com",
            FormField::Subject => "What is this about?",
            FormField::Message => "Write your message",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Why a form could not be submitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is blank.
    #[error("{} is required", .0.label())]
    Missing(FormField),

    /// The email has no `local@domain.tld` shape.
    #[error("Email address looks invalid")]
    InvalidEmail,
}

/// A validated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Sender's name, trimmed.
    pub name: String,
    /// Reply address, trimmed.
    pub email: String,
    /// Subject line, trimmed.
    pub subject: String,
    /// Message body as typed.
    pub message: String,
    /// When the form was sent.
    pub submitted_at: DateTime<Utc>,
}

/// Values typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    values: [String; 4],
}

impl ContactForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Append a character. Control characters other than newline in the
    /// message are ignored, as is input past [`MAX_FIELD_CHARS`].
    pub fn insert_char(&mut self, field: FormField, ch: char) {
        let allowed = !ch.is_control() || (ch == '\n' && field == FormField::Message);
        let value = &mut self.values[field.index()];
        if allowed && value.chars().count() < MAX_FIELD_CHARS {
            value.push(ch);
        }
    }

    /// Delete the last character of `field`.
    pub fn backspace(&mut self, field: FormField) {
        self.values[field.index()].pop();
    }

    /// Whether every field is blank.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First problem with the current values, checked in field order.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in FormField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(FormError::Missing(field));
            }
        }
        if !looks_like_email(self.value(FormField::Email).trim()) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate, take the values and clear the form.
    ///
    /// On error the form is left untouched.
    pub fn submit(&mut self, at: DateTime<Utc>) -> Result<Submission, FormError> {
        self.validate()?;
        let [name, email, subject, message] = std::mem::take(&mut self.values);
        Ok(Submission {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message,
            submitted_at: at,
        })
    }
}

/// `local@domain.tld` with no whitespace and a non-empty part on each side.
fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        for (field, text) in [
            (FormField::Name, "Ada"),
            (FormField::Email, "ada@example.com"),
            (FormField::Subject, "Hello"),
            (FormField::Message, "Nice site"),
        ] {
            for ch in text.chars() {
                form.insert_char(field, ch);
            }
        }
        form
    }

    #[test]
    fn empty_form_reports_first_missing_field() {
        let form = ContactForm::new();
        assert_eq!(form.validate(), Err(FormError::Missing(FormField::Name)));
        assert_eq!(
            FormError::Missing(FormField::Name).to_string(),
            "Name is required"
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = filled();
        form.values[FormField::Subject.index()] = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::Missing(FormField::Subject)));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut form = filled();
        form.values[FormField::Email.index()] = "ada.example.com".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn submit_returns_values_and_clears() {
        let mut form = filled();
        let at = Utc::now();
        let submission = form.submit(at).unwrap();

        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.subject, "Hello");
        assert_eq!(submission.message, "Nice site");
        assert_eq!(submission.submitted_at, at);
        assert!(form.is_empty());
    }

    #[test]
    fn failed_submit_keeps_values() {
        let mut form = filled();
        form.backspace(FormField::Message);
        form.values[FormField::Email.index()].clear();
        let before = form.clone();

        assert!(form.submit(Utc::now()).is_err());
        assert_eq!(form, before);
    }

    #[test]
    fn backspace_removes_last_char_including_multibyte() {
        let mut form = ContactForm::new();
        for ch in "유근".chars() {
            form.insert_char(FormField::Name, ch);
        }
        form.backspace(FormField::Name);
        assert_eq!(form.value(FormField::Name), "유");
        form.backspace(FormField::Name);
        form.backspace(FormField::Name);
        assert_eq!(form.value(FormField::Name), "");
    }

    #[test]
    fn newline_only_allowed_in_message() {
        let mut form = ContactForm::new();
        form.insert_char(FormField::Name, '\n');
        form.insert_char(FormField::Message, '\n');
        form.insert_char(FormField::Message, '\t');
        assert_eq!(form.value(FormField::Name), "");
        assert_eq!(form.value(FormField::Message), "\n");
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last+tag@sub.example.org"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a@.co"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("a@b@c.d"));
    }

    proptest! {
        #[test]
        fn field_length_is_capped(text in "[a-z]{0,50}", extra in 0usize..10) {
            let mut form = ContactForm::new();
            form.values[FormField::Subject.index()] = "x".repeat(MAX_FIELD_CHARS - extra.min(MAX_FIELD_CHARS));
            for ch in text.chars() {
                form.insert_char(FormField::Subject, ch);
            }
            prop_assert!(form.value(FormField::Subject).chars().count() <= MAX_FIELD_CHARS);
        }
    }
}
