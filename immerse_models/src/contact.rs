use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::email_address::EmailAddress;

pub const CONTACT_NAME_MAX_CHARS: usize = 100;
pub const CONTACT_EMAIL_MAX_CHARS: usize = 100;
pub const CONTACT_MESSAGE_MAX_CHARS: usize = 2000;

/// Deliberately permissive `local@domain.tld` shape check.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Untrusted contact form payload as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A sanitized contact form submission.
///
/// Can only be obtained through [`ContactSubmission::validate`], so every
/// field is trimmed, non-empty and within its length cap, and the email
/// address has passed the shape check and can be used as a Reply-To header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: EmailAddress,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFieldError {
    Required,
    InvalidFormat,
}

/// All field level violations found in a single submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactValidationErrors(BTreeMap<ContactField, ContactFieldError>);

impl ContactSubmission {
    /// Check and sanitize a raw submission.
    ///
    /// Fields are trimmed and truncated to their caps, never rejected for
    /// being too long. The email format checks only run when the email field
    /// is present and operate on the sanitized value, so validating the
    /// result again always succeeds with an identical submission.
    ///
    /// An address longer than its cap is therefore checked after the cut and
    /// usually fails with `invalid_format`.
    ///
    /// Besides the shape check the address must be accepted by lettre, since
    /// it is relayed as the Reply-To of the outbound email.
    pub fn validate(raw: RawContactSubmission) -> Result<Self, ContactValidationErrors> {
        let mut errors = ContactValidationErrors::default();

        let name = errors.require(ContactField::Name, raw.name, CONTACT_NAME_MAX_CHARS);

        let email = errors
            .require(ContactField::Email, raw.email, CONTACT_EMAIL_MAX_CHARS)
            .and_then(|email| {
                let address = CONTACT_EMAIL_REGEX
                    .is_match(&email)
                    .then(|| email.parse::<EmailAddress>().ok())
                    .flatten();
                if address.is_none() {
                    errors.insert(ContactField::Email, ContactFieldError::InvalidFormat);
                }
                address
            });

        let message = errors.require(ContactField::Message, raw.message, CONTACT_MESSAGE_MAX_CHARS);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ContactSubmission> for RawContactSubmission {
    fn from(value: ContactSubmission) -> Self {
        Self {
            name: Some(value.name),
            email: Some(value.email.as_str().into()),
            message: Some(value.message),
        }
    }
}

impl ContactValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether at least one field was missing or blank.
    pub fn has_required(&self) -> bool {
        self.0.values().any(|&e| e == ContactFieldError::Required)
    }

    fn insert(&mut self, field: ContactField, error: ContactFieldError) {
        self.0.insert(field, error);
    }

    fn require(
        &mut self,
        field: ContactField,
        value: Option<String>,
        max_chars: usize,
    ) -> Option<String> {
        let value = value
            .as_deref()
            .map(|value| sanitize(value, max_chars))
            .filter(|value| !value.is_empty());
        if value.is_none() {
            self.insert(field, ContactFieldError::Required);
        }
        value
    }
}

impl FromIterator<(ContactField, ContactFieldError)> for ContactValidationErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, ContactFieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Trim and cap `value` at `max_chars` characters.
///
/// Whitespace exposed at the end by the cut is trimmed as well.
fn sanitize(value: &str, max_chars: usize) -> String {
    let value = value.trim();
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => value[..end].trim_end().into(),
        None => value.into(),
    }
}
