use std::future::Future;

use immerse_models::email_address::EmailAddress;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Make exactly one attempt at handing `email` to the relay.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;

    fn ping(&self) -> impl Future<Output = Result<(), EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    /// Display name shown next to the configured sender address.
    pub sender_name: Option<String>,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("Email relay is not configured: {0} is missing.")]
    NotConfigured(RelaySetting),
    #[error("Email relay failed to deliver the message: {0}")]
    Delivery(#[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Relay settings that must be present before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySetting {
    Host,
    Port,
    Username,
    Password,
    From,
}

impl std::fmt::Display for RelaySetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Host => "smtp.host",
            Self::Port => "smtp.port",
            Self::Username => "smtp.username",
            Self::Password => "smtp.password",
            Self::From => "smtp.from",
        })
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: Result<(), EmailSendError>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
