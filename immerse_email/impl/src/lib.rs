use std::sync::Arc;

use anyhow::{anyhow, Context};
use immerse_email_contracts::{Email, EmailSendError, EmailService, RelaySetting};
use immerse_models::{email_address::EmailAddress, Sensitive};
use immerse_utils::Apply;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: Arc<SmtpRelayConfig>,
}

/// Connection settings of the outbound relay.
///
/// Every field is optional so that an incomplete deployment can still start;
/// the settings are checked whenever an email is about to be sent.
#[derive(Debug, Clone, Default)]
pub struct SmtpRelayConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: Option<EmailAddress>,
}

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS).
    ImplicitTls,
    /// Plain connection, upgraded with STARTTLS if the relay offers it.
    OpportunisticStartTls,
}

impl SmtpSecurity {
    pub const IMPLICIT_TLS_PORT: u16 = 465;

    pub fn for_port(port: u16) -> Self {
        if port == Self::IMPLICIT_TLS_PORT {
            Self::ImplicitTls
        } else {
            Self::OpportunisticStartTls
        }
    }
}

#[derive(Debug)]
struct SmtpRelay<'a> {
    host: &'a str,
    port: u16,
    username: &'a str,
    password: &'a Sensitive<String>,
    from: &'a EmailAddress,
}

impl SmtpRelayConfig {
    fn resolve(&self) -> Result<SmtpRelay<'_>, RelaySetting> {
        Ok(SmtpRelay {
            host: self.host.as_deref().ok_or(RelaySetting::Host)?,
            port: self.port.ok_or(RelaySetting::Port)?,
            username: self.username.as_deref().ok_or(RelaySetting::Username)?,
            password: self.password.as_ref().ok_or(RelaySetting::Password)?,
            from: self.from.as_ref().ok_or(RelaySetting::From)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.resolve().is_ok()
    }
}

impl EmailServiceImpl {
    pub fn new(config: SmtpRelayConfig) -> Self {
        Self {
            config: config.into(),
        }
    }

    fn relay(&self) -> Result<SmtpRelay<'_>, EmailSendError> {
        self.config.resolve().map_err(EmailSendError::NotConfigured)
    }
}

impl SmtpRelay<'_> {
    fn tls(&self) -> anyhow::Result<Tls> {
        let parameters = TlsParameters::new(self.host.into())?;
        Ok(match SmtpSecurity::for_port(self.port) {
            SmtpSecurity::ImplicitTls => Tls::Wrapper(parameters),
            SmtpSecurity::OpportunisticStartTls => Tls::Opportunistic(parameters),
        })
    }

    /// Build a fresh transport for a single send.
    fn transport(&self) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.host)
                .port(self.port)
                .tls(self.tls()?)
                .credentials(Credentials::new(
                    self.username.into(),
                    self.password.0.clone(),
                ))
                .build(),
        )
    }

    fn message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(Mailbox::new(email.sender_name, self.from.0.clone()))
            .to(Mailbox::new(None, email.recipient.0))
            .apply_map(email.reply_to, |builder, reply_to| {
                builder.reply_to(Mailbox::new(None, reply_to.0))
            })
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.body_text,
                email.body_html,
            ))
            .context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let relay = self.relay()?;
        let recipient = email.recipient.clone();
        let message = relay.message(email)?;
        let transport = relay.transport()?;

        debug!(host = relay.host, port = relay.port, "sending email via relay");
        let response = transport
            .send(message)
            .await
            .map_err(|err| EmailSendError::Delivery(err.into()))?;

        if !response.is_positive() {
            return Err(EmailSendError::Delivery(anyhow!(
                "relay responded with {}",
                response.code()
            )));
        }

        info!(%recipient, "email accepted by relay");
        Ok(())
    }

    async fn ping(&self) -> Result<(), EmailSendError> {
        let relay = self.relay()?;

        relay
            .transport()?
            .test_connection()
            .await
            .map_err(|err| EmailSendError::Delivery(err.into()))?
            .then_some(())
            .ok_or_else(|| EmailSendError::Delivery(anyhow!("Failed to ping smtp server")))
    }
}
