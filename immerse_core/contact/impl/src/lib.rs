use std::sync::{Arc, LazyLock};

use immerse_core_contact_contracts::{ContactSendMessageError, ContactService};
use immerse_email_contracts::{Email, EmailSendError, EmailService};
use immerse_models::{contact::ContactSubmission, email_address::EmailAddress};
use immerse_templates_contracts::{ContactSubmissionTemplate, TemplateService};
use tracing::info;

/// Recipient used when no contact recipient is configured.
pub static DEFAULT_CONTACT_RECIPIENT: LazyLock<EmailAddress> =
    LazyLock::new(|| "info@immersegeek.com".parse().unwrap());

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipient: Arc<EmailAddress>,
}

impl ContactServiceConfig {
    pub fn new(recipient: Option<EmailAddress>) -> Self {
        Self {
            recipient: recipient
                .unwrap_or_else(|| DEFAULT_CONTACT_RECIPIENT.clone())
                .into(),
        }
    }
}

impl<EmailS, Template> ContactServiceImpl<EmailS, Template> {
    pub fn new(email: EmailS, template: Template, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config,
        }
    }
}

impl<EmailS, Template> ContactService for ContactServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let body_html = self.template.render(&ContactSubmissionTemplate {
            name: submission.name().into(),
            email: submission.email().as_str().into(),
            message: submission.message().into(),
        })?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            sender_name: Some(submission.name().into()),
            reply_to: Some(submission.email().clone()),
            subject: format!("Contact Form Submission from {}", submission.name()),
            body_text: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                submission.name(),
                submission.email(),
                submission.message()
            ),
            body_html,
        };

        self.email.send(email).await.map_err(|err| match err {
            EmailSendError::NotConfigured(setting) => {
                ContactSendMessageError::NotConfigured(setting)
            }
            EmailSendError::Delivery(err) => ContactSendMessageError::Send(err),
            EmailSendError::Other(err) => ContactSendMessageError::Other(err),
        })?;

        info!(recipient = %self.config.recipient, "contact message forwarded");

        Ok(())
    }
}
