use anyhow::Context;
use clap::Subcommand;
use immerse_config::Config;
use immerse_email_contracts::{Email, EmailService};
use immerse_models::email_address::EmailAddress;

use crate::environment::Environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let email_service = Environment::new(&config)?.email();

    email_service
        .send(Email {
            recipient,
            sender_name: None,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body_text: "Email deliverability seems to be working!".into(),
            body_html: "<p>Email deliverability seems to be working!</p>".into(),
        })
        .await
        .context("Failed to send email")
}
