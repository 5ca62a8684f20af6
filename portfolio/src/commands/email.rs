use anyhow::ensure;
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email through the configured smtp server
    Test {
        /// Defaults to the recipient of contact form messages
        recipient: Option<EmailAddressWithName>,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => {
                let recipient = recipient.unwrap_or_else(|| config.contact.recipient.clone());
                test(config, recipient).await
            }
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email = environment::email_service(&config.email)?;

    info!(%recipient, "sending test email");
    let accepted = email
        .send(Email {
            recipient,
            subject: format!("{} Test message", config.contact.subject_prefix)
                .trim_start()
                .to_owned(),
            body: "If you can read this, contact form messages will reach you too.".into(),
            reply_to: None,
        })
        .await?;

    ensure!(accepted, "The smtp server did not accept the test email");

    Ok(())
}
