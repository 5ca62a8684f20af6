use std::sync::Arc;

use anyhow::bail;
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_form::{ContactForm, FormPhase, SubmissionReport, SubmitAttempt};
use portfolio_models::contact::{ContactField, ContactFormInput};

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in and submit the contact form
    Send {
        /// Your name
        #[arg(long)]
        name: String,
        /// Where the reply should go
        #[arg(long)]
        email: String,
        /// The message itself
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Send {
                name,
                email,
                message,
            } => {
                send(
                    config,
                    ContactFormInput {
                        name,
                        email,
                        message,
                    },
                )
                .await
            }
        }
    }
}

async fn send(config: Config, input: ContactFormInput) -> anyhow::Result<()> {
    let email = environment::email_service(&config.email)?;
    let form = ContactForm::new(Arc::new(environment::contact_service(&config, email)));

    for field in ContactField::ALL {
        form.edit(field, input.get(field)).await?;
    }

    let handle = match form.submit().await {
        SubmitAttempt::Started(handle) => handle,
        SubmitAttempt::Invalid(errors) => {
            for (field, message) in errors.messages() {
                eprintln!("{field}: {message}");
            }
            bail!("Invalid contact form");
        }
        SubmitAttempt::Ignored(phase) => bail!("Submission was ignored in phase {phase:?}"),
    };

    match handle.finished().await {
        SubmissionReport::Applied(FormPhase::Submitted) => {
            println!("Message sent");
            Ok(())
        }
        SubmissionReport::Applied(_) => {
            let failure = form.snapshot().await.failure;
            bail!("{}", failure.unwrap_or("Failed to send message"))
        }
        SubmissionReport::Discarded => bail!("Submission was discarded"),
    }
}
