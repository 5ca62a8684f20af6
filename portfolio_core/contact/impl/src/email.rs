use std::{sync::Arc, time::Duration};

use portfolio_core_contact_contracts::{ContactDeliveryService, DeliveryError};
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::{contact::ValidatedContactForm, email_address::EmailAddressWithName};

/// Delivers contact messages as plain text emails to a fixed recipient.
#[derive(Debug, Clone)]
pub struct EmailContactDeliveryServiceImpl<Email> {
    email: Email,
    config: ContactDeliveryConfig,
}

#[derive(Debug, Clone)]
pub struct ContactDeliveryConfig {
    pub recipient: Arc<EmailAddressWithName>,
    pub subject_prefix: Arc<str>,
    pub timeout: Duration,
}

impl<EmailS> EmailContactDeliveryServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactDeliveryConfig) -> Self {
        Self { email, config }
    }

    fn compose(&self, payload: &ValidatedContactForm) -> Email {
        let name = payload.name.trim();

        let subject = match &*self.config.subject_prefix {
            "" => format!("Message from {name}"),
            prefix => format!("{prefix} Message from {name}"),
        };

        Email {
            recipient: (*self.config.recipient).clone(),
            subject,
            body: format!(
                "Message from {name} ({}):\n\n{}",
                payload.email, payload.message
            ),
            reply_to: Some(payload.sender().clone().with_name(name.into())),
        }
    }
}

impl<EmailS> ContactDeliveryService for EmailContactDeliveryServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn deliver(&self, payload: &ValidatedContactForm) -> Result<(), DeliveryError> {
        let email = self.compose(payload);

        match tokio::time::timeout(self.config.timeout, self.email.send(email)).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(DeliveryError::Rejected),
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(DeliveryError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use portfolio_email_contracts::MockEmailService;
    use portfolio_models::contact::ContactFormInput;
    use portfolio_utils::assert_matches;

    use super::*;

    fn config() -> ContactDeliveryConfig {
        ContactDeliveryConfig {
            recipient: Arc::new("Truong <truong@example.com>".parse().unwrap()),
            subject_prefix: "[Portfolio Contact]".into(),
            timeout: Duration::from_secs(30),
        }
    }

    fn payload() -> ValidatedContactForm {
        ContactFormInput {
            name: " Max ".into(),
            email: "max@example.de".into(),
            message: "Hello World! Let's build something.".into(),
        }
        .validate()
        .unwrap()
    }

    fn expected_email(config: &ContactDeliveryConfig, reply_to: &str) -> Email {
        Email {
            recipient: (*config.recipient).clone(),
            subject: "[Portfolio Contact] Message from Max".into(),
            body: "Message from Max (max@example.de):\n\nHello World! Let's build something."
                .into(),
            reply_to: Some(reply_to.parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = config();
        let email = MockEmailService::new()
            .with_send(expected_email(&config, "Max <max@example.de>"), true);
        let sut = EmailContactDeliveryServiceImpl::new(email, config);

        // Act
        let result = sut.deliver(&payload()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let config = config();
        let email = MockEmailService::new()
            .with_send(expected_email(&config, "Max <max@example.de>"), false);
        let sut = EmailContactDeliveryServiceImpl::new(email, config);

        // Act
        let result = sut.deliver(&payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryError::Rejected));
    }

    #[tokio::test]
    async fn transport_error() {
        // Arrange
        let config = config();
        let email = MockEmailService::new()
            .with_send_error(expected_email(&config, "Max <max@example.de>"));
        let sut = EmailContactDeliveryServiceImpl::new(email, config);

        // Act
        let result = sut.deliver(&payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryError::Other(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout() {
        // Arrange
        let config = config();
        let email = MockEmailService::new()
            .with_send_pending(expected_email(&config, "Max <max@example.de>"));
        let sut = EmailContactDeliveryServiceImpl::new(email, config);

        // Act
        let result = sut.deliver(&payload()).await;

        // Assert
        assert_matches!(result, Err(DeliveryError::Timeout));
    }

    #[tokio::test]
    async fn without_subject_prefix() {
        // Arrange
        let config = ContactDeliveryConfig {
            subject_prefix: "".into(),
            ..config()
        };
        let expected = Email {
            subject: "Message from Max".into(),
            ..expected_email(&config, "Max <max@example.de>")
        };
        let email = MockEmailService::new().with_send(expected, true);
        let sut = EmailContactDeliveryServiceImpl::new(email, config);

        // Act
        let result = sut.deliver(&payload()).await;

        // Assert
        result.unwrap();
    }
}
