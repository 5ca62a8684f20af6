use portfolio_core_contact_contracts::{ContactDeliveryService, ContactService, SubmissionOutcome};
use portfolio_models::contact::{ContactFormInput, FieldErrors, ValidatedContactForm};
use tracing::{info, warn};

pub mod email;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Delivery> {
    delivery: Delivery,
}

impl<Delivery> ContactServiceImpl<Delivery> {
    pub fn new(delivery: Delivery) -> Self {
        Self { delivery }
    }
}

impl<Delivery> ContactService for ContactServiceImpl<Delivery>
where
    Delivery: ContactDeliveryService,
{
    fn validate(&self, input: &ContactFormInput) -> Result<ValidatedContactForm, FieldErrors> {
        input.validate()
    }

    async fn submit(&self, payload: ValidatedContactForm) -> SubmissionOutcome {
        let outcome = SubmissionOutcome::from(self.delivery.deliver(&payload).await);

        match &outcome {
            SubmissionOutcome::Submitted => {
                info!(sender = %payload.email, "delivered contact message")
            }
            SubmissionOutcome::Failed(err) => {
                warn!(sender = %payload.email, "failed to deliver contact message: {err}")
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use portfolio_core_contact_contracts::{DeliveryError, MockContactDeliveryService};
    use portfolio_models::contact::ContactField;
    use portfolio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn input() -> ContactFormInput {
        ContactFormInput {
            name: "Al".into(),
            email: "al@example.com".into(),
            message: "Hello there, this is long enough.".into(),
        }
    }

    #[test]
    fn validate_ok() {
        // Arrange
        let sut = ContactServiceImpl::new(MockContactDeliveryService::new());

        // Act
        let result = sut.validate(&input());

        // Assert
        assert_eq!(result.unwrap().into_inner(), input());
    }

    #[test]
    fn validate_errors() {
        // Arrange
        let sut = ContactServiceImpl::new(MockContactDeliveryService::new());
        let input = ContactFormInput {
            name: "A".into(),
            message: "short".into(),
            ..input()
        };

        // Act
        let result = sut.validate(&input);

        // Assert
        let errors = result.unwrap_err();
        assert_eq!(
            errors.iter().map(|(field, _)| field).collect::<Vec<_>>(),
            [ContactField::Name, ContactField::Message]
        );
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let payload = input().validate().unwrap();
        let delivery = MockContactDeliveryService::new().with_deliver(payload.clone(), Ok(()));
        let sut = ContactServiceImpl::new(delivery);

        // Act
        let result = sut.submit(payload).await;

        // Assert
        assert_matches!(result, SubmissionOutcome::Submitted);
    }

    #[tokio::test]
    async fn submit_rejected() {
        // Arrange
        let payload = input().validate().unwrap();
        let delivery = MockContactDeliveryService::new()
            .with_deliver(payload.clone(), Err(DeliveryError::Rejected));
        let sut = ContactServiceImpl::new(delivery);

        // Act
        let result = sut.submit(payload).await;

        // Assert
        assert_matches!(result, SubmissionOutcome::Failed(DeliveryError::Rejected));
    }

    #[tokio::test]
    async fn submit_other_error() {
        // Arrange
        let payload = input().validate().unwrap();
        let delivery = MockContactDeliveryService::new().with_deliver(
            payload.clone(),
            Err(anyhow::anyhow!("connection reset").into()),
        );
        let sut = ContactServiceImpl::new(delivery);

        // Act
        let result = sut.submit(payload).await;

        // Assert
        assert_matches!(
            result,
            SubmissionOutcome::Failed(DeliveryError::Other(err)) if err.to_string() == "connection reset"
        );
    }
}
