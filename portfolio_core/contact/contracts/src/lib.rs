use std::future::Future;

use portfolio_models::contact::{ContactFormInput, FieldErrors, ValidatedContactForm};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Check every field rule of `input`. Performs no I/O and no logging.
    fn validate(&self, input: &ContactFormInput) -> Result<ValidatedContactForm, FieldErrors>;

    /// Hand a validated payload to the delivery mechanism exactly once.
    ///
    /// Retries are left to the delivery mechanism.
    fn submit(&self, payload: ValidatedContactForm)
        -> impl Future<Output = SubmissionOutcome> + Send;
}

/// The mechanism that actually transmits a contact message.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDeliveryService: Send + Sync + 'static {
    fn deliver(
        &self,
        payload: &ValidatedContactForm,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Submitted,
    Failed(DeliveryError),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("The message was rejected.")]
    Rejected,
    #[error("Timed out while delivering the message.")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

impl From<Result<(), DeliveryError>> for SubmissionOutcome {
    fn from(value: Result<(), DeliveryError>) -> Self {
        match value {
            Ok(()) => Self::Submitted,
            Err(err) => Self::Failed(err),
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactDeliveryService {
    pub fn with_deliver(
        mut self,
        payload: ValidatedContactForm,
        result: Result<(), DeliveryError>,
    ) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    /// Like [`Self::with_deliver`], but delivery only resolves once `gate` does.
    pub fn with_deliver_gated(
        mut self,
        payload: ValidatedContactForm,
        gate: impl std::future::Future<Output = Result<(), DeliveryError>> + Send + 'static,
    ) -> Self {
        self.expect_deliver()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(gate));
        self
    }
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_validate(
        mut self,
        input: ContactFormInput,
        result: Result<ValidatedContactForm, FieldErrors>,
    ) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(input))
            .return_once(move |_| result);
        self
    }

    pub fn with_submit(mut self, payload: ValidatedContactForm, result: SubmissionOutcome) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
