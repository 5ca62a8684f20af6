use std::{panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use portfolio_core_contact_contracts::{ContactService, DeliveryError, SubmissionOutcome};
use portfolio_models::contact::{ContactField, FieldErrors};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error};

pub use state::{
    FormEditError, FormPhase, FormSnapshot, FormState, Submission, SubmissionTicket,
    SUBMIT_FAILED_MESSAGE,
};

mod state;

/// A contact form instance wired to a [`ContactService`].
///
/// Dropping the form tears it down: a delivery that is still in flight keeps
/// running, but its result is discarded.
#[derive(Debug)]
pub struct ContactForm<Contact> {
    contact: Arc<Contact>,
    state: Arc<Mutex<FormState>>,
}

#[derive(Debug)]
pub enum SubmitAttempt {
    Invalid(FieldErrors),
    Ignored(FormPhase),
    Started(SubmissionHandle),
}

#[derive(Debug)]
pub struct SubmissionHandle(JoinHandle<SubmissionReport>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReport {
    /// The outcome was applied and the form is now in the given phase.
    Applied(FormPhase),
    /// The form was torn down or reset before delivery finished.
    Discarded,
}

impl<Contact> ContactForm<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Arc<Contact>) -> Self {
        Self {
            contact,
            state: Default::default(),
        }
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn edit(
        &self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), FormEditError> {
        self.state.lock().await.edit(field, value)
    }

    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }

    /// Validate the current input and, if it is valid, start delivering it in
    /// the background.
    ///
    /// While a delivery is in flight further submits are ignored.
    pub async fn submit(&self) -> SubmitAttempt {
        let (ticket, payload) = match self
            .state
            .lock()
            .await
            .begin_submit(|input| self.contact.validate(input))
        {
            Submission::Invalid(errors) => return SubmitAttempt::Invalid(errors),
            Submission::Ignored(phase) => return SubmitAttempt::Ignored(phase),
            Submission::Start { ticket, payload } => (ticket, payload),
        };

        let contact = Arc::clone(&self.contact);
        let state = Arc::downgrade(&self.state);
        let task = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(contact.submit(payload))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    error!("contact form delivery panicked");
                    SubmissionOutcome::Failed(DeliveryError::Other(anyhow::anyhow!(
                        "delivery panicked"
                    )))
                });

            let Some(state) = state.upgrade() else {
                debug!("contact form was torn down, discarding submission outcome");
                return SubmissionReport::Discarded;
            };
            let mut state = state.lock().await;
            if state.finish_submit(ticket, &outcome) {
                SubmissionReport::Applied(state.phase())
            } else {
                debug!("contact form was reset, discarding submission outcome");
                SubmissionReport::Discarded
            }
        });

        SubmitAttempt::Started(SubmissionHandle(task))
    }
}

impl SubmissionHandle {
    /// Wait for the delivery to finish.
    pub async fn finished(self) -> SubmissionReport {
        self.0.await.unwrap_or_else(|err| {
            error!("contact form submission task failed: {err}");
            SubmissionReport::Discarded
        })
    }
}
