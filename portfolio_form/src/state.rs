use std::collections::BTreeSet;

use portfolio_core_contact_contracts::SubmissionOutcome;
use portfolio_models::contact::{ContactField, ContactFormInput, FieldErrors, ValidatedContactForm};
use thiserror::Error;
use tracing::trace;

pub const SUBMIT_FAILED_MESSAGE: &str = "Your message could not be sent. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    /// Terminal until the form is reset.
    Submitted,
    /// Behaves like [`FormPhase::Editing`] but shows a failure message.
    SubmitFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormEditError {
    #[error("The message is currently being sent.")]
    Submitting,
    #[error("The message has already been sent.")]
    Submitted,
}

/// Identifies one submission. Results carrying an outdated ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Validation failed, the form is back in [`FormPhase::Editing`].
    Invalid(FieldErrors),
    /// A submission is in flight or the message was already sent.
    Ignored(FormPhase),
    /// The form is now [`FormPhase::Submitting`] and `payload` must be
    /// delivered.
    Start {
        ticket: SubmissionTicket,
        payload: ValidatedContactForm,
    },
}

/// Everything the rendering layer needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub input: ContactFormInput,
    pub errors: FieldErrors,
    pub phase: FormPhase,
    pub can_submit: bool,
    pub failure: Option<&'static str>,
}

/// State of a single contact form instance.
#[derive(Debug, Clone)]
pub struct FormState {
    input: ContactFormInput,
    errors: FieldErrors,
    dirty: BTreeSet<ContactField>,
    submit_attempted: bool,
    phase: FormPhase,
    last_ticket: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input: ContactFormInput::default(),
            errors: FieldErrors::default(),
            dirty: BTreeSet::new(),
            submit_attempted: false,
            phase: FormPhase::Editing,
            last_ticket: 0,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &ContactFormInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_dirty(&self, field: ContactField) -> bool {
        self.dirty.contains(&field)
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.phase, FormPhase::Editing | FormPhase::SubmitFailed)
    }

    pub fn failure(&self) -> Option<&'static str> {
        (self.phase == FormPhase::SubmitFailed).then_some(SUBMIT_FAILED_MESSAGE)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            input: self.input.clone(),
            errors: self.errors.clone(),
            phase: self.phase,
            can_submit: self.can_submit(),
            failure: self.failure(),
        }
    }

    /// Update a single field.
    ///
    /// Errors are only re-evaluated for `field` and only once a submit has
    /// been attempted.
    pub fn edit(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), FormEditError> {
        match self.phase {
            FormPhase::Submitting => return Err(FormEditError::Submitting),
            FormPhase::Submitted => return Err(FormEditError::Submitted),
            FormPhase::SubmitFailed => self.transition(FormPhase::Editing),
            FormPhase::Editing => {}
        }

        self.input.set(field, value);
        self.dirty.insert(field);
        if self.submit_attempted {
            self.errors.update(field, self.input.validate_field(field));
        }

        Ok(())
    }

    /// Validate the whole form with `validate` and, if it passes, move to
    /// [`FormPhase::Submitting`].
    pub fn begin_submit(
        &mut self,
        validate: impl FnOnce(&ContactFormInput) -> Result<ValidatedContactForm, FieldErrors>,
    ) -> Submission {
        if !self.can_submit() {
            trace!(phase = ?self.phase, "ignoring submit");
            return Submission::Ignored(self.phase);
        }

        self.submit_attempted = true;
        match validate(&self.input) {
            Err(errors) => {
                self.errors = errors.clone();
                self.transition(FormPhase::Editing);
                Submission::Invalid(errors)
            }
            Ok(payload) => {
                self.errors.clear();
                self.last_ticket += 1;
                self.transition(FormPhase::Submitting);
                Submission::Start {
                    ticket: SubmissionTicket(self.last_ticket),
                    payload,
                }
            }
        }
    }

    /// Apply the outcome of the submission identified by `ticket`.
    ///
    /// Returns `false` if the outcome is stale and was discarded.
    pub fn finish_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: &SubmissionOutcome,
    ) -> bool {
        if self.phase != FormPhase::Submitting || ticket.0 != self.last_ticket {
            return false;
        }

        self.transition(match outcome {
            SubmissionOutcome::Submitted => FormPhase::Submitted,
            SubmissionOutcome::Failed(_) => FormPhase::SubmitFailed,
        });
        true
    }

    /// Start over with an empty form. Pending submissions become stale.
    pub fn reset(&mut self) {
        *self = Self {
            last_ticket: self.last_ticket,
            ..Self::default()
        };
    }

    fn transition(&mut self, phase: FormPhase) {
        trace!(from = ?self.phase, to = ?phase, "contact form transition");
        self.phase = phase;
    }
}
