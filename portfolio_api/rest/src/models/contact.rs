use portfolio_models::contact::{ContactFormInput, FieldErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactForm {
    /// Name of the sender
    pub name: String,
    /// Email address to reply to
    pub email: String,
    pub message: String,
}

impl From<ApiContactForm> for ContactFormInput {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiInvalidContactForm {
    pub detail: &'static str,
    /// Field name to error message, one entry per failed field
    pub fields: FieldErrors,
}
