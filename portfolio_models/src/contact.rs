use std::{collections::BTreeMap, fmt, ops::Deref};

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::email_address::{parse_well_formed, EmailAddress};

pub const NAME_MIN_LEN: usize = 2;
pub const MESSAGE_MIN_LEN: usize = 10;

/// The contents of the contact form exactly as they were typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Value is shorter than {min_len} characters.")]
    TooShort { min_len: usize },
    #[error("Value is not well formed.")]
    InvalidFormat,
}

/// Field-scoped validation errors. Fields that passed their rule are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, ValidationError>);

/// A [`ContactFormInput`] that passed every field rule.
///
/// Can only be obtained through [`ContactFormInput::validate`], which makes
/// it the only thing that may be handed to a delivery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContactForm {
    input: ContactFormInput,
    sender: EmailAddress,
}

impl ContactFormInput {
    /// Checks all fields (without short-circuiting) and returns the unchanged
    /// input if every rule holds.
    pub fn validate(&self) -> Result<ValidatedContactForm, FieldErrors> {
        self.clone().try_into()
    }

    pub fn validate_field(&self, field: ContactField) -> Result<(), ValidationError> {
        let value = self.get(field);
        match field {
            ContactField::Name => check_min_len(value, NAME_MIN_LEN),
            ContactField::Email => parse_email(value).map(|_| ()),
            ContactField::Message => check_min_len(value, MESSAGE_MIN_LEN),
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field).err().map(|err| (field, err)))
            .collect()
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }
}

fn parse_email(value: &str) -> Result<EmailAddress, ValidationError> {
    parse_well_formed(value).ok_or(ValidationError::InvalidFormat)
}

fn check_min_len(value: &str, min_len: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min_len {
        Err(ValidationError::TooShort { min_len })
    } else {
        Ok(())
    }
}

impl TryFrom<ContactFormInput> for ValidatedContactForm {
    type Error = FieldErrors;

    fn try_from(input: ContactFormInput) -> Result<Self, Self::Error> {
        let errors = input.field_errors();
        match parse_email(&input.email) {
            Ok(sender) if errors.is_empty() => Ok(Self { input, sender }),
            _ => Err(errors),
        }
    }
}

impl ValidatedContactForm {
    /// The sender's address, usable as a reply-to.
    pub fn sender(&self) -> &EmailAddress {
        &self.sender
    }

    pub fn into_inner(self) -> ContactFormInput {
        self.input
    }
}

impl Deref for ValidatedContactForm {
    type Target = ContactFormInput;

    fn deref(&self) -> &Self::Target {
        &self.input
    }
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// The text shown next to the field when `error` applies to it.
    pub fn error_message(self, error: ValidationError) -> String {
        let (label, noun) = match self {
            Self::Name => ("Name", "name"),
            Self::Email => ("Email", "email address"),
            Self::Message => ("Message", "message"),
        };
        match error {
            ValidationError::TooShort { min_len } => {
                format!("{label} must be at least {min_len} characters")
            }
            ValidationError::InvalidFormat => format!("Invalid {noun}"),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn message(&self, field: ContactField) -> Option<String> {
        self.get(field).map(|err| field.error_message(err))
    }

    /// Replaces the entry for `field` with the outcome of its rule.
    pub fn update(&mut self, field: ContactField, result: Result<(), ValidationError>) {
        match result {
            Ok(()) => self.0.remove(&field),
            Err(err) => self.0.insert(field, err),
        };
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, ValidationError)> + '_ {
        self.0.iter().map(|(&field, &err)| (field, err))
    }

    pub fn messages(&self) -> BTreeMap<ContactField, String> {
        self.iter()
            .map(|(field, err)| (field, field.error_message(err)))
            .collect()
    }
}

impl FromIterator<(ContactField, ValidationError)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, ValidationError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, err) in self.iter() {
            map.serialize_entry(&field, &field.error_message(err))?;
        }
        map.end()
    }
}
