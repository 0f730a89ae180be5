//! The contact form schema shared by the create and edit workflows.
//! One rule set, so the two dialogs cannot drift apart.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::client::ContactsApi;
use crate::contract::model::{Contact, ContactInput};

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;

// E.164: "+" then 2-15 digits, first digit nonzero.
fn e164_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid regex literal"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex literal"))
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for messages in self.0.values() {
            for message in messages {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Why a form submission did not produce a contact.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Validation failed locally; nothing reached the API.
    #[error("{0}")]
    Invalid(FieldErrors),
    /// The API rejected the request; the message is the server's, verbatim.
    #[error("{0}")]
    Api(anyhow::Error),
}

/// Field state of the create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl ContactForm {
    /// Pre-populate the form from an existing contact (edit dialog).
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
        }
    }

    /// Run the full rule set, returning either trimmed, submission-ready
    /// input or the per-field error messages.
    pub fn validate(&self) -> Result<ContactInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required.");
        } else if name.len() > MAX_NAME_LEN {
            errors.push("name", "Name cannot exceed 255 characters.");
        }

        let phone_number = self.phone_number.trim();
        if phone_number.is_empty() {
            errors.push("phone_number", "Phone number is required.");
        } else if !e164_regex().is_match(phone_number) {
            errors.push("phone_number", "Invalid E164 format (e.g., +61412345678).");
        } else if !phone_number.starts_with("+61") && !phone_number.starts_with("+64") {
            errors.push(
                "phone_number",
                "Must be an Australian (+61) or New Zealand (+64) number.",
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required.");
        } else if !email_regex().is_match(email) {
            errors.push("email", "Invalid email address.");
        } else if email.len() > MAX_EMAIL_LEN {
            errors.push("email", "Email cannot exceed 255 characters.");
        }

        if errors.is_empty() {
            Ok(ContactInput {
                name: name.to_string(),
                phone_number: phone_number.to_string(),
                email: email.to_string(),
            })
        } else {
            Err(errors)
        }
    }

    /// Validate, then create. Invalid forms never reach the API.
    pub async fn submit_create(&self, api: &dyn ContactsApi) -> Result<Contact, SubmitError> {
        let input = self.validate().map_err(SubmitError::Invalid)?;
        api.create_contact(input).await.map_err(SubmitError::Api)
    }

    /// Validate, then replace the contact's fields. Invalid forms never
    /// reach the API.
    pub async fn submit_update(
        &self,
        api: &dyn ContactsApi,
        id: Uuid,
    ) -> Result<Contact, SubmitError> {
        let input = self.validate().map_err(SubmitError::Invalid)?;
        api.update_contact(id, input).await.map_err(SubmitError::Api)
    }
}
