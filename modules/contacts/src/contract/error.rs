use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to other crates
#[derive(Error, Debug, Clone)]
pub enum ContactsError {
    #[error("Contact not found: {id}")]
    NotFound { id: Uuid },

    #[error("Contact with phone number '{phone_number}' already exists")]
    PhoneNumberTaken { phone_number: String },

    #[error("Contact with email '{email}' already exists")]
    EmailTaken { email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ContactsError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn phone_number_taken(phone_number: String) -> Self {
        Self::PhoneNumberTaken { phone_number }
    }

    pub fn email_taken(email: String) -> Self {
        Self::EmailTaken { email }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}
