use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Contact not found: {id}")]
    ContactNotFound { id: Uuid },

    #[error("Contact with phone number '{phone_number}' already exists")]
    PhoneNumberExists { phone_number: String },

    #[error("Contact with email '{email}' already exists")]
    EmailExists { email: String },

    #[error("Name is required")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Phone number is required")]
    EmptyPhoneNumber,

    #[error("Email is required")]
    EmptyEmail,

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Email too long: {len} characters (max: {max})")]
    EmailTooLong { len: usize, max: usize },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn contact_not_found(id: Uuid) -> Self {
        Self::ContactNotFound { id }
    }

    pub fn phone_number_exists(phone_number: impl Into<String>) -> Self {
        Self::PhoneNumberExists {
            phone_number: phone_number.into(),
        }
    }

    pub fn email_exists(email: impl Into<String>) -> Self {
        Self::EmailExists {
            email: email.into(),
        }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
