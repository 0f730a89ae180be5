use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{Contact, ContactInput};

/// REST DTO for contact representation with serde
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDto {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and full-replacement update.
///
/// The field list is the write allow-list: unknown body fields are dropped
/// at deserialization and never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactUpsertReq {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

/// `{ "data": ... }` envelope wrapping record and list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Response body of the call-simulation endpoint (not enveloped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResponse {
    pub message: String,
    pub status: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            phone_number: contact.phone_number,
            email: contact.email,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl From<ContactDto> for Contact {
    fn from(dto: ContactDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            phone_number: dto.phone_number,
            email: dto.email,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<ContactUpsertReq> for ContactInput {
    fn from(req: ContactUpsertReq) -> Self {
        // Surrounding whitespace is never significant in these fields.
        Self {
            name: req.name.trim().to_string(),
            phone_number: req.phone_number.trim().to_string(),
            email: req.email.trim().to_string(),
        }
    }
}
