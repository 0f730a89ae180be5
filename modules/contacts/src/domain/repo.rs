use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::Contact;
use crate::domain::error::DomainError;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Duplicate phone numbers and emails must surface as the matching
/// `DomainError` variant even when the application-level existence check
/// raced another writer: the table's unique indexes are the authority.
#[async_trait]
pub trait ContactsRepository: Send + Sync {
    /// Load a contact by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, DomainError>;
    /// Load a contact by its (unique) phone number.
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Contact>, DomainError>;
    /// All contacts in creation order.
    async fn list_all(&self) -> Result<Vec<Contact>, DomainError>;
    /// Check uniqueness by phone number, optionally ignoring one contact
    /// (the contact being updated).
    async fn phone_number_exists(
        &self,
        phone_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError>;
    /// Check uniqueness by email, optionally ignoring one contact.
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>)
        -> Result<bool, DomainError>;
    /// Insert a fully-formed domain contact.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, contact: Contact) -> Result<(), DomainError>;
    /// Update an existing contact (by primary key in `contact.id`).
    async fn update(&self, contact: Contact) -> Result<(), DomainError>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
