use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::model::{CallOutcome, Contact, ContactInput};

/// Public API trait for the contacts module that frontends and tooling can use
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// List all contacts
    async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>>;

    /// Get a contact by ID
    async fn get_contact(&self, id: Uuid) -> anyhow::Result<Contact>;

    /// Create a new contact
    async fn create_contact(&self, input: ContactInput) -> anyhow::Result<Contact>;

    /// Replace a contact's editable fields
    async fn update_contact(&self, id: Uuid, input: ContactInput) -> anyhow::Result<Contact>;

    /// Delete a contact by ID
    async fn delete_contact(&self, id: Uuid) -> anyhow::Result<()>;

    /// Simulate a call to a contact, returning the random outcome
    async fn simulate_call(&self, id: Uuid) -> anyhow::Result<CallOutcome>;
}
