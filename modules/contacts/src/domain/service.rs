use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{CallOutcome, Contact, ContactInput};
use crate::domain::call::{choose_outcome, log_outcome};
use crate::domain::error::DomainError;
use crate::domain::repo::ContactsRepository;

/// Domain service with business rules for contact management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ContactsRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_email_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 255,
            max_email_length: 255,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn ContactsRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "contacts.service.get_contact", skip(self), fields(contact_id = %id))]
    pub async fn get_contact(&self, id: Uuid) -> Result<Contact, DomainError> {
        debug!("Getting contact by id");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::contact_not_found(id))
    }

    #[instrument(name = "contacts.service.list_contacts", skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, DomainError> {
        debug!("Listing contacts");

        let contacts = self.repo.list_all().await?;
        debug!("Successfully listed {} contacts", contacts.len());
        Ok(contacts)
    }

    /// Lookup by the unique phone number; used by the CLI's id-or-phone
    /// identifier fallback and the upsert command.
    #[instrument(name = "contacts.service.find_by_phone_number", skip(self, phone_number))]
    pub async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Contact>, DomainError> {
        self.repo.find_by_phone_number(phone_number).await
    }

    #[instrument(
        name = "contacts.service.create_contact",
        skip(self),
        fields(phone_number = %input.phone_number, email = %input.email)
    )]
    pub async fn create_contact(&self, input: ContactInput) -> Result<Contact, DomainError> {
        info!("Creating new contact");

        self.validate_input(&input)?;

        // Friendly per-field checks; the unique indexes stay the authority.
        if self
            .repo
            .phone_number_exists(&input.phone_number, None)
            .await?
        {
            return Err(DomainError::phone_number_exists(input.phone_number));
        }
        if self.repo.email_exists(&input.email, None).await? {
            return Err(DomainError::email_exists(input.email));
        }

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::new_v4(),
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(contact.clone()).await?;

        info!("Successfully created contact with id={}", contact.id);
        Ok(contact)
    }

    /// Full replacement of the three editable fields; no partial-patch
    /// semantics. The fresh row is re-read after the write so callers never
    /// see a stale in-memory copy.
    #[instrument(
        name = "contacts.service.update_contact",
        skip(self),
        fields(contact_id = %id)
    )]
    pub async fn update_contact(
        &self,
        id: Uuid,
        input: ContactInput,
    ) -> Result<Contact, DomainError> {
        info!("Updating contact");

        self.validate_input(&input)?;

        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::contact_not_found(id))?;

        if self
            .repo
            .phone_number_exists(&input.phone_number, Some(id))
            .await?
        {
            return Err(DomainError::phone_number_exists(input.phone_number));
        }
        if self.repo.email_exists(&input.email, Some(id)).await? {
            return Err(DomainError::email_exists(input.email));
        }

        let updated = Contact {
            id,
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        self.repo.update(updated).await?;

        let fresh = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::contact_not_found(id))?;

        info!("Successfully updated contact");
        Ok(fresh)
    }

    #[instrument(
        name = "contacts.service.delete_contact",
        skip(self),
        fields(contact_id = %id)
    )]
    pub async fn delete_contact(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting contact");

        let deleted = self.repo.delete(id).await?;

        if !deleted {
            return Err(DomainError::contact_not_found(id));
        }

        info!("Successfully deleted contact");
        Ok(())
    }

    /// Simulate a call to the contact. Pure apart from the log record:
    /// nothing is persisted, the outcome is a uniform random draw.
    #[instrument(
        name = "contacts.service.simulate_call",
        skip(self),
        fields(contact_id = %id)
    )]
    pub async fn simulate_call(&self, id: Uuid) -> Result<CallOutcome, DomainError> {
        let contact = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::contact_not_found(id))?;

        let outcome = choose_outcome(&mut rand::rng());
        log_outcome(&contact, outcome);

        Ok(outcome)
    }

    // --- validation helpers ---
    //
    // Presence/length/shape only; the E.164 and AU/NZ prefix rules belong
    // to the interactive client layer.

    fn validate_input(&self, input: &ContactInput) -> Result<(), DomainError> {
        self.validate_name(&input.name)?;
        self.validate_phone_number(&input.phone_number)?;
        self.validate_email(&input.email)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if name.len() > self.config.max_name_length {
            return Err(DomainError::NameTooLong {
                len: name.len(),
                max: self.config.max_name_length,
            });
        }
        Ok(())
    }

    fn validate_phone_number(&self, phone_number: &str) -> Result<(), DomainError> {
        if phone_number.trim().is_empty() {
            return Err(DomainError::EmptyPhoneNumber);
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::EmptyEmail);
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email));
        }
        if email.len() > self.config.max_email_length {
            return Err(DomainError::EmailTooLong {
                len: email.len(),
                max: self.config.max_email_length,
            });
        }
        Ok(())
    }
}
