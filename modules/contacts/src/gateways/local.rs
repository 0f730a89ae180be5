use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::ContactsApi,
    error::ContactsError,
    model::{CallOutcome, Contact, ContactInput},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the ContactsApi trait that delegates to the domain service
pub struct ContactsLocalClient {
    service: Arc<Service>,
}

impl ContactsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContactsApi for ContactsLocalClient {
    async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>> {
        self.service
            .list_contacts()
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_contact(&self, id: Uuid) -> anyhow::Result<Contact> {
        self.service
            .get_contact(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn create_contact(&self, input: ContactInput) -> anyhow::Result<Contact> {
        self.service
            .create_contact(input)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_contact(&self, id: Uuid, input: ContactInput) -> anyhow::Result<Contact> {
        self.service
            .update_contact(id, input)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_contact(&self, id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_contact(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn simulate_call(&self, id: Uuid) -> anyhow::Result<CallOutcome> {
        self.service
            .simulate_call(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match &domain_error {
        DomainError::ContactNotFound { id } => ContactsError::not_found(*id),
        DomainError::PhoneNumberExists { phone_number } => {
            ContactsError::phone_number_taken(phone_number.clone())
        }
        DomainError::EmailExists { email } => ContactsError::email_taken(email.clone()),
        DomainError::EmptyName
        | DomainError::NameTooLong { .. }
        | DomainError::EmptyPhoneNumber
        | DomainError::EmptyEmail
        | DomainError::InvalidEmail { .. }
        | DomainError::EmailTooLong { .. } => {
            ContactsError::validation(domain_error.to_string())
        }
        DomainError::Database { .. } => ContactsError::internal(),
    };

    anyhow::Error::new(contract_error)
}
