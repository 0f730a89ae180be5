//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::contract::model::Contact;
use crate::domain::error::DomainError;
use crate::domain::repo::ContactsRepository;
use crate::infra::storage::entity::{ActiveModel as ContactAM, Column, Entity as ContactEntity};
use crate::infra::storage::mapper::entity_to_contract;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Translate a write failure into a domain error.
///
/// A unique-index violation is mapped back to the per-field duplicate error
/// so a racing insert reports the same thing the pre-check would have.
fn map_write_err(contact: &Contact, err: DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("phone_number") {
                DomainError::phone_number_exists(&contact.phone_number)
            } else if detail.contains("email") {
                DomainError::email_exists(&contact.email)
            } else {
                DomainError::database(detail)
            }
        }
        _ => DomainError::database(err.to_string()),
    }
}

fn map_db_err(err: DbErr) -> DomainError {
    DomainError::database(err.to_string())
}

#[async_trait]
impl<C> ContactsRepository for SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, DomainError> {
        let found = ContactEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(map_db_err)?;
        Ok(found.map(entity_to_contract))
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<Contact>, DomainError> {
        let found = ContactEntity::find()
            .filter(Column::PhoneNumber.eq(phone_number))
            .one(&self.conn)
            .await
            .map_err(map_db_err)?;
        Ok(found.map(entity_to_contract))
    }

    async fn list_all(&self) -> Result<Vec<Contact>, DomainError> {
        let rows = ContactEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(entity_to_contract).collect())
    }

    async fn phone_number_exists(
        &self,
        phone_number: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let mut query = ContactEntity::find().filter(Column::PhoneNumber.eq(phone_number));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        let count = query.count(&self.conn).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn email_exists(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DomainError> {
        let mut query = ContactEntity::find().filter(Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        let count = query.count(&self.conn).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, contact: Contact) -> Result<(), DomainError> {
        let m = ContactAM {
            id: Set(contact.id),
            name: Set(contact.name.clone()),
            phone_number: Set(contact.phone_number.clone()),
            email: Set(contact.email.clone()),
            created_at: Set(contact.created_at),
            updated_at: Set(contact.updated_at),
        };
        let _ = m
            .insert(&self.conn)
            .await
            .map_err(|e| map_write_err(&contact, e))?;
        Ok(())
    }

    async fn update(&self, contact: Contact) -> Result<(), DomainError> {
        let m = ContactAM {
            id: Set(contact.id),
            name: Set(contact.name.clone()),
            phone_number: Set(contact.phone_number.clone()),
            email: Set(contact.email.clone()),
            created_at: Set(contact.created_at),
            updated_at: Set(contact.updated_at),
        };
        let _ = m
            .update(&self.conn)
            .await
            .map_err(|e| map_write_err(&contact, e))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = ContactEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
