use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CallResponse, ContactDto, ContactUpsertReq, DataEnvelope};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::domain::service::Service;

/// Resolve a path id before any handler logic runs.
///
/// An unparseable id behaves exactly like an unknown one: 404.
fn parse_contact_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(format!("Contact not found: {raw}")))
}

/// List all contacts
pub async fn list_contacts(
    Extension(svc): Extension<std::sync::Arc<Service>>,
) -> Result<Json<DataEnvelope<Vec<ContactDto>>>, ApiError> {
    info!("Listing contacts");

    match svc.list_contacts().await {
        Ok(contacts) => {
            let data: Vec<ContactDto> = contacts.into_iter().map(ContactDto::from).collect();
            Ok(Json(DataEnvelope { data }))
        }
        Err(e) => {
            error!("Failed to list contacts: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Get a specific contact by ID
pub async fn get_contact(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<DataEnvelope<ContactDto>>, ApiError> {
    let id = parse_contact_id(&id)?;
    info!("Getting contact with id: {}", id);

    match svc.get_contact(id).await {
        Ok(contact) => Ok(Json(DataEnvelope {
            data: ContactDto::from(contact),
        })),
        Err(e) => {
            error!("Failed to get contact {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a new contact
pub async fn create_contact(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Json(req): Json<ContactUpsertReq>,
) -> Result<(StatusCode, Json<DataEnvelope<ContactDto>>), ApiError> {
    info!("Creating contact: {:?}", req);

    match svc.create_contact(req.into()).await {
        Ok(contact) => Ok((
            StatusCode::CREATED,
            Json(DataEnvelope {
                data: ContactDto::from(contact),
            }),
        )),
        Err(e) => {
            error!("Failed to create contact: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Replace an existing contact's editable fields
pub async fn update_contact(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<String>,
    Json(req): Json<ContactUpsertReq>,
) -> Result<Json<DataEnvelope<ContactDto>>, ApiError> {
    let id = parse_contact_id(&id)?;
    info!("Updating contact {} with: {:?}", id, req);

    match svc.update_contact(id, req.into()).await {
        Ok(contact) => Ok(Json(DataEnvelope {
            data: ContactDto::from(contact),
        })),
        Err(e) => {
            error!("Failed to update contact {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Delete a contact by ID
pub async fn delete_contact(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_contact_id(&id)?;
    info!("Deleting contact: {}", id);

    match svc.delete_contact(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete contact {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Simulate a call to a contact
pub async fn call_contact(
    Extension(svc): Extension<std::sync::Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<CallResponse>, ApiError> {
    let id = parse_contact_id(&id)?;
    info!("Simulating call to contact: {}", id);

    match svc.simulate_call(id).await {
        Ok(outcome) => Ok(Json(CallResponse {
            message: "Call simulated".to_string(),
            status: outcome.as_str().to_string(),
        })),
        Err(e) => {
            error!("Failed to simulate call to contact {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}
