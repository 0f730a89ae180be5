//! HTTP gateway speaking the REST wire format.
//!
//! Server failure messages are surfaced verbatim so interactive frontends
//! can show them to the user unchanged.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use url::Url;
use uuid::Uuid;

use crate::api::rest::dto::{CallResponse, ContactDto, ContactUpsertReq, DataEnvelope};
use crate::api::rest::error::ErrorBody;
use crate::contract::{
    client::ContactsApi,
    model::{CallOutcome, Contact, ContactInput},
};

pub struct ContactsHttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ContactsHttpClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid contacts API base URL"))?
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-success response into the server's own error message.
async fn response_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => anyhow!(body.message),
        Err(_) => anyhow!("HTTP {status}"),
    }
}

fn upsert_body(input: ContactInput) -> ContactUpsertReq {
    ContactUpsertReq {
        name: input.name,
        phone_number: input.phone_number,
        email: input.email,
    }
}

#[async_trait]
impl ContactsApi for ContactsHttpClient {
    async fn list_contacts(&self) -> anyhow::Result<Vec<Contact>> {
        let response = self
            .http
            .get(self.endpoint(&["contacts"])?)
            .send()
            .await
            .context("GET /contacts")?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let envelope: DataEnvelope<Vec<ContactDto>> = response.json().await?;
        Ok(envelope.data.into_iter().map(Contact::from).collect())
    }

    async fn get_contact(&self, id: Uuid) -> anyhow::Result<Contact> {
        let response = self
            .http
            .get(self.endpoint(&["contacts", &id.to_string()])?)
            .send()
            .await
            .with_context(|| format!("GET /contacts/{id}"))?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let envelope: DataEnvelope<ContactDto> = response.json().await?;
        Ok(envelope.data.into())
    }

    async fn create_contact(&self, input: ContactInput) -> anyhow::Result<Contact> {
        let response = self
            .http
            .post(self.endpoint(&["contacts"])?)
            .json(&upsert_body(input))
            .send()
            .await
            .context("POST /contacts")?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let envelope: DataEnvelope<ContactDto> = response.json().await?;
        Ok(envelope.data.into())
    }

    async fn update_contact(&self, id: Uuid, input: ContactInput) -> anyhow::Result<Contact> {
        let response = self
            .http
            .put(self.endpoint(&["contacts", &id.to_string()])?)
            .json(&upsert_body(input))
            .send()
            .await
            .with_context(|| format!("PUT /contacts/{id}"))?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let envelope: DataEnvelope<ContactDto> = response.json().await?;
        Ok(envelope.data.into())
    }

    async fn delete_contact(&self, id: Uuid) -> anyhow::Result<()> {
        let response = self
            .http
            .delete(self.endpoint(&["contacts", &id.to_string()])?)
            .send()
            .await
            .with_context(|| format!("DELETE /contacts/{id}"))?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        Ok(())
    }

    async fn simulate_call(&self, id: Uuid) -> anyhow::Result<CallOutcome> {
        let response = self
            .http
            .post(self.endpoint(&["contacts", &id.to_string(), "call"])?)
            .send()
            .await
            .with_context(|| format!("POST /contacts/{id}/call"))?;
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let body: CallResponse = response.json().await?;
        Ok(CallOutcome::from_status(&body.status))
    }
}
