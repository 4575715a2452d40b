//! Backend HTTP client.
//!
//! Wraps the tracker's REST API, attaching the session bearer token to every
//! request and classifying failures into [`DomainError`]s. No retries and no
//! client-side timeout: completion is driven by the HTTP client alone.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::CredentialProvider;

/// HTTP client for the tracker REST API.
#[derive(Clone)]
pub struct RestClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL, without trailing slash.
    base_url: String,
    /// Source of the session bearer token.
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a new client for `base_url`.
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/tasks/42`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authorized JSON request.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header("Content-Type", "application/json");
        match self.credentials.bearer_token() {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> DomainResult<T> {
        let resp = self.send(operation, request).await?;
        resp.json::<T>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "response body could not be decoded");
            DomainError::Serialization(format!("{operation}: {e}"))
        })
    }

    /// Send a request whose success body is ignored.
    pub async fn send_empty(&self, operation: &str, request: RequestBuilder) -> DomainResult<()> {
        self.send(operation, request).await.map(|_| ())
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> DomainResult<Response> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "request failed before a response");
            DomainError::Transport(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(operation, status = status.as_u16(), body = %body, "request returned an error status");
            return Err(DomainError::from_status(status.as_u16(), &body));
        }

        tracing::debug!(operation, status = status.as_u16(), "request succeeded");
        Ok(resp)
    }
}
