// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed client for the PowerDNS Authoritative HTTP API.
//!
//! One operation set per remote resource, split the way the server scopes
//! them: [`zones`], [`metadata`], [`cryptokeys`] (zone-scoped) and
//! [`tsigkeys`] (server-scoped). Every request carries the `X-API-Key`
//! header; every non-2xx response is surfaced as [`Error::Api`] with the
//! server's message attached verbatim. No retry is performed here —
//! callers re-run the whole invocation instead, which is safe because
//! every reconcile step is idempotent.

pub mod cryptokeys;
pub mod metadata;
pub mod tsigkeys;
pub mod types;
pub mod zones;

use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::errors::{Error, Result};

/// Header carrying the API authentication token.
const API_KEY_HEADER: &str = "X-API-Key";

/// Client handle for one PowerDNS server instance.
///
/// Cheap to clone; holds the shared `reqwest` connection pool, the API
/// endpoint, the server instance id, and the authentication key.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
    server_id: String,
    api_key: String,
}

impl ApiClient {
    /// Create a client for the server instance `server_id` behind `api_url`.
    ///
    /// `api_url` is the bare endpoint (e.g. `http://localhost:8081`); the
    /// `/api/v1` prefix is added here.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `api_url` is not a valid absolute URL.
    pub fn new(api_url: &str, api_key: &str, server_id: &str) -> Result<Self> {
        let base = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| Error::validation(format!("invalid API URL '{api_url}': {e}")))?;

        Ok(Self {
            http: HttpClient::new(),
            base,
            server_id: server_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// The server instance id this client is scoped to.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Build the full URL for a path under `/api/v1/servers/{server_id}`.
    fn server_url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/servers/{}{path}",
            self.base.as_str().trim_end_matches('/'),
            self.server_id
        )
    }

    /// Execute a request and map a non-2xx response to [`Error::Api`].
    ///
    /// `operation` names the logical API call (e.g. `createZone`) so that
    /// error messages identify what was being attempted, not just the URL.
    async fn dispatch<B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response> {
        debug!(operation, method = %method, url = %url, "PowerDNS API request");

        let mut request = self
            .http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = extract_error_message(response).await;
        error!(operation, status = status.as_u16(), message = %message, "PowerDNS API error");
        Err(Error::Api {
            operation,
            status: status.as_u16(),
            message,
        })
    }

    /// Dispatch and decode a JSON response body.
    async fn fetch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.dispatch(operation, method, url, query, body).await?;
        response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse {
                operation,
                detail: e.to_string(),
            })
    }

    /// Dispatch a call whose response body is irrelevant (204 or a
    /// result envelope we do not consume).
    async fn fetch_unit<B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<()> {
        self.dispatch(operation, method, url, &[], body).await?;
        Ok(())
    }
}

/// Pull the error message out of a failed response.
///
/// The server usually answers `{"error": "..."}`, but 404s can carry a
/// bare string body, so fall back to the raw text.
async fn extract_error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    if text.is_empty() {
        default_status_message(status)
    } else {
        text
    }
}

/// Fallback message when the server sent no body at all.
fn default_status_message(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "bad request".to_string(),
        StatusCode::NOT_FOUND => "not found".to_string(),
        StatusCode::CONFLICT => "conflict".to_string(),
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable entity".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => "internal server error".to_string(),
        other => format!("HTTP {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_joins_path() {
        let client = ApiClient::new("http://localhost:8081", "secret", "localhost").unwrap();
        assert_eq!(
            client.server_url("/zones"),
            "http://localhost:8081/api/v1/servers/localhost/zones"
        );
    }

    #[test]
    fn server_url_tolerates_trailing_slash() {
        let client = ApiClient::new("http://pdns.example:8081/", "secret", "localhost").unwrap();
        assert_eq!(
            client.server_url("/zones/example.org."),
            "http://pdns.example:8081/api/v1/servers/localhost/zones/example.org."
        );
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let err = ApiClient::new("not a url", "secret", "localhost").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
