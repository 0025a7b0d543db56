//! HTTP plumbing for backend API calls.
//!
//! One thin wrapper around `reqwest` so every endpoint method in
//! [`crate::client`] shares the same base-URL joining, bearer-token header
//! and error-payload handling. Timeouts are configured once here and
//! delegated to the client; the checkout core adds no retry layer on top.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::types::ErrorBody;

/// Client configuration for connecting to the store backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.tienda.example").
    pub base_url: String,

    /// Bearer token for the authenticated session, when logged in.
    pub token: Option<String>,

    /// Request timeout in seconds. There is no core-level retry; this is
    /// the only timeout knob.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a configuration with the default 30s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            token: None,
            timeout_secs: 30,
        }
    }

    /// Sets the session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// HTTP client for making requests to the store backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let request = self.with_auth(self.client.get(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    /// Makes a GET request with query parameters (values are URL-encoded).
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        debug!(path, "GET");
        let request = self.with_auth(self.client.get(self.url(path)).query(query));
        Self::handle_response(request.send().await?).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        let request = self.with_auth(self.client.post(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// Makes a PUT request with a JSON body, discarding the response body.
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        debug!(path, "PUT");
        let request = self.with_auth(self.client.put(self.url(path)).json(body));
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    /// Makes a DELETE request, discarding the response body.
    pub async fn delete_unit(&self, path: &str) -> ApiResult<()> {
        debug!(path, "DELETE");
        let request = self.with_auth(self.client.delete(self.url(path)));
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    /// Rejects non-2xx responses, parsing the backend's error payload.
    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        // The backend sends {"code": ..., "message": ...} on errors; anything
        // else (proxies, crashes) ends up with both fields empty.
        let text = response.text().await?;
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

        Err(ApiError::Backend {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        })
    }

    /// Handles a response expected to carry a JSON body.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
