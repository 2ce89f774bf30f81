//! HTTP client for the marketplace backend.
//!
//! JSON in, JSON out over reqwest. The bearer token is attached only on
//! endpoints that need it, mirroring the backend's public/protected
//! split. Non-success responses surface the server's `message` field
//! verbatim so callers can show exactly what the backend said.

pub(crate) mod appointments;
pub(crate) mod auth;
pub(crate) mod infohub;
mod lawyers;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::storage::Storage;

pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    storage: Arc<Storage>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, storage: Arc<Storage>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn bearer_token(&self) -> Option<String> {
        self.storage
            .load_session()
            .map(|s| s.token)
            .filter(|t| !t.is_empty())
    }

    /// Core request path. Returns the parsed response body; an empty 2xx
    /// body (204 on deletes) parses as `Value::Null`.
    async fn request_value(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        with_auth: bool,
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base, path);
        log::debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method, &url)
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if with_auth {
            if let Some(token) = self.bearer_token() {
                req = req.header("Authorization", format!("Bearer {}", token));
            }
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let json = parse_body(&text);
        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &json),
            });
        }
        Ok(json)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        with_auth: bool,
    ) -> Result<T, AppError> {
        let value = self
            .request_value(method, path, query, body, with_auth)
            .await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::Internal(format!("Unexpected response from server: {}", e)))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        with_auth: bool,
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, query, None, with_auth).await
    }

    pub(crate) async fn get_value(
        &self,
        path: &str,
        with_auth: bool,
    ) -> Result<Value, AppError> {
        self.request_value(Method::GET, path, &[], None, with_auth)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        with_auth: bool,
    ) -> Result<T, AppError> {
        self.request(Method::POST, path, &[], Some(body), with_auth)
            .await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, AppError> {
        self.request(Method::PATCH, path, &[], Some(body), true)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, AppError> {
        self.request(Method::PUT, path, &[], Some(body), true).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.request_value(Method::DELETE, path, &[], None, true)
            .await?;
        Ok(())
    }
}

/// Parse a response body the way a lenient browser client would: empty
/// means no payload, and a non-JSON body becomes `{"message": <text>}` so
/// plain-text errors still carry their content.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "message": text }))
}

/// Pick the user-facing message for a failed request: the server's
/// non-empty `message` field, else a generic line naming the status.
fn error_message(status: u16, json: &Value) -> String {
    json.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Request failed ({})", status))
}
