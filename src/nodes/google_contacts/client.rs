//! Google People API HTTP client.
//!
//! OAuth2-bearer wrapper over the People API v1. Multi-page retrieval
//! follows the `pageToken`/`nextPageToken` convention with a page size
//! of 100, flattening the named item array of each page.

use reqwest::Client;
use serde_json::Value;

use crate::domain::errors::{NodeError, NodeResult};
use crate::nodes::request::ApiCall;

/// Default base URL of the People API.
pub const PEOPLE_BASE_URL: &str = "https://people.googleapis.com/v1";

/// Page size used when auto-paginating.
const PAGE_SIZE: usize = 100;

/// Configuration for a [`GoogleContactsClient`].
#[derive(Debug, Clone)]
pub struct GoogleContactsClientConfig {
    /// OAuth2 access token, already refreshed by the host.
    pub access_token: String,
    /// Base URL; overridable for tests.
    pub base_url: String,
}

impl GoogleContactsClientConfig {
    /// Configuration against the production API.
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            base_url: PEOPLE_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP client for the Google People API v1.
#[derive(Debug, Clone)]
pub struct GoogleContactsClient {
    http: Client,
    access_token: String,
    base_url: String,
}

impl GoogleContactsClient {
    /// Create a new client.
    pub fn new(config: GoogleContactsClientConfig) -> Self {
        Self {
            http: Client::new(),
            access_token: config.access_token,
            base_url: config.base_url,
        }
    }

    /// Execute a single call and parse the JSON response body.
    ///
    /// An empty response body yields `Value::Null`.
    pub async fn request(&self, call: &ApiCall) -> NodeResult<Value> {
        self.send(call, &[]).await
    }

    /// Execute a call repeatedly, following `nextPageToken`, and
    /// return the flattened contents of `property` across all pages.
    ///
    /// A page without the property ends pagination; a first page
    /// without it yields an empty sequence, not an error.
    pub async fn request_all(&self, property: &str, call: &ApiCall) -> NodeResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut extra: Vec<(String, String)> =
                vec![("pageSize".to_string(), PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                extra.push(("pageToken".to_string(), token.clone()));
            }

            let page = self.send(call, &extra).await?;

            match page.get(property) {
                Some(Value::Array(values)) => {
                    tracing::debug!(property, page_len = values.len(), "Fetched People API page");
                    items.extend(values.iter().cloned());
                }
                _ => break,
            }

            page_token = page
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string);
            if page_token.is_none() {
                break;
            }
        }

        Ok(items)
    }

    async fn send(&self, call: &ApiCall, extra_query: &[(String, String)]) -> NodeResult<Value> {
        let url = format!("{}{}", self.base_url, call.endpoint);

        let mut request = self
            .http
            .request(call.method.as_reqwest(), &url)
            .bearer_auth(&self.access_token)
            .query(&call.query);
        if !extra_query.is_empty() {
            request = request.query(extra_query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NodeError::RequestFailed(format!("People API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NodeError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            NodeError::RequestFailed(format!("People API response read failed: {e}"))
        })?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| NodeError::ParseFailed(format!("People API response: {e}")))
    }
}
