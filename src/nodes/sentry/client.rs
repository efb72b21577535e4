//! Sentry HTTP client.
//!
//! Thin bearer-authenticated wrapper over the Sentry.io REST API v0.
//! Multi-page retrieval follows the `Link` response header cursor
//! convention: repeat the call with the `cursor` query parameter from
//! the `rel="next"` entry while its `results` attribute is `"true"`.
//!
//! Failures map to [`NodeError`] and propagate unmodified; there is no
//! retry logic and no timeout policy beyond reqwest's defaults.

use reqwest::Client;
use serde_json::Value;

use crate::domain::errors::{NodeError, NodeResult};
use crate::nodes::request::ApiCall;

/// Default base URL of the Sentry.io API.
pub const SENTRY_BASE_URL: &str = "https://sentry.io";

/// Configuration for a [`SentryClient`].
#[derive(Debug, Clone)]
pub struct SentryClientConfig {
    /// Bearer token (access token or OAuth2 access token).
    pub token: String,
    /// Base URL; overridable for tests.
    pub base_url: String,
}

impl SentryClientConfig {
    /// Configuration against the production API.
    pub fn new(token: String) -> Self {
        Self {
            token,
            base_url: SENTRY_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP client for the Sentry.io REST API v0.
#[derive(Debug, Clone)]
pub struct SentryClient {
    /// The underlying HTTP client.
    http: Client,
    /// Bearer token sent on every request.
    token: String,
    /// Base URL all endpoints are resolved against.
    base_url: String,
}

impl SentryClient {
    /// Create a new client.
    pub fn new(config: SentryClientConfig) -> Self {
        Self {
            http: Client::new(),
            token: config.token,
            base_url: config.base_url,
        }
    }

    /// Execute a single call and parse the JSON response body.
    ///
    /// An empty response body (e.g. 204 on delete) yields `Value::Null`.
    pub async fn request(&self, call: &ApiCall) -> NodeResult<Value> {
        let response = self.send(call, None).await?;
        let body = response
            .text()
            .await
            .map_err(|e| NodeError::RequestFailed(format!("Sentry response read failed: {e}")))?;
        parse_body(&body)
    }

    /// Execute a call repeatedly, following the `Link` header cursor,
    /// and return the flattened item sequence in arrival order.
    ///
    /// A `null` page normalizes to an empty sequence, not an error.
    pub async fn request_all(&self, call: &ApiCall) -> NodeResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self.send(call, cursor.as_deref()).await?;
            let link = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            let body = response.text().await.map_err(|e| {
                NodeError::RequestFailed(format!("Sentry response read failed: {e}"))
            })?;

            match parse_body(&body)? {
                Value::Array(page) => {
                    tracing::debug!(page_len = page.len(), "Fetched Sentry page");
                    items.extend(page);
                }
                Value::Null => break,
                other => {
                    return Err(NodeError::ParseFailed(format!(
                        "expected a JSON array page from {}, got {other}",
                        call.endpoint
                    )));
                }
            }

            cursor = link.as_deref().and_then(next_cursor);
            if cursor.is_none() {
                break;
            }
        }

        Ok(items)
    }

    async fn send(
        &self,
        call: &ApiCall,
        cursor: Option<&str>,
    ) -> NodeResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, call.endpoint);

        let mut request = self
            .http
            .request(call.method.as_reqwest(), &url)
            .bearer_auth(&self.token)
            .query(&call.query);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NodeError::RequestFailed(format!("Sentry request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NodeError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn parse_body(body: &str) -> NodeResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| NodeError::ParseFailed(format!("Sentry response: {e}")))
}

/// Extract the cursor of the `rel="next"` entry whose `results`
/// attribute is `"true"`, if any.
///
/// Sentry link headers look like:
/// `<url>; rel="previous"; results="false"; cursor="0:0:1",
///  <url>; rel="next"; results="true"; cursor="0:100:0"`
fn next_cursor(link: &str) -> Option<String> {
    for entry in link.split(',') {
        let mut rel = None;
        let mut results = None;
        let mut cursor = None;
        for part in entry.split(';') {
            let part = part.trim();
            if let Some(v) = part.strip_prefix("rel=") {
                rel = Some(trim_quotes(v));
            } else if let Some(v) = part.strip_prefix("results=") {
                results = Some(trim_quotes(v));
            } else if let Some(v) = part.strip_prefix("cursor=") {
                cursor = Some(trim_quotes(v));
            }
        }
        if rel == Some("next") && results == Some("true") {
            return cursor.map(ToString::to_string);
        }
    }
    None
}

fn trim_quotes(value: &str) -> &str {
    value.trim_matches('"')
}
