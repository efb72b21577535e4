//! Wire-level request description shared by all nodes.
//!
//! A request builder lowers a typed (resource, operation) selection to
//! an [`ApiCall`]: method, interpolated path, sparse query string and
//! optional JSON body. Absent optional fields never appear here; the
//! builders only insert keys the caller actually configured.

use serde_json::Value;

/// HTTP verbs the nodes emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// The corresponding reqwest method.
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One HTTP call against an external API, relative to the client's
/// base URL.
#[derive(Debug, Clone)]
pub struct ApiCall {
    /// The HTTP verb.
    pub method: HttpMethod,
    /// Path with slugs/IDs already interpolated (e.g. `/api/0/issues/42/`).
    pub endpoint: String,
    /// Query parameters, in insertion order. Only configured keys are
    /// present; there are no null placeholders.
    pub query: Vec<(String, String)>,
    /// JSON body for create/update calls.
    pub body: Option<Value>,
}

impl ApiCall {
    /// A GET call for the given endpoint.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Get, endpoint)
    }

    /// A POST call for the given endpoint.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Post, endpoint)
    }

    /// A PUT call for the given endpoint.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Put, endpoint)
    }

    /// A DELETE call for the given endpoint.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::with_method(HttpMethod::Delete, endpoint)
    }

    fn with_method(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter only when a value is configured.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The fixed marker substituted for the real response body of delete
/// operations.
pub fn success_marker() -> Value {
    serde_json::json!({ "success": true })
}
