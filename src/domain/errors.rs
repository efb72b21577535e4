//! Domain errors for node execution.

use thiserror::Error;

/// Errors that can occur while resolving parameters, building
/// requests, or talking to an external API.
///
/// There is no retry or partial-failure isolation at this level: the
/// first error aborts the execution and propagates unmodified to the
/// caller, which decides how to surface it.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Unknown node: '{0}'. Available nodes: sentry, google_contacts")]
    UnknownNode(String),

    #[error("Node '{node}' has no resource '{resource}'")]
    UnknownResource { node: String, resource: String },

    #[error("Resource '{resource}' does not support operation '{operation}'")]
    UnknownOperation { resource: String, operation: String },

    #[error("Missing required parameter '{name}' for input item {index}")]
    MissingParameter { name: String, index: usize },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unrecognized date string: '{0}'")]
    InvalidDate(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),
}

pub type NodeResult<T> = Result<T, NodeError>;

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::ParseFailed(err.to_string())
    }
}
