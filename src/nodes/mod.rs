//! Integration nodes.
//!
//! Each sub-module corresponds to an external API (Sentry.io, Google
//! Contacts) and provides a request builder, an HTTP client, and a
//! [`WorkflowNode`] implementation wired together here.

pub mod google_contacts;
pub mod request;
pub mod sentry;

use std::sync::Arc;

use crate::domain::errors::{NodeError, NodeResult};
use crate::domain::models::Credential;
use crate::domain::ports::WorkflowNode;

use self::google_contacts::{GoogleContactsClient, GoogleContactsClientConfig, GoogleContactsNode};
use self::sentry::{SentryClient, SentryClientConfig, SentryNode};

/// Instantiate a node by name.
///
/// `base_url` overrides the API's production base URL, which tests and
/// self-hosted deployments use.
///
/// # Errors
///
/// Returns [`NodeError::UnknownNode`] for names this registry does not
/// know.
pub fn create_node(
    name: &str,
    credential: Credential,
    base_url: Option<String>,
) -> NodeResult<Arc<dyn WorkflowNode>> {
    match name {
        "sentry" => {
            let mut config = SentryClientConfig::new(credential.token().to_string());
            if let Some(url) = base_url {
                config = config.with_base_url(url);
            }
            Ok(Arc::new(SentryNode::new(SentryClient::new(config))))
        }
        "google_contacts" => {
            let mut config = GoogleContactsClientConfig::new(credential.token().to_string());
            if let Some(url) = base_url {
                config = config.with_base_url(url);
            }
            Ok(Arc::new(GoogleContactsNode::new(GoogleContactsClient::new(
                config,
            ))))
        }
        unknown => Err(NodeError::UnknownNode(unknown.to_string())),
    }
}
