//! Node descriptor models.
//!
//! A descriptor declares a node's user-configurable surface: which
//! resources it exposes, which operations each resource supports, and
//! what kind of credential it needs. Hosts use descriptors to render
//! configuration UIs and to validate a selection before execution.

use serde::{Deserialize, Serialize};

/// The kind of credential a node authenticates with.
///
/// Both kinds end up as a bearer token on the wire; the distinction
/// matters to the host's credential store, not to the request builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// A long-lived personal access token.
    AccessToken,
    /// An OAuth2 access token resolved by the host's token store.
    OAuth2,
}

impl CredentialKind {
    /// Returns the string representation of this credential kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::OAuth2 => "oauth2",
        }
    }
}

/// One API entity category a node can target, with its operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// The resource tag used in the `resource` parameter (e.g. "issue").
    pub name: String,
    /// Operation tags supported by this resource (e.g. "get", "get_all").
    pub operations: Vec<String>,
}

impl ResourceDescriptor {
    /// Create a resource descriptor from a name and operation tags.
    pub fn new(name: impl Into<String>, operations: &[&str]) -> Self {
        Self {
            name: name.into(),
            operations: operations.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether this resource supports the given operation tag.
    pub fn supports(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }
}

/// Declarative description of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Machine name used to select the node (e.g. "sentry").
    pub name: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Short description of what the node consumes.
    pub description: String,
    /// Resources the node exposes.
    pub resources: Vec<ResourceDescriptor>,
    /// Credential kinds the node accepts.
    pub credentials: Vec<CredentialKind>,
}

impl NodeDescriptor {
    /// Create a descriptor with no resources; chain [`with_resource`]
    /// and [`with_credential`] to fill it in.
    ///
    /// [`with_resource`]: NodeDescriptor::with_resource
    /// [`with_credential`]: NodeDescriptor::with_credential
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
            resources: Vec::new(),
            credentials: Vec::new(),
        }
    }

    /// Add a resource to the descriptor.
    pub fn with_resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add an accepted credential kind.
    pub fn with_credential(mut self, kind: CredentialKind) -> Self {
        self.credentials.push(kind);
        self
    }

    /// Look up a resource by its tag.
    pub fn resource(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> NodeDescriptor {
        NodeDescriptor::new("sentry", "Sentry.io", "Consume the Sentry.io API")
            .with_resource(ResourceDescriptor::new("issue", &["get", "get_all", "delete"]))
            .with_resource(ResourceDescriptor::new("team", &["get", "create"]))
            .with_credential(CredentialKind::AccessToken)
            .with_credential(CredentialKind::OAuth2)
    }

    #[test]
    fn test_resource_lookup() {
        let desc = descriptor();
        assert!(desc.resource("issue").is_some());
        assert!(desc.resource("event").is_none());
    }

    #[test]
    fn test_operation_support() {
        let desc = descriptor();
        let issue = desc.resource("issue").unwrap();
        assert!(issue.supports("delete"));
        assert!(!issue.supports("update"));
    }

    #[test]
    fn test_credential_kind_as_str() {
        assert_eq!(CredentialKind::AccessToken.as_str(), "access_token");
        assert_eq!(CredentialKind::OAuth2.as_str(), "oauth2");
    }
}
