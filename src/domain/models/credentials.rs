//! Credential model.
//!
//! Tokens are resolved at the edge (CLI config or host credential
//! store) and handed to the node already materialized. Request
//! builders never see credentials; only the HTTP clients do.

use super::node::CredentialKind;

/// A resolved credential for an external API.
///
/// Both variants carry a token that is sent as a bearer Authorization
/// header. OAuth2 token refresh is the host's responsibility and out
/// of scope here.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Personal access token.
    AccessToken(String),
    /// OAuth2 access token, already exchanged/refreshed by the host.
    OAuth2(String),
}

impl Credential {
    /// The bearer token to put on the wire.
    pub fn token(&self) -> &str {
        match self {
            Self::AccessToken(token) | Self::OAuth2(token) => token,
        }
    }

    /// The kind of this credential.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::AccessToken(_) => CredentialKind::AccessToken,
            Self::OAuth2(_) => CredentialKind::OAuth2,
        }
    }
}
