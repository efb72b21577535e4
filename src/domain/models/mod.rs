//! Domain models shared by all nodes.

pub mod credentials;
pub mod item;
pub mod node;
pub mod params;

pub use credentials::Credential;
pub use item::ExecutionOutput;
pub use node::{CredentialKind, NodeDescriptor, ResourceDescriptor};
pub use params::Pagination;
