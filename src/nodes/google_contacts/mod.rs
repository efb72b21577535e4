//! Google Contacts integration node.

pub mod client;
pub mod models;
pub mod node;
pub mod request;

pub use client::{GoogleContactsClient, GoogleContactsClientConfig, PEOPLE_BASE_URL};
pub use node::GoogleContactsNode;
