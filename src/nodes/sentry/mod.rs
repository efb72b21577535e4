//! Sentry.io integration node.

pub mod client;
pub mod node;
pub mod request;

pub use client::{SentryClient, SentryClientConfig, SENTRY_BASE_URL};
pub use node::SentryNode;
