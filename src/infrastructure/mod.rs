//! Infrastructure layer: configuration and other host-facing plumbing.

pub mod config;
