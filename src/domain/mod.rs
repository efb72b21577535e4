//! Domain layer for the Nodus integration nodes.
//!
//! This module contains the core models and port traits that the
//! concrete nodes implement. It has no knowledge of any specific
//! external API.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{NodeError, NodeResult};
