//! Nodus - workflow integration nodes for external REST APIs.
//!
//! A node wraps one third-party API behind a uniform execute surface:
//! it reads keyed parameters per input item, builds the matching API
//! call, performs it (single request or full pagination), and splices
//! the normalized results into a flat output sequence.
//!
//! # Architecture
//!
//! - `domain`: core types, ports, and errors (no I/O)
//! - `runtime`: output assembly shared by every node
//! - `nodes`: node implementations (Sentry, Google Contacts) and the
//!   registry that constructs them by name
//! - `infrastructure`: run-configuration loading
//! - `cli`: command-line surface

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod nodes;
pub mod runtime;

pub use domain::{NodeError, NodeResult};
pub use nodes::create_node;
