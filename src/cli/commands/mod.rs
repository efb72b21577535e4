//! CLI command implementations.

pub mod describe;
pub mod run;
