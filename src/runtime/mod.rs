//! Execution runtime shared by all nodes.

pub mod output;

pub use output::OutputAssembler;
