//! Port traits decoupling nodes from the host platform.

pub mod node;
pub mod parameters;

pub use node::{ExecutionContext, WorkflowNode};
pub use parameters::{ParameterProvider, Parameters, StaticParameters};
