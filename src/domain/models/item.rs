//! Execution result envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The flat, ordered sequence of normalized items a node execution
/// produces, wrapped in the envelope hosts expect.
///
/// Items are raw external-API JSON objects, passed through unmodified
/// except for the synthetic `{success: true}` markers on delete
/// operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionOutput {
    /// Normalized output items, in arrival order.
    pub items: Vec<Value>,
}

impl ExecutionOutput {
    /// Wrap a list of items in the result envelope.
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    /// Number of output items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the execution produced no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
