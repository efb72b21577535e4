//! Workflow node port.
//!
//! The host interacts with integration nodes exclusively through this
//! trait: hand over the input items and a parameter accessor, receive
//! a flat ordered list of normalized JSON items.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::NodeResult;
use crate::domain::models::NodeDescriptor;

use super::parameters::ParameterProvider;

/// Everything a node receives from the host for one execution pass.
#[derive(Clone)]
pub struct ExecutionContext {
    /// The incoming items. Each one drives a single request/response
    /// round-trip; zero items means nothing is executed.
    pub items: Vec<Value>,
    /// Per-field parameter accessor keyed by `(name, item index)`.
    pub params: Arc<dyn ParameterProvider>,
}

impl ExecutionContext {
    /// Create a context from input items and a parameter provider.
    pub fn new(items: Vec<Value>, params: Arc<dyn ParameterProvider>) -> Self {
        Self { items, params }
    }

    /// Create a context with a single empty input item, the shape a
    /// manual trigger produces.
    pub fn single(params: Arc<dyn ParameterProvider>) -> Self {
        Self::new(vec![Value::Object(serde_json::Map::new())], params)
    }
}

/// Port implemented by every integration node.
///
/// Execution is single-pass and cooperative: items are processed one
/// at a time in input order, and every HTTP call is awaited before the
/// next begins. Errors abort the pass and propagate to the host.
#[async_trait]
pub trait WorkflowNode: Send + Sync + std::fmt::Debug {
    /// The node's declared configuration surface.
    fn descriptor(&self) -> &NodeDescriptor;

    /// Execute the node over the context's input items, returning the
    /// flat ordered list of normalized output items.
    async fn execute(&self, ctx: &ExecutionContext) -> NodeResult<Vec<Value>>;
}
