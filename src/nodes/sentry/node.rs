//! Sentry workflow node.
//!
//! Reads the (resource, operation) selection once per execution, then
//! builds and executes one request per input item, in input order,
//! awaiting each HTTP call before the next begins.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::NodeResult;
use crate::domain::models::{CredentialKind, NodeDescriptor, ResourceDescriptor};
use crate::domain::ports::{ExecutionContext, Parameters, WorkflowNode};
use crate::nodes::request::success_marker;
use crate::runtime::OutputAssembler;

use super::client::SentryClient;
use super::request::{Plan, SentryRequest};

/// Integration node for the Sentry.io issue-tracking API.
#[derive(Debug)]
pub struct SentryNode {
    descriptor: NodeDescriptor,
    client: SentryClient,
}

impl SentryNode {
    /// Create the node around an already-configured client.
    pub fn new(client: SentryClient) -> Self {
        Self {
            descriptor: Self::build_descriptor(),
            client,
        }
    }

    fn build_descriptor() -> NodeDescriptor {
        NodeDescriptor::new("sentry", "Sentry.io", "Consume the Sentry.io API")
            .with_resource(ResourceDescriptor::new("event", &["get", "get_all"]))
            .with_resource(ResourceDescriptor::new(
                "issue",
                &["get", "get_all", "update", "delete"],
            ))
            .with_resource(ResourceDescriptor::new(
                "organization",
                &["get", "get_all", "create"],
            ))
            .with_resource(ResourceDescriptor::new("project", &["get", "get_all"]))
            .with_resource(ResourceDescriptor::new("release", &["get", "get_all"]))
            .with_resource(ResourceDescriptor::new(
                "team",
                &["get", "get_all", "create"],
            ))
            .with_credential(CredentialKind::AccessToken)
            .with_credential(CredentialKind::OAuth2)
    }
}

#[async_trait]
impl WorkflowNode for SentryNode {
    fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    async fn execute(&self, ctx: &ExecutionContext) -> NodeResult<Vec<Value>> {
        let params = Parameters::new(Arc::clone(&ctx.params));

        // The selection is fixed per execution: read once at item 0.
        let resource = params.string("resource", 0)?;
        let operation = params.string("operation", 0)?;

        tracing::info!(
            resource = %resource,
            operation = %operation,
            items = ctx.items.len(),
            "Executing Sentry node"
        );

        let mut output = OutputAssembler::new();

        for index in 0..ctx.items.len() {
            // Fresh request value per item; no state leaks across iterations.
            let request = SentryRequest::from_params(&resource, &operation, &params, index)?;

            let result = match request.plan() {
                Plan::Single {
                    call,
                    synthesize_success,
                } => {
                    let response = self.client.request(&call).await?;
                    if synthesize_success {
                        success_marker()
                    } else {
                        response
                    }
                }
                Plan::Paginated { call, truncate } => {
                    let mut page_items = self.client.request_all(&call).await?;
                    if let Some(limit) = truncate {
                        page_items.truncate(limit);
                    }
                    Value::Array(page_items)
                }
            };

            output.push(result);
        }

        tracing::info!(count = output.len(), "Sentry node execution complete");
        Ok(output.into_items())
    }
}
