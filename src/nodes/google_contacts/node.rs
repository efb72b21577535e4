//! Google Contacts workflow node.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::NodeResult;
use crate::domain::models::{CredentialKind, NodeDescriptor, ResourceDescriptor};
use crate::domain::ports::{ExecutionContext, Parameters, WorkflowNode};
use crate::nodes::request::{success_marker, ApiCall};
use crate::runtime::OutputAssembler;

use super::client::GoogleContactsClient;
use super::models::GroupOption;
use super::request::{ContactRequest, Plan};

/// Integration node for the Google People API.
#[derive(Debug)]
pub struct GoogleContactsNode {
    descriptor: NodeDescriptor,
    client: GoogleContactsClient,
}

impl GoogleContactsNode {
    /// Create the node around an already-configured client.
    pub fn new(client: GoogleContactsClient) -> Self {
        Self {
            descriptor: Self::build_descriptor(),
            client,
        }
    }

    fn build_descriptor() -> NodeDescriptor {
        NodeDescriptor::new(
            "google_contacts",
            "Google Contacts",
            "Consume the Google Contacts API",
        )
        .with_resource(ResourceDescriptor::new(
            "contact",
            &["create", "delete", "get", "get_all"],
        ))
        .with_credential(CredentialKind::OAuth2)
    }

    /// List the user's contact groups as selectable options, for hosts
    /// that present a group picker.
    pub async fn group_options(&self) -> NodeResult<Vec<GroupOption>> {
        let groups = self
            .client
            .request_all("contactGroups", &ApiCall::get("/contactGroups"))
            .await?;
        Ok(groups
            .iter()
            .map(|group| GroupOption {
                name: group
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                value: group
                    .get("resourceName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl WorkflowNode for GoogleContactsNode {
    fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    async fn execute(&self, ctx: &ExecutionContext) -> NodeResult<Vec<Value>> {
        let params = Parameters::new(Arc::clone(&ctx.params));

        let resource = params.string("resource", 0)?;
        let operation = params.string("operation", 0)?;

        tracing::info!(
            resource = %resource,
            operation = %operation,
            items = ctx.items.len(),
            "Executing Google Contacts node"
        );

        let mut output = OutputAssembler::new();

        for index in 0..ctx.items.len() {
            let request = ContactRequest::from_params(&resource, &operation, &params, index)?;

            let result = match request.plan()? {
                Plan::Single {
                    call,
                    synthesize_success,
                    unwrap,
                } => {
                    let response = self.client.request(&call).await?;
                    if synthesize_success {
                        success_marker()
                    } else if let Some(property) = unwrap {
                        // A response without the property contributes
                        // nothing to the output.
                        response.get(property).cloned().unwrap_or(Value::Null)
                    } else {
                        response
                    }
                }
                Plan::Paginated { call, property } => {
                    Value::Array(self.client.request_all(property, &call).await?)
                }
            };

            output.push(result);
        }

        tracing::info!(count = output.len(), "Google Contacts node execution complete");
        Ok(output.into_items())
    }
}
