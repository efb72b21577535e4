//! Implementation of the `nodus describe` command.

use anyhow::Result;
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Credential, NodeDescriptor};
use crate::nodes::create_node;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Node name ("sentry" or "google_contacts")
    pub name: String,
}

struct DescribeResult {
    descriptor: NodeDescriptor,
}

impl CommandOutput for DescribeResult {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("{} ({})", self.descriptor.display_name, self.descriptor.name),
            self.descriptor.description.clone(),
            String::new(),
        ];
        for resource in &self.descriptor.resources {
            lines.push(format!(
                "  {:<16} {}",
                resource.name,
                resource.operations.join(", ")
            ));
        }
        lines.push(String::new());
        lines.push(format!(
            "Credentials: {}",
            self.descriptor
                .credentials
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.descriptor).unwrap_or_default()
    }
}

/// Execute the command.
///
/// Descriptors are static, so the node is instantiated with a
/// placeholder credential; no request is made.
pub async fn execute(args: DescribeArgs, json: bool) -> Result<()> {
    let node = create_node(&args.name, Credential::AccessToken(String::new()), None)?;
    let result = DescribeResult {
        descriptor: node.descriptor().clone(),
    };
    output(&result, json);
    Ok(())
}
