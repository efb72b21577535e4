//! Implementation of the `nodus run` command.
//!
//! Loads a run configuration, resolves the credential, executes the
//! selected node once over the configured input items, and prints the
//! execution-result envelope.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::ExecutionOutput;
use crate::domain::ports::{ExecutionContext, StaticParameters};
use crate::infrastructure::config::ConfigLoader;
use crate::nodes::create_node;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the run configuration file (YAML)
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Debug, serde::Serialize)]
struct RunResult {
    node: String,
    #[serde(flatten)]
    output: ExecutionOutput,
}

impl CommandOutput for RunResult {
    fn to_human(&self) -> String {
        let items = serde_json::to_string_pretty(&self.output.items).unwrap_or_default();
        format!(
            "Node '{}' produced {} item(s):\n{}",
            self.node,
            self.output.len(),
            items
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Execute the command.
pub async fn execute(args: RunArgs, json: bool) -> Result<()> {
    let config = ConfigLoader::load_from_file(&args.config)?;
    let credential = config.resolve_credential()?;
    let node = create_node(&config.node, credential, config.base_url.clone())?;

    let mut provider = StaticParameters::new(config.parameters.clone());
    for (index, overrides) in config.item_parameters.iter().enumerate() {
        for (name, value) in overrides {
            provider = provider.with_override(index, name.clone(), value.clone());
        }
    }

    let ctx = if config.items.is_empty() {
        ExecutionContext::single(Arc::new(provider))
    } else {
        ExecutionContext::new(config.items.clone(), Arc::new(provider))
    };

    let items = node.execute(&ctx).await?;

    let result = RunResult {
        node: config.node,
        output: ExecutionOutput::new(items),
    };
    output(&result, json);
    Ok(())
}
