//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nodus")]
#[command(about = "Nodus - workflow integration nodes for external REST APIs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a node described by a run configuration file
    Run(commands::run::RunArgs),

    /// Print a node's descriptor (resources, operations, credentials)
    Describe(commands::describe::DescribeArgs),
}

/// Report a fatal error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": err.to_string() }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
