use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use nodus::cli::{commands, handle_error, Cli, Commands};

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays parseable with --json.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, json).await,
        Commands::Describe(args) => commands::describe::execute(args, json).await,
    };

    if let Err(err) = result {
        handle_error(err, json);
    }
}
