use arcrest_services::cli::{
    Chunks, ListFields, ListItems, list_fields, list_items, plan_chunks,
};
use arcrest_services::client::RestClient;
use arcrest_services::config::{self, get_config_element};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, prelude::*};

/// CLI for inspecting ArcGIS REST services
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lists the fields of a layer or table
    Fields(ListFields),

    /// Lists the layers and tables of a service
    Items(ListItems),

    /// Splits a row count into request batches
    Chunks(Chunks),
}

impl Commands {
    async fn execute(self) -> Result<String, anyhow::Error> {
        match self {
            Commands::Fields(params) => list_fields(&RestClient::from_config()?, params).await,
            Commands::Items(params) => list_items(&RestClient::from_config()?, params).await,
            Commands::Chunks(params) => plan_chunks(&params),
        }
    }
}

/// Logs to `STDERR`, so that `STDOUT` only carries the command output.
fn init_logging() -> Result<(), anyhow::Error> {
    let logging_config: config::Logging = get_config_element()?;

    let console_filter = EnvFilter::try_new(&logging_config.log_spec)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();

    Ok(())
}

#[tokio::main]
#[allow(clippy::print_stderr, clippy::print_stdout)]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    match cli.command.execute().await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
