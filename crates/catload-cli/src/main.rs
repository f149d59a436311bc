mod load;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::load::LoadArgs;

#[derive(Debug, Parser)]
#[command(name = "catload")]
#[command(about = "Load a product dump into a remote catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bootstrap the catalog schema and create every product in the dump
    Load(LoadArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG wins over CATLOAD_LOG_LEVEL.
    let log_level = std::env::var("CATLOAD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Load(args) => load::run_load(&args).await,
    }
}

#[cfg(test)]
mod tests;
