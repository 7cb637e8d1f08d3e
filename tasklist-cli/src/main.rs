//! tasklist CLI - server, database bootstrap and terminal frontend
//!
//! - `serve`: run the REST API (todos and contacts over PostgreSQL)
//! - `create-db`: create the target database if it does not exist
//! - `tui`: interactive terminal UI against a running API

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;
mod tui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    author,
    version,
    about = "Todo and contact manager backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the configured database if it does not exist
    CreateDb(commands::create_db::CreateDbArgs),
    /// Open the terminal UI against a running server
    Tui(commands::tui::TuiArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let tracing_config = match cli.command {
        Commands::Tui(_) => TracingConfig::for_tui(cli.debug),
        _ => TracingConfig {
            debug: cli.debug,
            ..TracingConfig::default()
        },
    };
    tracing_setup::init(&tracing_config).ok();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::CreateDb(args) => commands::create_db::run_create_db(args).await?,
        Commands::Tui(args) => commands::tui::run_tui(args).await?,
    }
    Ok(())
}
