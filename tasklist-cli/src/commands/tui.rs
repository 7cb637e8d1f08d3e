//! Terminal frontend command

use anyhow::Result;
use clap::Parser;

use crate::tui::{self, HttpApi, DEFAULT_API_URL};

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Base URL of the API, including the /api prefix
    #[arg(long, env = "TASKLIST_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Run the interactive terminal UI
pub async fn run_tui(args: TuiArgs) -> Result<()> {
    let api = HttpApi::new(args.api_url);
    tracing::debug!(api = api.base_url(), "Starting terminal UI");
    tui::run(&api).await
}
