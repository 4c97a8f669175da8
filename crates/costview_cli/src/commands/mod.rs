//! CLI command definitions.
//!
//! This module defines the command structure for the costview CLI.
//! Each subcommand maps to one view of the cost dashboard.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use costview_client::{ClientConfig, HttpCostClient, API_URL_ENV, DEFAULT_API_URL};
use costview_core::TableState;

pub mod dashboard;
pub mod delete;
pub mod list;
pub mod show;
pub mod summary;

/// costview - cloud cost visibility from the terminal
#[derive(Parser)]
#[command(name = "costview")]
#[command(version, about = "costview - cloud cost visibility from the terminal")]
#[command(long_about = r#"
costview reads cost records and a precomputed summary from the cost backend
and renders summary cards, provider/service breakdowns and a searchable,
paginated table of records.

COMMANDS:
  dashboard  → Summary cards, charts and the first page of records
  summary    → Total cost, record count, top provider and service
  charts     → Cost by provider and top services
  list       → Searchable, paginated records (optionally by provider/service)
  show       → One cost record
  range      → Records within a usage date range
  delete     → Delete a record, then reload

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Cost record not found
  4 - Backend error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the cost backend API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the full dashboard
    Dashboard(dashboard::DashboardArgs),

    /// Show the summary cards
    Summary,

    /// Show cost by provider and top services
    Charts,

    /// List cost records
    List(list::ListArgs),

    /// Show one cost record
    Show(show::ShowArgs),

    /// List cost records within a usage date range
    Range(list::RangeArgs),

    /// Delete a cost record
    Delete(delete::DeleteArgs),
}

/// Search and paging options shared by every table view.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Case-insensitive search across all record fields
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Records per page
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,
}

impl TableArgs {
    pub fn to_state(&self) -> TableState {
        TableState::default()
            .with_page_size(self.page_size as usize)
            .with_search(self.search.clone())
            .with_page(self.page.saturating_sub(1))
    }
}

/// Raised when the dashboard could not load its data.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct LoadFailed(pub String);

/// Settings every command runs with.
pub struct CommandContext {
    pub client: HttpCostClient,
    pub json: bool,
    pub quiet: bool,
}

impl CommandContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = ClientConfig::new(cli.api_url.clone());
        let client = HttpCostClient::new(&config).context("Invalid --api-url")?;
        Ok(Self {
            client,
            json: cli.json,
            quiet: cli.quiet,
        })
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::new(&cli)?;

    match cli.command {
        Commands::Dashboard(args) => dashboard::execute(args, &ctx).await,
        Commands::Summary => summary::execute_summary(&ctx).await,
        Commands::Charts => summary::execute_charts(&ctx).await,
        Commands::List(args) => list::execute(args, &ctx).await,
        Commands::Show(args) => show::execute(args, &ctx).await,
        Commands::Range(args) => list::execute_range(args, &ctx).await,
        Commands::Delete(args) => delete::execute(args, &ctx).await,
    }
}
