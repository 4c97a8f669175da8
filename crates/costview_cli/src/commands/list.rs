//! List and range commands - Searchable, paginated record tables.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use costview_client::CostApi;
use costview_core::{CostRecord, TableView};

use super::{CommandContext, TableArgs};
use crate::render;

#[derive(Args)]
pub struct ListArgs {
    /// Only records of this cloud provider (fetched from the backend)
    #[arg(long, conflicts_with = "service")]
    pub provider: Option<String>,

    /// Only records of this service (fetched from the backend)
    #[arg(long)]
    pub service: Option<String>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Args)]
pub struct RangeArgs {
    /// Start of the usage window (ISO-8601, e.g. 2024-01-01T00:00:00)
    #[arg(long)]
    pub start: String,

    /// End of the usage window (ISO-8601)
    #[arg(long)]
    pub end: String,

    #[command(flatten)]
    pub table: TableArgs,
}

pub async fn execute(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let records = match (&args.provider, &args.service) {
        (Some(provider), _) => {
            info!("Listing cost records for provider {}", provider);
            ctx.client.list_costs_by_provider(provider).await
        }
        (None, Some(service)) => {
            info!("Listing cost records for service {}", service);
            ctx.client.list_costs_by_service(service).await
        }
        (None, None) => ctx.client.list_costs().await,
    }
    .context("Failed to fetch cost records")?;

    print_records(&records, &args.table, ctx)
}

pub async fn execute_range(args: RangeArgs, ctx: &CommandContext) -> Result<()> {
    info!("Listing cost records from {} to {}", args.start, args.end);
    let records = ctx
        .client
        .list_costs_by_date_range(&args.start, &args.end)
        .await
        .context("Failed to fetch cost records for date range")?;

    print_records(&records, &args.table, ctx)
}

fn print_records(records: &[CostRecord], table: &TableArgs, ctx: &CommandContext) -> Result<()> {
    let view = TableView::build(records, &table.to_state());

    if ctx.json {
        return ctx.print_json(&view);
    }

    print!("{}", render::render_table(&view));
    Ok(())
}
