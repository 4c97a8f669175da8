//! Show command - One cost record.

use anyhow::{Context, Result};
use clap::Args;

use costview_client::CostApi;

use super::CommandContext;
use crate::render;

#[derive(Args)]
pub struct ShowArgs {
    /// Cost record ID
    pub id: i64,
}

pub async fn execute(args: ShowArgs, ctx: &CommandContext) -> Result<()> {
    let record = ctx
        .client
        .get_cost(args.id)
        .await
        .with_context(|| format!("Failed to fetch cost record {}", args.id))?;

    if ctx.json {
        return ctx.print_json(&record);
    }

    print!("{}", render::render_record(&record));
    Ok(())
}
