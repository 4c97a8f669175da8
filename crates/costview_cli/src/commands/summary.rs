//! Summary and charts commands - Views derived from the cost summary alone.

use anyhow::{Context, Result};

use costview_client::CostApi;
use costview_core::{ChartView, SummaryCards};

use super::CommandContext;
use crate::render;

pub async fn execute_summary(ctx: &CommandContext) -> Result<()> {
    let summary = ctx
        .client
        .get_summary()
        .await
        .context("Failed to fetch cost summary")?;
    let cards = SummaryCards::build(&summary);

    if ctx.json {
        return ctx.print_json(&cards);
    }

    print!("{}", render::render_cards(&cards));
    Ok(())
}

pub async fn execute_charts(ctx: &CommandContext) -> Result<()> {
    let summary = ctx
        .client
        .get_summary()
        .await
        .context("Failed to fetch cost summary")?;
    let charts = ChartView::build(&summary);

    if ctx.json {
        return ctx.print_json(&charts);
    }

    print!("{}", render::render_charts(&charts));
    Ok(())
}
