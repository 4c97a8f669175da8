//! Dashboard command - Summary cards, charts and the records table.

use anyhow::Result;
use clap::Args;
use tracing::info;

use costview_client::Dashboard;

use super::{CommandContext, LoadFailed, TableArgs};
use crate::render;

#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

pub async fn execute(args: DashboardArgs, ctx: &CommandContext) -> Result<()> {
    info!("Loading dashboard from {}", ctx.client.base_url());

    let mut dashboard = Dashboard::new(ctx.client.clone()).with_table(args.table.to_state());
    dashboard.refresh().await;

    let Some(view) = dashboard.view() else {
        let message = dashboard
            .state()
            .error_message()
            .unwrap_or("Cost data did not load")
            .to_string();
        return Err(LoadFailed(message).into());
    };

    if ctx.json {
        return ctx.print_json(&view);
    }

    println!("{}", render::render_cards(&view.cards));
    if view.is_empty {
        println!("No cost data available. Please add some cost records.");
        return Ok(());
    }

    println!("{}", render::render_charts(&view.charts));
    print!("{}", render::render_table(&view.table));

    Ok(())
}
