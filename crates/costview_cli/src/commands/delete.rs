//! Delete command - Delete a cost record, then reload the data.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use costview_client::Dashboard;

use super::{CommandContext, LoadFailed};

#[derive(Args)]
pub struct DeleteArgs {
    /// Cost record ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(args: DeleteArgs, ctx: &CommandContext) -> Result<()> {
    if !args.yes && !confirm(args.id)? {
        anyhow::bail!("Deletion cancelled");
    }

    let mut dashboard = Dashboard::new(ctx.client.clone());
    dashboard
        .delete(args.id)
        .await
        .with_context(|| format!("Failed to delete cost record {}", args.id))?;

    let Some(snapshot) = dashboard.state().snapshot() else {
        let message = dashboard
            .state()
            .error_message()
            .unwrap_or("Cost data did not reload")
            .to_string();
        return Err(LoadFailed(message).into());
    };

    if ctx.json {
        return ctx.print_json(&snapshot.records);
    }

    if !ctx.quiet {
        println!(
            "✅ Deleted cost record {} ({} records remain)",
            args.id,
            snapshot.records.len()
        );
    }
    Ok(())
}

fn confirm(id: i64) -> Result<bool> {
    print!("Are you sure you want to delete cost record {}? [y/N] ", id);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
