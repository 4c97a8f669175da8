//! costview CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Cost record not found
//! - 4: Backend error (unreachable, bad status, bad payload)

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use costview_client::ClientError;

mod commands;
mod render;

use commands::{Cli, LoadFailed};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const NOT_FOUND: u8 = 3;
    pub const BACKEND_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match commands::run(cli).await {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "costview_cli={0},costview_client={0},costview_core={0},warn",
            level
        ))
    });

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.is::<LoadFailed>()) {
        return ExitCodes::BACKEND_ERROR;
    }

    match e
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())
    {
        Some(ClientError::NotFound { .. }) => ExitCodes::NOT_FOUND,
        Some(ClientError::InvalidUrl(_)) => ExitCodes::INVALID_ARGS,
        Some(ClientError::Transport(_))
        | Some(ClientError::Status { .. })
        | Some(ClientError::Decode { .. }) => ExitCodes::BACKEND_ERROR,
        None => ExitCodes::GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_client_errors() {
        let not_found = anyhow::Error::new(ClientError::NotFound { id: 3 });
        assert_eq!(categorize_error(&not_found), ExitCodes::NOT_FOUND);

        let status: anyhow::Result<()> = Err(ClientError::Status {
            status: 502,
            url: "http://localhost:8082/api/costs".into(),
            body: String::new(),
        })
        .context("Failed to list cost records");
        assert_eq!(
            categorize_error(&status.unwrap_err()),
            ExitCodes::BACKEND_ERROR
        );

        let bad_url = anyhow::Error::new(ClientError::InvalidUrl("nope".into()));
        assert_eq!(categorize_error(&bad_url), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_categorize_other_errors() {
        let load = anyhow::Error::new(LoadFailed("backend down".into()));
        assert_eq!(categorize_error(&load), ExitCodes::BACKEND_ERROR);

        let other = anyhow::anyhow!("Deletion cancelled");
        assert_eq!(categorize_error(&other), ExitCodes::GENERAL_ERROR);
    }
}
