//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use readable_core::config::Config;

use crate::server::ReadableServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Reading speed in words per minute (overrides configuration).
    #[arg(long, value_name = "WPM")]
    pub speed: Option<i64>,
}

/// Serve MCP requests over stdin/stdout until the client disconnects.
///
/// Logging stays on stderr; stdout belongs to the protocol.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let reading_speed = args.speed.or(config.average_reading_speed);
    info!(?reading_speed, ?max_input_bytes, "starting MCP server on stdio");

    let service = ReadableServer::new(reading_speed, max_input_bytes)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
