//! HTTP server command for the medication API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use medstock_server::http::{run_server, ServerConfig};

use crate::backend::BackendArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "MEDSTOCK_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting medstock server on {}", args.bind);

    let inventory = args.backend.connect().await?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(inventory, config)
        .await
        .context("Server error")?;

    Ok(())
}
