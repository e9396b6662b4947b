//! medstock CLI - medication inventory API server and maintenance commands
//!
//! - `serve` runs the REST API over Supabase, Postgres, or an in-memory store
//! - `migrate` creates the inventory tables on a direct Postgres connection
//! - `total` prints the summed stock quantity

use anyhow::Result;
use clap::{Parser, Subcommand};

mod backend;
mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "medstock",
    author,
    version,
    about = "Medication inventory REST API over Supabase or Postgres"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the medication HTTP API
    Serve(commands::serve::ServeArgs),
    /// Create inventory tables in Postgres
    Migrate(commands::migrate::MigrateArgs),
    /// Print total stock quantity across all medications
    Total(commands::total::TotalArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real env vars still apply
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::Total(args) => commands::run_total(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
