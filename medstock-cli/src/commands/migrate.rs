//! Create the inventory tables on a direct Postgres connection

use anyhow::{Context, Result};
use clap::Parser;

use medstock_server::db::{create_pool, migrations};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Migration failed")?;

    println!("Migrations applied successfully");
    Ok(())
}
