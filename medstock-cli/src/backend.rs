//! Backend selection shared by every command that touches inventory data

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use medstock_server::db::{create_pool_with_options, MemoryRepo, PgRepo, DEFAULT_MAX_CONNECTIONS};
use medstock_server::supabase::{SupabaseConfig, SupabaseRepo};
use medstock_server::{Inventory, MedicationRepo};

/// Where medication rows live
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Hosted Supabase project via its REST API
    Supabase,
    /// Direct Postgres connection
    Postgres,
    /// In-process store, lost on exit
    Memory,
}

#[derive(Args, Debug)]
pub struct BackendArgs {
    /// Storage backend
    #[arg(long, value_enum, env = "MEDSTOCK_BACKEND", default_value = "supabase")]
    pub backend: Backend,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Supabase API key
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Table holding medication rows (Supabase backend)
    #[arg(long, default_value = medstock_server::supabase::client::DEFAULT_TABLE)]
    pub table: String,

    /// Postgres connection string (postgres backend)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Pool ceiling for the postgres backend
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl BackendArgs {
    /// Build the inventory over the selected backend.
    pub async fn connect(&self) -> Result<Inventory> {
        let repo: Arc<dyn MedicationRepo> = match self.backend {
            Backend::Supabase => {
                let url = self
                    .supabase_url
                    .clone()
                    .context("SUPABASE_URL not set. Set via --supabase-url, SUPABASE_URL env, or .env")?;
                let key = self
                    .supabase_key
                    .clone()
                    .context("SUPABASE_KEY not set. Set via --supabase-key, SUPABASE_KEY env, or .env")?;

                let mut config = SupabaseConfig::new(url, key);
                config.table = self.table.clone();
                tracing::info!(url = %config.url, table = %config.table, "Using Supabase backend");
                Arc::new(SupabaseRepo::new(&config).context("Failed to configure Supabase client")?)
            }
            Backend::Postgres => {
                let url = self
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;
                let pool = create_pool_with_options(url, self.max_connections)
                    .await
                    .context("Failed to create database pool")?;
                tracing::info!("Using Postgres backend");
                Arc::new(PgRepo::new(pool))
            }
            Backend::Memory => {
                tracing::warn!("Using in-memory backend - data is lost on exit");
                Arc::new(MemoryRepo::new())
            }
        };

        Ok(Inventory::new(repo))
    }
}
