//! medstock-server: medication inventory over HTTP
//!
//! A small CRUD API for the `medications` table. Storage is pluggable
//! behind [`db::MedicationRepo`]: a hosted Supabase project (PostgREST),
//! a direct Postgres pool, or an in-memory store.

pub mod db;
pub mod http;
pub mod inventory;
pub mod models;
pub mod supabase;

pub use db::{MedicationRepo, RepoError};
pub use http::{build_router, run_server, ServerConfig};
pub use inventory::Inventory;
