//! Supabase backend - medications through the hosted PostgREST API

pub mod client;
pub mod repo;

pub use client::{ConfigError, SupabaseClient, SupabaseConfig};
pub use repo::SupabaseRepo;
