//! Repository seam for the `medications` table
//!
//! Handlers never see a concrete store. Each backend implements
//! [`MedicationRepo`] with one remote query per method:
//! - `SupabaseRepo` speaks PostgREST over HTTP
//! - `PgRepo` runs SQL on a direct Postgres pool
//! - `MemoryRepo` keeps rows in process (tests, demos)

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication, Pagination,
    ValidationError,
};

pub use memory::MemoryRepo;
pub use postgres::PgRepo;

/// Data access error type
///
/// Remote failures keep the backend's own message so it can be surfaced
/// to the caller untranslated.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RepoError {
    pub fn medication_not_found(id: MedicationId) -> Self {
        Self::NotFound {
            resource: "medication",
            id: id.to_string(),
        }
    }
}

/// Storage operations for medications
#[async_trait]
pub trait MedicationRepo: Send + Sync {
    /// One page of rows, optionally filtered by case-insensitive name substring.
    async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Medication>, RepoError>;

    /// Number of rows matching the same filter as `list`.
    async fn count(&self, search: Option<&str>) -> Result<u64, RepoError>;

    /// A single row with category and supplier joined in.
    async fn get_by_id(&self, id: MedicationId) -> Result<MedicationDetail, RepoError>;

    async fn create(&self, payload: NewMedication) -> Result<Medication, RepoError>;

    async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, RepoError>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, id: MedicationId) -> Result<(), RepoError>;

    /// The `quantity` column of every row.
    async fn quantities(&self) -> Result<Vec<Option<i64>>, RepoError>;
}

/// Build an `ILIKE` pattern matching `term` anywhere in the value.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
