//! Medication inventory operations
//!
//! The one entry point handlers use. Every write is validated here before
//! it reaches the repository, whichever backend is plugged in.

use std::sync::Arc;

use serde::Serialize;

use crate::db::{MedicationRepo, RepoError};
use crate::models::{
    Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication, Pagination,
};

/// Success marker returned by [`Inventory::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub success: bool,
}

/// Medication inventory over a swappable repository
#[derive(Clone)]
pub struct Inventory {
    repo: Arc<dyn MedicationRepo>,
}

impl Inventory {
    pub fn new(repo: Arc<dyn MedicationRepo>) -> Self {
        Self { repo }
    }

    /// A page of medications, filtered by name when `search` is non-empty.
    pub async fn get_all(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Medication>, RepoError> {
        self.repo.list(non_empty(search), page).await
    }

    /// How many medications match `search`.
    pub async fn get_total_count(&self, search: Option<&str>) -> Result<u64, RepoError> {
        self.repo.count(non_empty(search)).await
    }

    pub async fn get_by_id(&self, id: MedicationId) -> Result<MedicationDetail, RepoError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, payload: NewMedication) -> Result<Medication, RepoError> {
        payload.validate()?;
        let med = self.repo.create(payload).await?;
        tracing::info!(id = med.id, sku = %med.sku, "medication created");
        Ok(med)
    }

    pub async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, RepoError> {
        patch.validate()?;
        let med = self.repo.update(id, patch).await?;
        tracing::info!(id, "medication updated");
        Ok(med)
    }

    pub async fn remove(&self, id: MedicationId) -> Result<Removed, RepoError> {
        self.repo.delete(id).await?;
        tracing::info!(id, "medication deleted");
        Ok(Removed { success: true })
    }

    /// Sum of `quantity` over every row; missing quantities count as 0.
    pub async fn get_total_medications(&self) -> Result<i64, RepoError> {
        let quantities = self.repo.quantities().await?;
        Ok(quantities.into_iter().map(|q| q.unwrap_or(0)).sum())
    }
}

fn non_empty(search: Option<&str>) -> Option<&str> {
    search.filter(|s| !s.is_empty())
}
