//! In-process medication store
//!
//! Same contract as the remote backends, kept in a `BTreeMap` so rows come
//! back in id order. Used by the router tests and `--backend memory`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MedicationRepo, RepoError};
use crate::models::{
    Category, Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication,
    Pagination, Supplier,
};

#[derive(Default)]
struct MemoryState {
    next_id: MedicationId,
    medications: BTreeMap<MedicationId, Medication>,
    categories: HashMap<i64, Category>,
    suppliers: HashMap<i64, Supplier>,
}

/// Medication repository held in memory
#[derive(Default)]
pub struct MemoryRepo {
    state: RwLock<MemoryState>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category so detail lookups can join it.
    pub async fn insert_category(&self, category: Category) {
        self.state
            .write()
            .await
            .categories
            .insert(category.id, category);
    }

    /// Register a supplier so detail lookups can join it.
    pub async fn insert_supplier(&self, supplier: Supplier) {
        self.state
            .write()
            .await
            .suppliers
            .insert(supplier.id, supplier);
    }
}

fn matches_search(med: &Medication, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => med.name.to_lowercase().contains(needle),
        None => true,
    }
}

#[async_trait]
impl MedicationRepo for MemoryRepo {
    async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Medication>, RepoError> {
        let needle = search.map(str::to_lowercase);
        let state = self.state.read().await;

        Ok(state
            .medications
            .values()
            .filter(|med| matches_search(med, needle.as_deref()))
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, search: Option<&str>) -> Result<u64, RepoError> {
        let needle = search.map(str::to_lowercase);
        let state = self.state.read().await;

        Ok(state
            .medications
            .values()
            .filter(|med| matches_search(med, needle.as_deref()))
            .count() as u64)
    }

    async fn get_by_id(&self, id: MedicationId) -> Result<MedicationDetail, RepoError> {
        let state = self.state.read().await;
        let med = state
            .medications
            .get(&id)
            .ok_or_else(|| RepoError::medication_not_found(id))?;

        Ok(MedicationDetail {
            id: med.id,
            sku: med.sku.clone(),
            name: med.name.clone(),
            description: med.description.clone(),
            price: med.price,
            quantity: med.quantity,
            categories: med.category_id.and_then(|c| state.categories.get(&c).cloned()),
            suppliers: med.supplier_id.and_then(|s| state.suppliers.get(&s).cloned()),
        })
    }

    async fn create(&self, payload: NewMedication) -> Result<Medication, RepoError> {
        let mut state = self.state.write().await;
        state.next_id += 1;

        let med = Medication {
            id: state.next_id,
            sku: payload.sku,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            quantity: payload.quantity,
            category_id: payload.category_id,
            supplier_id: payload.supplier_id,
        };
        state.medications.insert(med.id, med.clone());
        Ok(med)
    }

    async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, RepoError> {
        let mut state = self.state.write().await;
        let med = state
            .medications
            .get_mut(&id)
            .ok_or_else(|| RepoError::medication_not_found(id))?;

        patch.apply_to(med);
        Ok(med.clone())
    }

    async fn delete(&self, id: MedicationId) -> Result<(), RepoError> {
        self.state.write().await.medications.remove(&id);
        Ok(())
    }

    async fn quantities(&self) -> Result<Vec<Option<i64>>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .medications
            .values()
            .map(|med| Some(med.quantity))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_med(name: &str, quantity: i64) -> NewMedication {
        NewMedication {
            sku: format!("SKU-{name}"),
            name: name.into(),
            description: None,
            price: 1.0,
            quantity,
            category_id: None,
            supplier_id: None,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let repo = MemoryRepo::new();
        let a = repo.create(new_med("Aspirin", 1)).await.unwrap();
        let b = repo.create(new_med("Benadryl", 1)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let repo = MemoryRepo::new();
        repo.create(new_med("Paracetamol", 1)).await.unwrap();
        repo.create(new_med("Ibuprofen", 1)).await.unwrap();
        repo.create(new_med("PARACETAMOL Forte", 1)).await.unwrap();

        assert_eq!(repo.count(Some("cetam")).await.unwrap(), 2);
        assert_eq!(repo.count(None).await.unwrap(), 3);

        let page = Pagination::new(1, 10).unwrap();
        let names: Vec<_> = repo
            .list(Some("PROF"), page)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["Ibuprofen"]);
    }

    #[tokio::test]
    async fn list_windows_by_page() {
        let repo = MemoryRepo::new();
        for i in 0..5 {
            repo.create(new_med(&format!("Med {i}"), 1)).await.unwrap();
        }

        let page = Pagination::new(2, 2).unwrap();
        let ids: Vec<_> = repo
            .list(None, page)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [3, 4]);

        let past_end = Pagination::new(4, 2).unwrap();
        assert!(repo.list(None, past_end).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_joins_lookups() {
        let repo = MemoryRepo::new();
        repo.insert_category(Category {
            id: 7,
            name: "Analgesics".into(),
        })
        .await;
        let med = repo
            .create(NewMedication {
                category_id: Some(7),
                supplier_id: Some(99),
                ..new_med("Paracetamol", 1)
            })
            .await
            .unwrap();

        let detail = repo.get_by_id(med.id).await.unwrap();
        assert_eq!(detail.categories.map(|c| c.name).as_deref(), Some("Analgesics"));
        // unknown supplier id joins to nothing
        assert!(detail.suppliers.is_none());
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = MemoryRepo::new();
        let med = repo.create(new_med("Aspirin", 3)).await.unwrap();

        let patch = MedicationPatch {
            quantity: Some(9),
            ..Default::default()
        };
        assert_eq!(repo.update(med.id, patch.clone()).await.unwrap().quantity, 9);

        repo.delete(med.id).await.unwrap();
        repo.delete(med.id).await.unwrap();
        assert!(matches!(
            repo.update(med.id, patch).await,
            Err(RepoError::NotFound { .. })
        ));
    }
}
