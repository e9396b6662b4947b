//! Domain models with validation
//!
//! Write payloads are validated before they reach any backend.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod medication;
pub mod pagination;

pub use validation::ValidationError;
pub use medication::{
    Category, Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication, Supplier,
};
pub use pagination::{ListParams, ListQuery, PageInfo, Paginated, Pagination, DEFAULT_LIMIT};
