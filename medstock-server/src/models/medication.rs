//! Medication records and write payloads
//!
//! `price` and `quantity` are never negative. Both payload types check this
//! in `validate()`, which the inventory calls before any write reaches a
//! backend.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Primary key of a medication row
pub type MedicationId = i64;

/// A medication row as stored in the `medications` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Medication {
    pub id: MedicationId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
}

/// Category lookup row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Supplier lookup row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Single-item view with the category and supplier joined in.
///
/// The nested keys are `categories` / `suppliers`, matching how the remote
/// client names embedded resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDetail {
    pub id: MedicationId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub categories: Option<Category>,
    pub suppliers: Option<Supplier>,
}

/// Body of `POST /medications`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedication {
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

impl NewMedication {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_quantity(Some(self.quantity))?;
        check_price(Some(self.price))
    }
}

/// Body of `PUT /medications/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

impl MedicationPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Empty { field: "update payload" });
        }
        check_quantity(self.quantity)?;
        check_price(self.price)
    }

    /// Apply the present fields onto an existing row.
    pub fn apply_to(&self, med: &mut Medication) {
        if let Some(sku) = &self.sku {
            med.sku = sku.clone();
        }
        if let Some(name) = &self.name {
            med.name = name.clone();
        }
        if let Some(description) = &self.description {
            med.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            med.price = price;
        }
        if let Some(quantity) = self.quantity {
            med.quantity = quantity;
        }
        if let Some(category_id) = self.category_id {
            med.category_id = Some(category_id);
        }
        if let Some(supplier_id) = self.supplier_id {
            med.supplier_id = Some(supplier_id);
        }
    }
}

fn check_quantity(quantity: Option<i64>) -> Result<(), ValidationError> {
    match quantity {
        Some(q) if q < 0 => Err(ValidationError::Negative { field: "quantity" }),
        _ => Ok(()),
    }
}

fn check_price(price: Option<f64>) -> Result<(), ValidationError> {
    match price {
        Some(p) if p.is_nan() || p < 0.0 => Err(ValidationError::Negative { field: "price" }),
        _ => Ok(()),
    }
}
