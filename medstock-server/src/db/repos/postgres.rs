//! Medication repository over a direct Postgres pool
//!
//! - list/count share one `ILIKE` filter (`$1 IS NULL` disables it)
//! - get_by_id uses LEFT JOINs for the lookups (no N+1)
//! - update uses COALESCE so absent patch fields keep their value

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{contains_pattern, MedicationRepo, RepoError};
use crate::models::{
    Category, Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication,
    Pagination, Supplier,
};

/// Columns of a `Medication`, with numeric types widened for decoding.
const MEDICATION_COLUMNS: &str = "id, sku, name, description, price::float8 AS price, \
     quantity::int8 AS quantity, category_id, supplier_id";

/// Medication repository backed by sqlx
#[derive(Clone)]
pub struct PgRepo {
    pool: PgPool,
}

impl PgRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicationRepo for PgRepo {
    async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Medication>, RepoError> {
        let sql = format!(
            r#"
            SELECT {MEDICATION_COLUMNS}
            FROM medications
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        );
        // Pagination keeps the offset within bigint; saturate rather than wrap
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, Medication>(&sql)
            .bind(search.map(contains_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<&str>) -> Result<u64, RepoError> {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM medications WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(search.map(contains_pattern))
        .fetch_one(&self.pool)
        .await?;

        Ok(total.max(0) as u64)
    }

    async fn get_by_id(&self, id: MedicationId) -> Result<MedicationDetail, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT
                m.id,
                m.sku,
                m.name,
                m.description,
                m.price::float8 AS price,
                m.quantity::int8 AS quantity,
                c.id AS category_id,
                c.name AS category_name,
                s.id AS supplier_id,
                s.name AS supplier_name,
                s.email AS supplier_email,
                s.phone AS supplier_phone
            FROM medications m
            LEFT JOIN categories c ON c.id = m.category_id
            LEFT JOIN suppliers s ON s.id = m.supplier_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::medication_not_found(id))?;

        let category_id: Option<i64> = row.try_get("category_id")?;
        let supplier_id: Option<i64> = row.try_get("supplier_id")?;

        let categories = match category_id {
            Some(id) => Some(Category {
                id,
                name: row.try_get("category_name")?,
            }),
            None => None,
        };
        let suppliers = match supplier_id {
            Some(id) => Some(Supplier {
                id,
                name: row.try_get("supplier_name")?,
                email: row.try_get("supplier_email")?,
                phone: row.try_get("supplier_phone")?,
            }),
            None => None,
        };

        Ok(MedicationDetail {
            id: row.try_get("id")?,
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            categories,
            suppliers,
        })
    }

    async fn create(&self, payload: NewMedication) -> Result<Medication, RepoError> {
        let sql = format!(
            r#"
            INSERT INTO medications
                (sku, name, description, price, quantity, category_id, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MEDICATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Medication>(&sql)
            .bind(&payload.sku)
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(payload.price)
            .bind(payload.quantity)
            .bind(payload.category_id)
            .bind(payload.supplier_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, RepoError> {
        let sql = format!(
            r#"
            UPDATE medications SET
                sku = COALESCE($2, sku),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                quantity = COALESCE($6, quantity),
                category_id = COALESCE($7, category_id),
                supplier_id = COALESCE($8, supplier_id)
            WHERE id = $1
            RETURNING {MEDICATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Medication>(&sql)
            .bind(id)
            .bind(&patch.sku)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(patch.price)
            .bind(patch.quantity)
            .bind(patch.category_id)
            .bind(patch.supplier_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::medication_not_found(id))?;

        Ok(row)
    }

    async fn delete(&self, id: MedicationId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM medications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn quantities(&self) -> Result<Vec<Option<i64>>, RepoError> {
        let rows: Vec<(Option<i64>,)> =
            sqlx::query_as("SELECT quantity::int8 FROM medications")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(q,)| q).collect())
    }
}
