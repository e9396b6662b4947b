//! Schema for the direct-Postgres backend
//!
//! Mirrors the hosted tables: `medications` references `categories` and
//! `suppliers`, and the non-negative price/quantity rule is also a CHECK.

use sqlx::PgPool;

/// Create the inventory tables if they don't exist
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running inventory migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS medications (
            id BIGSERIAL PRIMARY KEY,
            sku TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            price NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (price >= 0),
            quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
            category_id BIGINT REFERENCES categories(id) ON DELETE SET NULL,
            supplier_id BIGINT REFERENCES suppliers(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_medications_name ON medications (lower(name))")
        .execute(pool)
        .await?;

    tracing::info!("Inventory migrations complete");
    Ok(())
}
