//! Medication repository over PostgREST
//!
//! Each method is one HTTP call:
//! - filters are `column=op.value` query pairs; name search is
//!   `name=imatch.<escaped term>` since `ilike` turns every `*` into `%`
//! - pages use `offset`/`limit`, and `quantities` walks the table in
//!   windows because responses are capped at the server's `max-rows`
//! - counts are `HEAD` + `Prefer: count=exact`, read from `Content-Range`
//! - single rows ask for `application/vnd.pgrst.object+json`

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_RANGE};
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use super::client::{parse_content_range, SupabaseClient, SupabaseConfig, ConfigError};
use crate::db::{MedicationRepo, RepoError};
use crate::models::{
    Medication, MedicationDetail, MedicationId, MedicationPatch, NewMedication, Pagination,
};

const LIST_COLUMNS: &str = "id,sku,name,description,price,quantity,category_id,supplier_id";
const DETAIL_COLUMNS: &str = "id,sku,name,description,price,quantity,\
     categories(id,name),suppliers(id,name,email,phone)";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
/// Rows requested per window when reading every quantity
const QUANTITY_BATCH: u64 = 1000;

#[derive(Debug, Deserialize)]
struct QuantityRow {
    quantity: Option<i64>,
}

/// Medication repository backed by a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseRepo {
    client: SupabaseClient,
    table: String,
}

impl SupabaseRepo {
    pub fn new(config: &SupabaseConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: SupabaseClient::new(config)?,
            table: config.table.clone(),
        })
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client.request(method, &self.table)
    }
}

/// Case-insensitive substring match on `name`, with regex metacharacters
/// in the term matched literally.
fn name_filter(search: Option<&str>) -> Vec<(&'static str, String)> {
    search
        .map(|term| vec![("name", format!("imatch.{}", regex::escape(term)))])
        .unwrap_or_default()
}

fn id_filter(id: MedicationId) -> [(&'static str, String); 1] {
    [("id", format!("eq.{}", id))]
}

#[async_trait]
impl MedicationRepo for SupabaseRepo {
    async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<Medication>, RepoError> {
        tracing::debug!(table = %self.table, ?search, page = page.page, limit = page.limit, "list");
        let request = self
            .request(Method::GET)
            .query(&[("select", LIST_COLUMNS), ("order", "id.asc")])
            .query(&[("offset", page.offset()), ("limit", page.limit())])
            .query(&name_filter(search));

        let response = self.client.send(request).await?;
        Ok(response.json().await?)
    }

    async fn count(&self, search: Option<&str>) -> Result<u64, RepoError> {
        tracing::debug!(table = %self.table, ?search, "count");
        let request = self
            .request(Method::HEAD)
            .header("Prefer", "count=exact")
            .query(&[("select", "id")])
            .query(&name_filter(search));

        let response = self.client.send(request).await?;
        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| RepoError::Decode("missing Content-Range header".into()))?;

        parse_content_range(header)
            .ok_or_else(|| RepoError::Decode(format!("unreadable Content-Range '{}'", header)))
    }

    async fn get_by_id(&self, id: MedicationId) -> Result<MedicationDetail, RepoError> {
        tracing::debug!(table = %self.table, id, "get_by_id");
        let request = self
            .request(Method::GET)
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", DETAIL_COLUMNS)])
            .query(&id_filter(id));

        // zero (or several) rows under a single-object Accept is a 406
        match self.client.send(request).await {
            Ok(response) => Ok(response.json().await?),
            Err(RepoError::Remote { status, .. }) if status == StatusCode::NOT_ACCEPTABLE.as_u16() => {
                Err(RepoError::medication_not_found(id))
            }
            Err(e) => Err(e),
        }
    }

    async fn create(&self, payload: NewMedication) -> Result<Medication, RepoError> {
        tracing::debug!(table = %self.table, sku = %payload.sku, "create");
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[payload]);

        let rows: Vec<Medication> = self.client.send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Decode("insert returned no rows".into()))
    }

    async fn update(
        &self,
        id: MedicationId,
        patch: MedicationPatch,
    ) -> Result<Medication, RepoError> {
        tracing::debug!(table = %self.table, id, "update");
        let request = self
            .request(Method::PATCH)
            .header("Prefer", "return=representation")
            .query(&id_filter(id))
            .json(&patch);

        let rows: Vec<Medication> = self.client.send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::medication_not_found(id))
    }

    async fn delete(&self, id: MedicationId) -> Result<(), RepoError> {
        tracing::debug!(table = %self.table, id, "delete");
        let request = self.request(Method::DELETE).query(&id_filter(id));
        self.client.send(request).await?;
        Ok(())
    }

    async fn quantities(&self) -> Result<Vec<Option<i64>>, RepoError> {
        let mut quantities = Vec::new();

        // A window can come back shorter than asked; only an empty one ends the walk
        loop {
            let offset = quantities.len() as u64;
            let request = self
                .request(Method::GET)
                .query(&[("select", "quantity"), ("order", "id.asc")])
                .query(&[("offset", offset), ("limit", QUANTITY_BATCH)]);

            let rows: Vec<QuantityRow> = self.client.send(request).await?.json().await?;
            if rows.is_empty() {
                break;
            }
            tracing::debug!(table = %self.table, offset, rows = rows.len(), "quantities window");
            quantities.extend(rows.into_iter().map(|row| row.quantity));
        }

        Ok(quantities)
    }
}
