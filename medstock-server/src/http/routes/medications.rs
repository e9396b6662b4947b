//! Medication endpoints
//!
//! The list handler issues two independent queries (page, then count);
//! they are not wrapped in a transaction.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams, ValidId};
use crate::http::server::AppState;
use crate::models::{
    ListParams, ListQuery, Medication, MedicationDetail, MedicationPatch, NewMedication, Paginated,
};

/// Delete confirmation
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// Aggregate stock response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalResponse {
    pub total_quantity: i64,
}

/// GET /medications?name=&page=&limit=
async fn list_medications(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Paginated<Medication>>, ApiError> {
    let query = ListQuery::try_from(params)?;

    let data = state
        .inventory
        .get_all(query.search(), query.page)
        .await
        .map_err(ApiError::list_failed)?;
    let total = state
        .inventory
        .get_total_count(query.search())
        .await
        .map_err(ApiError::list_failed)?;

    Ok(Json(Paginated::new(data, query.page, total)))
}

/// POST /medications
async fn create_medication(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<NewMedication>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let med = state
        .inventory
        .create(payload)
        .await
        .map_err(ApiError::write_failed)?;

    Ok((StatusCode::CREATED, Json(med)))
}

/// GET /medications/total
async fn total_quantity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalResponse>, ApiError> {
    let total_quantity = state
        .inventory
        .get_total_medications()
        .await
        .map_err(ApiError::list_failed)?;

    Ok(Json(TotalResponse { total_quantity }))
}

/// GET /medications/{id}
async fn get_medication(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MedicationDetail>, ApiError> {
    let med = state
        .inventory
        .get_by_id(id)
        .await
        .map_err(ApiError::lookup_failed)?;

    Ok(Json(med))
}

/// PUT /medications/{id}
async fn update_medication(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(patch): JsonBody<MedicationPatch>,
) -> Result<Json<Medication>, ApiError> {
    let med = state
        .inventory
        .update(id, patch)
        .await
        .map_err(ApiError::write_failed)?;

    Ok(Json(med))
}

/// DELETE /medications/{id}
async fn delete_medication(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<DeletedResponse>, ApiError> {
    state
        .inventory
        .remove(id)
        .await
        .map_err(ApiError::write_failed)?;

    Ok(Json(DeletedResponse {
        message: "Deleted successfully",
    }))
}

/// Medication routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/medications", get(list_medications).post(create_medication))
        .route("/medications/total", get(total_quantity))
        .route(
            "/medications/{id}",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
}
