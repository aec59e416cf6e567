// Outcome ledger HTTP routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use banquet_contracts::{Outcome, OutcomeDraft, OutcomeListResponse, OutcomePatch};
use banquet_storage::Database;
use std::sync::Arc;

use crate::common::ByDateQuery;
use crate::error::{ApiError, ErrorBody};
use crate::services::OutcomeService;

/// App state for outcome routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OutcomeService>,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            service: Arc::new(OutcomeService::new(db.outcome())),
        }
    }
}

/// Create outcome routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/outcome/by-date", get(outcome_by_date))
        .route("/outcome/create", post(create_outcome))
        .route(
            "/outcome/:id",
            put(update_outcome)
                .patch(patch_outcome)
                .delete(delete_outcome),
        )
        .with_state(state)
}

/// GET /outcome/by-date - List outcome rows for one date
#[utoipa::path(
    get,
    path = "/outcome/by-date",
    params(ByDateQuery),
    responses(
        (status = 200, description = "Outcome rows for the date, oldest first", body = OutcomeListResponse),
        (status = 400, description = "Missing or malformed date parameter", body = ErrorBody)
    ),
    tag = "outcome"
)]
pub async fn outcome_by_date(
    State(state): State<AppState>,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<OutcomeListResponse>, ApiError> {
    let date = query.parse()?;
    let outcomes = state.service.by_date(date).await?;
    Ok(Json(OutcomeListResponse { outcomes }))
}

/// POST /outcome/create - Insert an outcome row
#[utoipa::path(
    post,
    path = "/outcome/create",
    responses(
        (status = 201, description = "Outcome row created", body = Outcome),
        (status = 400, description = "Validation failed")
    ),
    tag = "outcome"
)]
pub async fn create_outcome(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Outcome>), ApiError> {
    let draft = OutcomeDraft::validate(&payload)?;
    let outcome = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// PUT /outcome/{id} - Full update, requires the complete schema
#[utoipa::path(
    put,
    path = "/outcome/{id}",
    params(("id" = i64, Path, description = "Outcome row ID")),
    responses(
        (status = 200, description = "Outcome row replaced", body = Outcome),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Outcome row not found", body = ErrorBody)
    ),
    tag = "outcome"
)]
pub async fn update_outcome(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Outcome>, ApiError> {
    let draft = OutcomeDraft::validate(&payload)?;
    let outcome = state
        .service
        .replace(id, draft)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(outcome))
}

/// PATCH /outcome/{id} - Partial update, only supplied fields change
#[utoipa::path(
    patch,
    path = "/outcome/{id}",
    params(("id" = i64, Path, description = "Outcome row ID")),
    responses(
        (status = 200, description = "Outcome row updated", body = Outcome),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Outcome row not found", body = ErrorBody)
    ),
    tag = "outcome"
)]
pub async fn patch_outcome(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Outcome>, ApiError> {
    let patch = OutcomePatch::validate(&payload)?;
    let outcome = state
        .service
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(outcome))
}

/// DELETE /outcome/{id} - Remove an outcome row
#[utoipa::path(
    delete,
    path = "/outcome/{id}",
    params(("id" = i64, Path, description = "Outcome row ID")),
    responses(
        (status = 204, description = "Outcome row deleted"),
        (status = 404, description = "Outcome row not found", body = ErrorBody)
    ),
    tag = "outcome"
)]
pub async fn delete_outcome(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
