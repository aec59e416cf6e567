// Income ledger HTTP routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use banquet_contracts::{Income, IncomeDraft, IncomeListResponse, IncomePatch};
use banquet_storage::Database;
use std::sync::Arc;

use crate::common::ByDateQuery;
use crate::error::{ApiError, ErrorBody};
use crate::services::IncomeService;

/// App state for income routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IncomeService>,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            service: Arc::new(IncomeService::new(db.income())),
        }
    }
}

/// Create income routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/income/by-date", get(income_by_date))
        .route("/income/create", post(create_income))
        .route(
            "/income/:id",
            put(update_income).patch(patch_income).delete(delete_income),
        )
        .with_state(state)
}

/// GET /income/by-date - List income rows for one date
#[utoipa::path(
    get,
    path = "/income/by-date",
    params(ByDateQuery),
    responses(
        (status = 200, description = "Income rows for the date, oldest first", body = IncomeListResponse),
        (status = 400, description = "Missing or malformed date parameter", body = ErrorBody)
    ),
    tag = "income"
)]
pub async fn income_by_date(
    State(state): State<AppState>,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<IncomeListResponse>, ApiError> {
    let date = query.parse()?;
    let incomes = state.service.by_date(date).await?;
    Ok(Json(IncomeListResponse { incomes }))
}

/// POST /income/create - Insert an income row
#[utoipa::path(
    post,
    path = "/income/create",
    responses(
        (status = 201, description = "Income row created", body = Income),
        (status = 400, description = "Validation failed")
    ),
    tag = "income"
)]
pub async fn create_income(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Income>), ApiError> {
    let draft = IncomeDraft::validate(&payload)?;
    let income = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(income)))
}

/// PUT /income/{id} - Full update, requires the complete schema
#[utoipa::path(
    put,
    path = "/income/{id}",
    params(("id" = i64, Path, description = "Income row ID")),
    responses(
        (status = 200, description = "Income row replaced", body = Income),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Income row not found", body = ErrorBody)
    ),
    tag = "income"
)]
pub async fn update_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Income>, ApiError> {
    let draft = IncomeDraft::validate(&payload)?;
    let income = state
        .service
        .replace(id, draft)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(income))
}

/// PATCH /income/{id} - Partial update, only supplied fields change
#[utoipa::path(
    patch,
    path = "/income/{id}",
    params(("id" = i64, Path, description = "Income row ID")),
    responses(
        (status = 200, description = "Income row updated", body = Income),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Income row not found", body = ErrorBody)
    ),
    tag = "income"
)]
pub async fn patch_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Income>, ApiError> {
    let patch = IncomePatch::validate(&payload)?;
    let income = state
        .service
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(income))
}

/// DELETE /income/{id} - Remove an income row
#[utoipa::path(
    delete,
    path = "/income/{id}",
    params(("id" = i64, Path, description = "Income row ID")),
    responses(
        (status = 204, description = "Income row deleted"),
        (status = 404, description = "Income row not found", body = ErrorBody)
    ),
    tag = "income"
)]
pub async fn delete_income(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
