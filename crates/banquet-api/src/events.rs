// Event CRUD HTTP routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use banquet_contracts::{
    BookedDatesResponse, Event, EventDraft, EventListResponse, FutureCountResponse,
};
use banquet_storage::Database;
use std::sync::Arc;

use crate::common::ByDateQuery;
use crate::error::{ApiError, ErrorBody};
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            service: Arc::new(EventService::new(db.events())),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/events/by-date", get(events_by_date))
        .route("/events/save", post(save_event))
        .route("/events/create", post(create_event))
        .route("/events/:id", put(update_event))
        .route("/events/future-count", get(future_count))
        .route("/events/booked-dates", get(booked_dates))
        .with_state(state)
}

/// GET /events/by-date - List the events booked on one date
///
/// An unbooked date is an empty list, never a 404.
#[utoipa::path(
    get,
    path = "/events/by-date",
    params(ByDateQuery),
    responses(
        (status = 200, description = "Events for the date, oldest first", body = EventListResponse),
        (status = 400, description = "Missing or malformed date parameter", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn events_by_date(
    State(state): State<AppState>,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<EventListResponse>, ApiError> {
    let date = query.parse()?;
    let events = state.service.by_date(date).await?;
    Ok(Json(EventListResponse { events }))
}

/// POST /events/save - Insert or replace the booking for a date
///
/// 201 when the date was free, 200 when an existing booking was overwritten.
#[utoipa::path(
    post,
    path = "/events/save",
    responses(
        (status = 200, description = "Existing booking replaced", body = Event),
        (status = 201, description = "Booking created", body = Event),
        (status = 400, description = "Validation failed")
    ),
    tag = "events"
)]
pub async fn save_event(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let draft = EventDraft::validate(&payload)?;
    let (event, created) = state.service.save(draft).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(event)))
}

/// POST /events/create - Insert a booking without the upsert check
#[utoipa::path(
    post,
    path = "/events/create",
    responses(
        (status = 201, description = "Booking created", body = Event),
        (status = 400, description = "Validation failed or date already booked")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let draft = EventDraft::validate(&payload)?;
    let event = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /events/{id} - Full replace of an existing booking
#[utoipa::path(
    put,
    path = "/events/{id}",
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Booking updated", body = Event),
        (status = 400, description = "Validation failed or date already booked"),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Event>, ApiError> {
    let draft = EventDraft::validate(&payload)?;
    let event = state
        .service
        .replace(id, draft)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(event))
}

/// GET /events/future-count - Bookings after the local calendar date
#[utoipa::path(
    get,
    path = "/events/future-count",
    responses(
        (status = 200, description = "Count of future bookings", body = FutureCountResponse)
    ),
    tag = "events"
)]
pub async fn future_count(
    State(state): State<AppState>,
) -> Result<Json<FutureCountResponse>, ApiError> {
    let count = state.service.future_count().await?;
    Ok(Json(FutureCountResponse { count }))
}

/// GET /events/booked-dates - Distinct booked dates, ascending
#[utoipa::path(
    get,
    path = "/events/booked-dates",
    responses(
        (status = 200, description = "All booked dates", body = BookedDatesResponse)
    ),
    tag = "events"
)]
pub async fn booked_dates(
    State(state): State<AppState>,
) -> Result<Json<BookedDatesResponse>, ApiError> {
    let dates = state.service.booked_dates().await?;
    Ok(Json(BookedDatesResponse { dates }))
}
