// Banquet API: HTTP surface over the booking and ledger stores
//
// The router is built here so integration tests can drive it in-process;
// main.rs only adds process wiring (env, tracing, swagger, listener).

pub mod common;
pub mod error;
pub mod events;
pub mod income;
pub mod outcome;
pub mod services;

use axum::{routing::get, Json, Router};
use banquet_contracts::{
    BookedDatesResponse, Event, EventListResponse, FutureCountResponse, Income,
    IncomeListResponse, Outcome, OutcomeListResponse, WorkerType,
};
use banquet_storage::Database;
use serde::Serialize;
use utoipa::OpenApi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        events::events_by_date,
        events::save_event,
        events::create_event,
        events::update_event,
        events::future_count,
        events::booked_dates,
        income::income_by_date,
        income::create_income,
        income::update_income,
        income::patch_income,
        income::delete_income,
        outcome::outcome_by_date,
        outcome::create_outcome,
        outcome::update_outcome,
        outcome::patch_outcome,
        outcome::delete_outcome,
    ),
    components(
        schemas(
            Event, EventListResponse, FutureCountResponse, BookedDatesResponse,
            Income, IncomeListResponse,
            Outcome, OutcomeListResponse, WorkerType,
            error::ErrorBody,
        )
    ),
    tags(
        (name = "events", description = "Calendar booking endpoints (one event per date)"),
        (name = "income", description = "Income ledger endpoints"),
        (name = "outcome", description = "Outcome ledger endpoints")
    ),
    info(
        title = "Banquet API",
        version = "0.1.0",
        description = "Record-keeping backend for event-venue bookings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Build the application router over a connected database.
pub fn app(db: Database) -> Router {
    let events_state = events::AppState::new(&db);
    let income_state = income::AppState::new(&db);
    let outcome_state = outcome::AppState::new(&db);

    Router::new()
        .route("/health", get(health))
        .merge(events::routes(events_state))
        .merge(income::routes(income_state))
        .merge(outcome::routes(outcome_state))
}
