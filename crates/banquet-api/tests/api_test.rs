// End-to-end tests driving the real router over an in-memory database.
// Run with: cargo test -p banquet-api

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use banquet_storage::Database;
use chrono::{Days, Local};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Database::connect_in_memory().await.unwrap();
    banquet_api::app(db)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn event_payload(date: &str, name: &str) -> Value {
    json!({
        "date": date,
        "name": name,
        "type": "wedding",
        "guests": 100,
        "total_amount": 150_000,
        "deposit": 30_000,
        "phone": "+996 555 123456",
    })
}

// ============================================
// Events
// ============================================

#[tokio::test]
async fn save_creates_then_updates_a_single_booking() {
    let app = test_app().await;

    let (status, first) = send(
        &app,
        Method::POST,
        "/events/save",
        Some(event_payload("2026-09-12", "First")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = send(
        &app,
        Method::POST,
        "/events/save",
        Some(event_payload("2026-09-12", "Second")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["name"], "Second");
    assert_eq!(second["created_at"], first["created_at"]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/events/by-date?date=2026-09-12",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Second");
    assert_eq!(events[0]["type"], "wedding");
}

#[tokio::test]
async fn by_date_on_a_free_date_is_an_empty_list() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/events/by-date?date=2031-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn by_date_without_date_param_is_400_for_every_resource() {
    let app = test_app().await;
    for uri in ["/events/by-date", "/income/by-date", "/outcome/by-date"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(body["error"], "date is required");
    }
}

#[tokio::test]
async fn by_date_with_malformed_date_is_400() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/events/by-date?date=12.09.2026",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn create_reports_field_errors() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/events/create",
        Some(json!({ "guests": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("date").is_some());
    assert!(body.get("name").is_some());
    assert!(body.get("type").is_some());
    assert!(body.get("guests").is_some());
}

#[tokio::test]
async fn create_rejects_an_already_booked_date() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/events/create",
        Some(event_payload("2026-09-12", "First")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/events/create",
        Some(event_payload("2026-09-12", "Second")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2026-09-12"));
}

#[tokio::test]
async fn put_replaces_a_booking_and_404s_on_unknown_id() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/events/create",
        Some(event_payload("2026-09-12", "Old name")),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/events/{id}"),
        Some(event_payload("2026-09-13", "New name")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "New name");
    assert_eq!(updated["date"], "2026-09-13");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/events/9999",
        Some(event_payload("2026-09-14", "Ghost")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn future_count_is_strictly_after_today() {
    let app = test_app().await;
    let today = Local::now().date_naive();

    for offset in 0..3u64 {
        let date = (today + Days::new(offset)).format("%Y-%m-%d").to_string();
        let (status, _) = send(
            &app,
            Method::POST,
            "/events/create",
            Some(event_payload(&date, "toi")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/events/future-count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn booked_dates_are_distinct_and_ascending() {
    let app = test_app().await;

    for date in ["2026-12-01", "2026-01-15", "2026-06-20"] {
        send(
            &app,
            Method::POST,
            "/events/create",
            Some(event_payload(date, "toi")),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/events/booked-dates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["dates"],
        json!(["2026-01-15", "2026-06-20", "2026-12-01"])
    );
}

// ============================================
// Income ledger
// ============================================

#[tokio::test]
async fn income_patch_changes_only_supplied_fields() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/income/create",
        Some(json!({
            "date": "2026-08-30",
            "title": "Hall rent",
            "amount": 50_000,
            "note": "deposit",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/income/{id}"),
        Some(json!({ "amount": 60_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["amount"], 60_000);
    assert_eq!(patched["title"], "Hall rent");
    assert_eq!(patched["note"], "deposit");
    assert_eq!(patched["date"], "2026-08-30");
}

#[tokio::test]
async fn income_put_requires_the_complete_schema() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/income/create",
        Some(json!({ "date": "2026-08-30", "title": "Bar", "amount": 12_000 })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Partial body is rejected on PUT
    let (status, errors) = send(
        &app,
        Method::PUT,
        &format!("/income/{id}"),
        Some(json!({ "amount": 13_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errors.get("date").is_some());
    assert!(errors.get("title").is_some());

    // Complete body overwrites every field
    let (status, replaced) = send(
        &app,
        Method::PUT,
        &format!("/income/{id}"),
        Some(json!({ "date": "2026-08-31", "title": "Kitchen", "amount": 9_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["title"], "Kitchen");
    assert_eq!(replaced["date"], "2026-08-31");
}

#[tokio::test]
async fn income_delete_is_204_then_404() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/income/create",
        Some(json!({ "date": "2026-08-30", "title": "Bar", "amount": 12_000 })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/income/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, &format!("/income/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(
        &app,
        Method::GET,
        "/income/by-date?date=2026-08-30",
        None,
    )
    .await;
    assert_eq!(listed["incomes"], json!([]));
}

#[tokio::test]
async fn income_create_reports_missing_fields() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/income/create",
        Some(json!({ "note": "??" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("date").is_some());
    assert!(body.get("title").is_some());
    assert!(body.get("amount").is_some());
}

// ============================================
// Outcome ledger
// ============================================

#[tokio::test]
async fn outcome_worker_type_defaults_and_validates() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/outcome/create",
        Some(json!({ "date": "2026-08-30", "name": "Nurlan", "salary": 3_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["worker_type"], "other");
    assert_eq!(created["paid"], 0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/outcome/create",
        Some(json!({
            "date": "2026-08-30",
            "name": "Aida",
            "worker_type": "plumbers",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("worker_type").is_some());
}

#[tokio::test]
async fn outcome_crud_round_trip() {
    let app = test_app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/outcome/create",
        Some(json!({
            "date": "2026-08-30",
            "worker_type": "floor-washers",
            "name": "Aigul",
            "salary": 2_500,
            "paid": 1_000,
        })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["worker_type"], "floor-washers");

    let (status, patched) = send(
        &app,
        Method::PATCH,
        &format!("/outcome/{id}"),
        Some(json!({ "paid": 2_500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["paid"], 2_500);
    assert_eq!(patched["name"], "Aigul");
    assert_eq!(patched["worker_type"], "floor-washers");

    let (status, _) = send(&app, Method::DELETE, &format!("/outcome/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/outcome/9999",
        Some(json!({ "paid": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
