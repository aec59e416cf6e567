// Database rows and write inputs (internal, may differ from public DTOs)

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub guests: i64,
    pub total_amount: i64,
    pub deposit: i64,
    pub smoke_service: i64,
    pub banner_service: i64,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub date: NaiveDate,
    pub name: String,
    pub kind: String,
    pub guests: i64,
    pub total_amount: i64,
    pub deposit: i64,
    pub smoke_service: i64,
    pub banner_service: i64,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

// ============================================
// Income ledger
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct IncomeRow {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub amount: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub title: String,
    pub amount: i64,
    pub note: Option<String>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncome {
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub note: Option<String>,
}

// ============================================
// Outcome ledger
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct OutcomeRow {
    pub id: i64,
    pub date: NaiveDate,
    pub worker_type: String,
    pub name: String,
    pub salary: i64,
    pub paid: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOutcome {
    pub date: NaiveDate,
    pub worker_type: String,
    pub name: String,
    pub salary: i64,
    pub paid: i64,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    pub date: Option<NaiveDate>,
    pub worker_type: Option<String>,
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub paid: Option<i64>,
}
