// Outcome ledger DTOs (dated staff-payment rows)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::validate::{FieldErrors, Fields};

pub const WORKER_NAME_MAX_LEN: usize = 120;

/// Worker classification for an outcome row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerType {
    Chefs,
    Musicians,
    Waiters,
    Dishwashers,
    FloorWashers,
    #[default]
    Other,
}

impl std::fmt::Display for WorkerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkerType::Chefs => "chefs",
            WorkerType::Musicians => "musicians",
            WorkerType::Waiters => "waiters",
            WorkerType::Dishwashers => "dishwashers",
            WorkerType::FloorWashers => "floor-washers",
            WorkerType::Other => "other",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown worker type")]
pub struct UnknownWorkerType;

impl std::str::FromStr for WorkerType {
    type Err = UnknownWorkerType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chefs" => Ok(WorkerType::Chefs),
            "musicians" => Ok(WorkerType::Musicians),
            "waiters" => Ok(WorkerType::Waiters),
            "dishwashers" => Ok(WorkerType::Dishwashers),
            "floor-washers" => Ok(WorkerType::FloorWashers),
            "other" => Ok(WorkerType::Other),
            _ => Err(UnknownWorkerType),
        }
    }
}

/// An outcome row as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Outcome {
    pub id: i64,
    pub date: NaiveDate,
    pub worker_type: WorkerType,
    pub name: String,
    pub salary: i64,
    pub paid: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutcomeListResponse {
    pub outcomes: Vec<Outcome>,
}

/// A validated outcome payload. Used by create and full (PUT) updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDraft {
    pub date: NaiveDate,
    pub worker_type: WorkerType,
    pub name: String,
    pub salary: i64,
    pub paid: i64,
}

impl OutcomeDraft {
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(payload)?;

        let date = fields.required_date("date");
        let worker_type = worker_type_or_default(&mut fields);
        let name = fields.required_text("name", WORKER_NAME_MAX_LEN);
        let salary = fields.count_or_zero("salary");
        let paid = fields.count_or_zero("paid");

        let errors = fields.into_errors();
        match (date, name) {
            (Some(date), Some(name)) if errors.is_empty() => Ok(Self {
                date,
                worker_type,
                name,
                salary,
                paid,
            }),
            _ => Err(errors),
        }
    }
}

/// A partial (PATCH) update: only supplied fields are touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomePatch {
    pub date: Option<NaiveDate>,
    pub worker_type: Option<WorkerType>,
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub paid: Option<i64>,
}

impl OutcomePatch {
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(payload)?;

        let patch = Self {
            date: fields.optional_date("date"),
            worker_type: optional_worker_type(&mut fields),
            name: fields.optional_text("name", WORKER_NAME_MAX_LEN),
            salary: fields.optional_count("salary"),
            paid: fields.optional_count("paid"),
        };

        let errors = fields.into_errors();
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

fn optional_worker_type(fields: &mut Fields<'_>) -> Option<WorkerType> {
    let value = fields.value("worker_type")?;
    match value.as_str().map(str::parse) {
        Some(Ok(worker_type)) => Some(worker_type),
        _ => {
            fields.error("worker_type", "is not a valid worker type");
            None
        }
    }
}

fn worker_type_or_default(fields: &mut Fields<'_>) -> WorkerType {
    match fields.value("worker_type") {
        None => WorkerType::Other,
        Some(_) => optional_worker_type(fields).unwrap_or_default(),
    }
}
