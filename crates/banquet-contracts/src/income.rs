// Income ledger DTOs (dated rows, many per date)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::validate::{FieldErrors, Fields};

pub const TITLE_MAX_LEN: usize = 120;

/// An income row as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Income {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncomeListResponse {
    pub incomes: Vec<Income>,
}

/// A validated income payload. Used by create and by full (PUT) updates,
/// which require the complete schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeDraft {
    pub date: NaiveDate,
    pub title: String,
    pub amount: i64,
    pub note: Option<String>,
}

impl IncomeDraft {
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(payload)?;

        let date = fields.required_date("date");
        let title = fields.required_text("title", TITLE_MAX_LEN);
        let amount = fields.required_count("amount");
        let note = fields.optional_free_text("note");

        let errors = fields.into_errors();
        match (date, title, amount) {
            (Some(date), Some(title), Some(amount)) if errors.is_empty() => Ok(Self {
                date,
                title,
                amount,
                note,
            }),
            _ => Err(errors),
        }
    }
}

/// A partial (PATCH) update: only supplied fields are touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomePatch {
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub note: Option<String>,
}

impl IncomePatch {
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(payload)?;

        let patch = Self {
            date: fields.optional_date("date"),
            title: fields.optional_text("title", TITLE_MAX_LEN),
            amount: fields.optional_count("amount"),
            note: fields.optional_free_text("note"),
        };

        let errors = fields.into_errors();
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}
