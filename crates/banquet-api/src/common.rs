// Query parameters shared by the by-date lookups

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;

/// Query parameters for date-keyed lookups.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ByDateQuery {
    /// Calendar date in YYYY-MM-DD format.
    #[param(example = "2026-09-12")]
    pub date: Option<String>,
}

impl ByDateQuery {
    /// A missing parameter and a malformed date are both client errors.
    pub fn parse(&self) -> Result<NaiveDate, ApiError> {
        let raw = self.date.as_deref().ok_or(ApiError::MissingParam("date"))?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest("date must be in YYYY-MM-DD format".to_string()))
    }
}
