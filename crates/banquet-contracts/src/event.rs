// Event DTOs (one booking per calendar date)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::validate::{FieldErrors, Fields};

pub const NAME_MAX_LEN: usize = 120;
pub const TYPE_MAX_LEN: usize = 30;
pub const PHONE_MAX_LEN: usize = 40;

/// A calendar booking as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: i64,
    pub date: NaiveDate,
    pub name: String,
    /// Short category label, e.g. "wedding".
    #[serde(rename = "type")]
    pub kind: String,
    pub guests: i64,
    pub total_amount: i64,
    pub deposit: i64,
    pub smoke_service: i64,
    pub banner_service: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response for the by-date lookup. Always the list shape, even for zero
/// or one match.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FutureCountResponse {
    pub count: i64,
}

/// Distinct booked dates, ascending, as ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookedDatesResponse {
    pub dates: Vec<NaiveDate>,
}

/// A validated event payload, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
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

impl EventDraft {
    /// Checks a raw JSON payload against the event schema.
    ///
    /// `date`, `name` and `type` are required; the quantity fields default
    /// to zero; `phone` and `notes` may be omitted.
    pub fn validate(payload: &Value) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(payload)?;

        let date = fields.required_date("date");
        let name = fields.required_text("name", NAME_MAX_LEN);
        let kind = fields.required_text("type", TYPE_MAX_LEN);
        let guests = fields.count_or_zero("guests");
        let total_amount = fields.count_or_zero("total_amount");
        let deposit = fields.count_or_zero("deposit");
        let smoke_service = fields.count_or_zero("smoke_service");
        let banner_service = fields.count_or_zero("banner_service");
        let phone = fields.optional_text("phone", PHONE_MAX_LEN);
        let notes = fields.optional_free_text("notes");

        let errors = fields.into_errors();
        match (date, name, kind) {
            (Some(date), Some(name), Some(kind)) if errors.is_empty() => Ok(Self {
                date,
                name,
                kind,
                guests,
                total_amount,
                deposit,
                smoke_service,
                banner_service,
                phone,
                notes,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_validates_with_zero_defaults() {
        let draft = EventDraft::validate(&json!({
            "date": "2026-09-12",
            "name": "Aibek & Aigerim",
            "type": "wedding",
        }))
        .unwrap();

        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
        assert_eq!(draft.guests, 0);
        assert_eq!(draft.deposit, 0);
        assert_eq!(draft.phone, None);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = EventDraft::validate(&json!({ "guests": 120 })).unwrap_err();
        assert!(errors.contains("date"));
        assert!(errors.contains("name"));
        assert!(errors.contains("type"));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let errors = EventDraft::validate(&json!({
            "date": "2026-09-12",
            "name": "Birthday",
            "type": "birthday",
            "deposit": -500,
        }))
        .unwrap_err();
        assert!(errors.contains("deposit"));
    }

    #[test]
    fn event_serializes_type_field_name() {
        let event = Event {
            id: 1,
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            name: "Toi".into(),
            kind: "wedding".into(),
            guests: 80,
            total_amount: 120_000,
            deposit: 20_000,
            smoke_service: 0,
            banner_service: 0,
            phone: None,
            notes: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "wedding");
        assert_eq!(value["date"], "2026-09-12");
        assert!(value.get("phone").is_none());
    }
}
