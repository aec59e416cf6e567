// Explicit payload validation
//
// Request bodies arrive as raw JSON and are checked against a per-entity
// schema before anything touches storage. Errors accumulate per field so a
// 400 response can report every problem at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field-keyed validation errors, serialized as-is into a 400 body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("payload validation failed")]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The error set for a body that is not a JSON object at all.
    pub fn non_object() -> Self {
        let mut errors = Self::default();
        errors.push("non_field_errors", "expected a JSON object");
        errors
    }
}

/// Cursor over one request body, accumulating errors as fields are read.
///
/// JSON `null` is treated the same as an absent field everywhere.
pub struct Fields<'a> {
    obj: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(payload: &'a Value) -> Result<Self, FieldErrors> {
        match payload.as_object() {
            Some(obj) => Ok(Self {
                obj,
                errors: FieldErrors::default(),
            }),
            None => Err(FieldErrors::non_object()),
        }
    }

    /// Raw access for entity-specific checks (e.g. enum membership).
    pub fn value(&self, name: &str) -> Option<&'a Value> {
        match self.obj.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    pub fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(field, message);
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    pub fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.value(name) {
            Some(v) => self.date_value(name, v),
            None => {
                self.errors.push(name, "this field is required");
                None
            }
        }
    }

    pub fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.value(name) {
            Some(v) => self.date_value(name, v),
            None => None,
        }
    }

    /// Required non-blank string, capped at `max_len` characters.
    pub fn required_text(&mut self, name: &str, max_len: usize) -> Option<String> {
        match self.value(name) {
            Some(v) => match self.text_value(name, v, max_len) {
                Some(s) if s.trim().is_empty() => {
                    self.errors.push(name, "may not be blank");
                    None
                }
                other => other,
            },
            None => {
                self.errors.push(name, "this field is required");
                None
            }
        }
    }

    /// Optional string, capped at `max_len` characters. Blank is allowed.
    pub fn optional_text(&mut self, name: &str, max_len: usize) -> Option<String> {
        match self.value(name) {
            Some(v) => self.text_value(name, v, max_len),
            None => None,
        }
    }

    /// Optional string with no length cap.
    pub fn optional_free_text(&mut self, name: &str) -> Option<String> {
        match self.value(name) {
            Some(v) => self.text_value(name, v, usize::MAX),
            None => None,
        }
    }

    pub fn required_count(&mut self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(v) => self.count_value(name, v),
            None => {
                self.errors.push(name, "this field is required");
                None
            }
        }
    }

    pub fn optional_count(&mut self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(v) => self.count_value(name, v),
            None => None,
        }
    }

    /// Non-negative count defaulting to zero when absent.
    pub fn count_or_zero(&mut self, name: &str) -> i64 {
        match self.value(name) {
            Some(v) => self.count_value(name, v).unwrap_or(0),
            None => 0,
        }
    }

    fn date_value(&mut self, name: &str, value: &Value) -> Option<NaiveDate> {
        let Some(s) = value.as_str() else {
            self.errors.push(name, "must be a string in YYYY-MM-DD format");
            return None;
        };
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.push(name, "must be a valid YYYY-MM-DD date");
                None
            }
        }
    }

    fn text_value(&mut self, name: &str, value: &Value, max_len: usize) -> Option<String> {
        let Some(s) = value.as_str() else {
            self.errors.push(name, "must be a string");
            return None;
        };
        if s.chars().count() > max_len {
            self.errors
                .push(name, format!("must be at most {max_len} characters"));
            return None;
        }
        Some(s.to_string())
    }

    fn count_value(&mut self, name: &str, value: &Value) -> Option<i64> {
        match value.as_i64() {
            Some(n) if n >= 0 => Some(n),
            Some(_) => {
                self.errors.push(name, "must not be negative");
                None
            }
            None => {
                self.errors.push(name, "must be a non-negative whole number");
                None
            }
        }
    }
}
