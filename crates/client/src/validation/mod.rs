//! Form validation.
//!
//! `validate` is a pure function: it walks a [`RuleSet`] in order and stops at
//! the first failing field. Moving focus to that field is a separate concern,
//! handled by [`validate_and_focus`] through the [`FocusTarget`] trait.

mod rule;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use common::{AppError, AppResult};

pub use rule::{FieldRule, FieldType, RuleSet};

/// Raw form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: HashMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for FormData {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(FormData::new(), |data, (k, v)| data.with(k, v))
    }
}

/// Outcome of one validation pass. At most one field is ever reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    is_valid: bool,
    error_message: Option<String>,
    first_invalid_field: Option<String>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
            first_invalid_field: None,
        }
    }

    fn invalid(field: &str, message: String) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message),
            first_invalid_field: Some(field.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn first_invalid_field(&self) -> Option<&str> {
        self.first_invalid_field.as_deref()
    }

    /// Convert into an `AppError::Validation` when invalid.
    pub fn into_result(self) -> AppResult<()> {
        match (self.first_invalid_field, self.error_message) {
            (Some(field), Some(message)) => Err(AppError::Validation { field, message }),
            _ => Ok(()),
        }
    }
}

/// A display surface able to bring a named input into view and focus it.
pub trait FocusTarget {
    fn focus_field(&mut self, field: &str);
}

/// Validate `data` against `rules`.
pub fn validate(data: &FormData, rules: &RuleSet) -> ValidationResult {
    for (field, rule) in rules.iter() {
        if let Some(message) = check_field(field, data.get(field), rule) {
            return ValidationResult::invalid(field, message);
        }
    }
    ValidationResult::valid()
}

/// Validate, then hand the first invalid field (if any) to `target`.
pub fn validate_and_focus<T>(data: &FormData, rules: &RuleSet, target: &mut T) -> ValidationResult
where
    T: FocusTarget + ?Sized,
{
    let result = validate(data, rules);
    if let Some(field) = result.first_invalid_field() {
        target.focus_field(field);
    }
    result
}

/// Run one rule's checks in priority order: required, numeric bounds,
/// date bounds, pattern.
fn check_field(field: &str, value: Option<&str>, rule: &FieldRule) -> Option<String> {
    let provided = value.filter(|v| !v.is_empty());

    if rule.required && provided.map_or(true, |v| v.trim().is_empty()) {
        return Some(message_or(&rule.error_message, || format!("{} is required", field)));
    }

    // Bound and pattern checks only apply to values that were actually given.
    let value = provided?;

    if rule.field_type == FieldType::Number {
        // `inf` and `NaN` parse as f64 but are not numbers a user can enter.
        if let Some(number) = value.trim().parse::<f64>().ok().filter(|n| n.is_finite()) {
            if let Some(min) = rule.min.filter(|min| number < *min) {
                return Some(message_or(&rule.min_error_message, || {
                    format!("{} must be at least {}", field, min)
                }));
            }
            if let Some(max) = rule.max.filter(|max| number > *max) {
                return Some(message_or(&rule.max_error_message, || {
                    format!("{} must be at most {}", field, max)
                }));
            }
        }
    }

    if rule.field_type == FieldType::Date {
        if let Some(at) = parse_date(value) {
            if let Some(min) = rule.min_date.filter(|min| at < min.and_time(NaiveTime::MIN)) {
                return Some(message_or(&rule.min_date_error_message, || {
                    format!("{} must be after {}", field, min)
                }));
            }
            if let Some(max) = rule.max_date.filter(|max| at > max.and_time(NaiveTime::MIN)) {
                return Some(message_or(&rule.max_date_error_message, || {
                    format!("{} must be before {}", field, max)
                }));
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(message_or(&rule.pattern_error_message, || {
                format!("{} format is invalid", field)
            }));
        }
    }

    None
}

fn message_or(custom: &Option<String>, default: impl FnOnce() -> String) -> String {
    custom.clone().unwrap_or_else(default)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339 timestamps.
/// Anything else is treated as an unparseable date and never fails a bound.
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}
