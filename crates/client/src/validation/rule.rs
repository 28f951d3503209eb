//! Field rules and ordered rule sets.

use chrono::NaiveDate;
use regex::Regex;

/// How a field's raw value is interpreted for bound checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
}

/// Constraints attached to one form field.
///
/// Built with the chained setters, e.g.
/// `FieldRule::required().message("Email is required")`.
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub error_message: Option<String>,
    pub field_type: FieldType,
    pub pattern: Option<Regex>,
    pub pattern_error_message: Option<String>,
    pub min: Option<f64>,
    pub min_error_message: Option<String>,
    pub max: Option<f64>,
    pub max_error_message: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub min_date_error_message: Option<String>,
    pub max_date: Option<NaiveDate>,
    pub max_date_error_message: Option<String>,
}

impl FieldRule {
    /// Rule with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule that rejects absent, empty and whitespace-only values
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Message used when the required check fails
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn pattern(mut self, pattern: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some(pattern);
        self.pattern_error_message = Some(message.into());
        self
    }

    /// Treat the value as a number for `min`/`max` checks
    pub fn number(mut self) -> Self {
        self.field_type = FieldType::Number;
        self
    }

    /// Treat the value as a date for `min_date`/`max_date` checks
    pub fn date(mut self) -> Self {
        self.field_type = FieldType::Date;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn min_message(mut self, message: impl Into<String>) -> Self {
        self.min_error_message = Some(message.into());
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn max_message(mut self, message: impl Into<String>) -> Self {
        self.max_error_message = Some(message.into());
        self
    }

    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn min_date_message(mut self, message: impl Into<String>) -> Self {
        self.min_date_error_message = Some(message.into());
        self
    }

    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn max_date_message(mut self, message: impl Into<String>) -> Self {
        self.max_date_error_message = Some(message.into());
        self
    }
}

/// Ordered mapping from field name to rule.
///
/// Fields are checked in insertion order. Adding a field that is already
/// present replaces its rule and keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `field`
    pub fn field(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        let field = field.into();
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((field, rule)),
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
