//! Header search form.
//!
//! Turns the location/date/guest fields into the home page query string. Empty
//! fields are left out of the query entirely.

use chrono::NaiveDate;
use url::form_urlencoded;

use crate::validation::{validate, FieldRule, FormData, RuleSet, ValidationResult};

/// Values typed into the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
}

impl SearchQuery {
    /// Non-empty fields as `(query key, value)` pairs, in display order.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("location", self.location.as_str()),
            ("checkIn", self.check_in.as_str()),
            ("checkOut", self.check_out.as_str()),
            ("guests", self.guests.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.params() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Home page path carrying the filters, e.g. `/?location=Paris&guests=2`.
    pub fn home_path(&self) -> String {
        format!("/?{}", self.to_query_string())
    }

    /// Check dates are not in the past, check-out does not come before
    /// check-in, and the guest count is positive.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult {
        let data = FormData::from([
            ("checkIn", &self.check_in),
            ("checkOut", &self.check_out),
            ("guests", &self.guests),
        ]);
        let check_in = NaiveDate::parse_from_str(self.check_in.trim(), "%Y-%m-%d").ok();
        validate(&data, &search_rules(today, check_in))
    }
}

fn search_rules(today: NaiveDate, check_in: Option<NaiveDate>) -> RuleSet {
    let check_out = match check_in.filter(|date| *date > today) {
        Some(check_in) => FieldRule::new()
            .date()
            .min_date(check_in)
            .min_date_message("Check-out date cannot be before check-in"),
        None => FieldRule::new()
            .date()
            .min_date(today)
            .min_date_message("Check-out date cannot be in the past"),
    };

    RuleSet::new()
        .field(
            "checkIn",
            FieldRule::new()
                .date()
                .min_date(today)
                .min_date_message("Check-in date cannot be in the past"),
        )
        .field("checkOut", check_out)
        .field(
            "guests",
            FieldRule::new()
                .number()
                .min(1.0)
                .min_message("At least one guest is required"),
        )
}
