//! Emission record form input: normalization and validation.

use chrono::NaiveDate;
use seaboard_database::EmissionRecord;
use seaboard_error::ValidationError;
use serde::{Deserialize, Serialize};

/// Raw form submission for the emission detail view. Every field arrives
/// as text; `action` selects insert, update, or delete.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EmissionForm {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub imo: Option<String>,
    #[serde(default)]
    pub ship_name: Option<String>,
    #[serde(default)]
    pub technical_efficiency_number: Option<String>,
    #[serde(default)]
    pub ship_type: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
}

impl EmissionForm {
    /// Uniform input normalization: trim every field and treat the empty
    /// string as no value. Runs before any validation so "left blank"
    /// and "absent" are indistinguishable downstream.
    pub fn normalized(self) -> Self {
        Self {
            action: normalize(self.action),
            imo: normalize(self.imo),
            ship_name: normalize(self.ship_name),
            technical_efficiency_number: normalize(self.technical_efficiency_number),
            ship_type: normalize(self.ship_type),
            issue: normalize(self.issue),
            expiry: normalize(self.expiry),
        }
    }

    /// Validate the (already normalized) input into an [`EmissionRecord`].
    ///
    /// `key_override` carries the IMO from the URL on updates, where the
    /// form field is disabled and absent from the submission. All failing
    /// fields are reported together; nothing reaches the store on failure.
    pub fn validate(&self, key_override: Option<i64>) -> Result<EmissionRecord, ValidationError> {
        let mut errors = ValidationError::empty();

        let imo = match key_override {
            Some(imo) => Some(imo),
            None => match &self.imo {
                Some(raw) => match raw.parse::<i64>() {
                    Ok(imo) => Some(imo),
                    Err(_) => {
                        errors.push("imo", "IMO number must be an integer");
                        None
                    }
                },
                None => {
                    errors.push("imo", "IMO number is required");
                    None
                }
            },
        };

        let technical_efficiency_number = match &self.technical_efficiency_number {
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.push(
                        "technical_efficiency_number",
                        "Technical efficiency must be a number",
                    );
                    None
                }
            },
            None => None,
        };

        let issue = parse_date(&mut errors, "issue", &self.issue);
        let expiry = parse_date(&mut errors, "expiry", &self.expiry);

        match (imo, errors.is_empty()) {
            (Some(imo), true) => Ok(EmissionRecord {
                imo,
                ship_name: self.ship_name.clone(),
                technical_efficiency_number,
                ship_type: self.ship_type.clone(),
                issue,
                expiry,
            }),
            _ => Err(errors),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_date(
    errors: &mut ValidationError,
    field: &str,
    value: &Option<String>,
) -> Option<NaiveDate> {
    match value {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(field, "Date must be in YYYY-MM-DD format");
                None
            }
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> EmissionForm {
        EmissionForm {
            action: Some("insert".to_string()),
            imo: Some("1234567".to_string()),
            ship_name: Some("Aurora".to_string()),
            technical_efficiency_number: Some("5.2".to_string()),
            ship_type: Some("tanker".to_string()),
            issue: Some("2020-01-01".to_string()),
            expiry: Some("2025-01-01".to_string()),
        }
    }

    #[test]
    fn empty_strings_normalize_to_none_uniformly() {
        let form = EmissionForm {
            action: Some("insert".to_string()),
            imo: Some("1234567".to_string()),
            ship_name: Some("".to_string()),
            technical_efficiency_number: Some("  ".to_string()),
            ship_type: Some(" tanker ".to_string()),
            issue: None,
            expiry: Some("".to_string()),
        }
        .normalized();

        assert_eq!(form.ship_name, None);
        assert_eq!(form.technical_efficiency_number, None);
        assert_eq!(form.ship_type.as_deref(), Some("tanker"));
        assert_eq!(form.expiry, None);
    }

    #[test]
    fn valid_form_builds_a_record() {
        let record = filled_form().normalized().validate(None).expect("valid form");
        assert_eq!(record.imo, 1_234_567);
        assert_eq!(record.ship_name.as_deref(), Some("Aurora"));
        assert_eq!(record.technical_efficiency_number, Some(5.2));
        assert_eq!(record.issue, NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn blank_optional_fields_become_null_values() {
        let mut form = filled_form();
        form.ship_name = Some("".to_string());
        form.technical_efficiency_number = None;
        let record = form.normalized().validate(None).expect("valid form");
        assert_eq!(record.ship_name, None);
        assert_eq!(record.technical_efficiency_number, None);
    }

    #[test]
    fn missing_imo_is_rejected() {
        let mut form = filled_form();
        form.imo = None;
        let err = form.normalized().validate(None).expect_err("must fail");
        assert!(err.fields.contains_key("imo"));
    }

    #[test]
    fn key_override_supersedes_the_form_field() {
        let mut form = filled_form();
        form.imo = None;
        let record = form
            .normalized()
            .validate(Some(7_654_321))
            .expect("override supplies the key");
        assert_eq!(record.imo, 7_654_321);
    }

    #[test]
    fn all_failures_are_reported_together() {
        let form = EmissionForm {
            action: Some("insert".to_string()),
            imo: Some("not-a-number".to_string()),
            ship_name: None,
            technical_efficiency_number: Some("fast".to_string()),
            ship_type: None,
            issue: Some("01/01/2020".to_string()),
            expiry: Some("never".to_string()),
        };
        let err = form.normalized().validate(None).expect_err("must fail");
        assert_eq!(err.fields.len(), 4);
        assert!(err.fields.contains_key("imo"));
        assert!(err.fields.contains_key("technical_efficiency_number"));
        assert!(err.fields.contains_key("issue"));
        assert!(err.fields.contains_key("expiry"));
    }
}
