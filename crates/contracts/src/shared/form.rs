//! Raw form values → typed record payloads
//!
//! The record dialog and the CSV importer both collect plain strings keyed by
//! field name. This module validates them against field metadata and converts
//! them into JSON objects that deserialize into the entity DTOs.

use crate::shared::date::normalize_date;
use crate::shared::metadata::{FieldMetadata, FieldType};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Raw values keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Validation messages keyed by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Key used for errors that do not belong to a single field
pub const RECORD_ERROR_KEY: &str = "_record";

/// Validate a full create form: every field is checked with its rules
pub fn validate_form(fields: &[&FieldMetadata], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in fields {
        let value = values.get(field.name).map(String::as_str).unwrap_or("");
        if let Err(e) = field
            .validation
            .validate_value(field.field_type, value, field.label())
        {
            errors.insert(field.name.to_string(), e);
        }
    }
    errors
}

/// Validate a partial edit: empty values mean "no change" and are skipped
pub fn validate_changes(fields: &[&FieldMetadata], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in fields {
        let Some(value) = values.get(field.name) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        if let Err(e) = field
            .validation
            .validate_value(field.field_type, value, field.label())
        {
            errors.insert(field.name.to_string(), e);
        }
    }
    errors
}

fn typed_value(field: &FieldMetadata, raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    match field.field_type {
        FieldType::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("{} must be a whole number", field.label())),
        FieldType::Decimal => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("{} must be a number", field.label())),
        FieldType::Date => normalize_date(raw)
            .map(Value::String)
            .ok_or_else(|| format!("{} must be a valid date (YYYY-MM-DD)", field.label())),
        FieldType::Text | FieldType::Enum | FieldType::Reference => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

/// Convert raw values into a JSON object.
///
/// With `skip_empty` blank values are left out (partial update); otherwise
/// blank text stays an empty string and blank numbers/dates are errors.
pub fn to_json_object(
    fields: &[&FieldMetadata],
    values: &FormValues,
    skip_empty: bool,
) -> Result<Map<String, Value>, FieldErrors> {
    let mut object = Map::new();
    let mut errors = FieldErrors::new();

    for field in fields {
        let raw = values.get(field.name).map(String::as_str).unwrap_or("");
        if raw.trim().is_empty() {
            if skip_empty {
                continue;
            }
            if matches!(
                field.field_type,
                FieldType::Text | FieldType::Enum | FieldType::Reference
            ) {
                object.insert(field.name.to_string(), Value::String(String::new()));
                continue;
            }
        }
        match typed_value(field, raw) {
            Ok(v) => {
                object.insert(field.name.to_string(), v);
            }
            Err(e) => {
                errors.insert(field.name.to_string(), e);
            }
        }
    }

    if errors.is_empty() {
        Ok(object)
    } else {
        Err(errors)
    }
}

/// Build a typed payload (create or update DTO) from raw values
pub fn payload_from_values<T: DeserializeOwned>(
    fields: &[&FieldMetadata],
    values: &FormValues,
    skip_empty: bool,
) -> Result<T, FieldErrors> {
    let object = to_json_object(fields, values, skip_empty)?;
    serde_json::from_value(Value::Object(object)).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.insert(RECORD_ERROR_KEY.to_string(), e.to_string());
        errors
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::ValidationRules;
    use serde::Deserialize;

    static FIELDS: &[FieldMetadata] = &[
        FieldMetadata::new("sku", "SKU", FieldType::Text).rules(ValidationRules::required()),
        FieldMetadata::new("quantity", "Quantity", FieldType::Integer)
            .rules(ValidationRules::required_positive()),
        FieldMetadata::new("day", "Day", FieldType::Date).rules(ValidationRules::required()),
        FieldMetadata::new("note", "Note", FieldType::Text),
    ];

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        sku: String,
        quantity: i64,
        day: String,
        note: String,
    }

    #[derive(Debug, Deserialize, PartialEq, Default)]
    struct Patch {
        #[serde(default)]
        sku: Option<String>,
        #[serde(default)]
        quantity: Option<i64>,
        #[serde(default)]
        day: Option<String>,
    }

    fn fields() -> Vec<&'static FieldMetadata> {
        FIELDS.iter().collect()
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_form_reports_every_invalid_field() {
        let errors = validate_form(&fields(), &values(&[("quantity", "0")]));
        assert!(errors.contains_key("sku"));
        assert!(errors.contains_key("quantity"));
        assert!(errors.contains_key("day"));
        assert!(!errors.contains_key("note"));
    }

    #[test]
    fn test_validate_changes_skips_blank() {
        let errors = validate_changes(&fields(), &values(&[("sku", ""), ("quantity", "-1")]));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("quantity"));
    }

    #[test]
    fn test_payload_from_values_normalizes_date() {
        let payload: Payload = payload_from_values(
            &fields(),
            &values(&[("sku", "A-1"), ("quantity", "3"), ("day", "20.03.2024")]),
            false,
        )
        .unwrap();
        assert_eq!(
            payload,
            Payload {
                sku: "A-1".into(),
                quantity: 3,
                day: "2024-03-20".into(),
                note: String::new(),
            }
        );
    }

    #[test]
    fn test_partial_payload_keeps_only_changes() {
        let patch: Patch = payload_from_values(
            &fields(),
            &values(&[("sku", ""), ("quantity", "7"), ("day", "")]),
            true,
        )
        .unwrap();
        assert_eq!(
            patch,
            Patch {
                quantity: Some(7),
                ..Patch::default()
            }
        );
    }
}
