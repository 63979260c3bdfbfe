//! Validation rules for metadata fields

use super::field_type::FieldType;
use crate::shared::date::normalize_date;

/// Validation rules for a field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    /// Numeric value must be strictly greater than zero
    pub positive: bool,
    /// Closed set of accepted values (UI-side only, the server stays the authority)
    pub allowed: Option<&'static [&'static str]>,
}

impl ValidationRules {
    /// No constraints, optional
    pub const fn none() -> Self {
        Self {
            required: false,
            positive: false,
            allowed: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Required numeric field with a value > 0
    pub const fn required_positive() -> Self {
        Self {
            required: true,
            positive: true,
            ..Self::none()
        }
    }

    /// Required field restricted to `values`
    pub const fn one_of(values: &'static [&'static str]) -> Self {
        Self {
            required: true,
            allowed: Some(values),
            ..Self::none()
        }
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} is required", field_label));
        }

        if let Some(allowed) = self.allowed {
            if !value.trim().is_empty() && !allowed.contains(&value.trim()) {
                return Err(format!(
                    "{} must be one of: {}",
                    field_label,
                    allowed.join(", ")
                ));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against the positive rule
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        if self.positive && value <= 0.0 {
            return Err(format!("{} must be greater than 0", field_label));
        }

        Ok(())
    }

    /// Type-aware validation of a raw form/CSV value.
    ///
    /// An empty value passes when the field is optional.
    pub fn validate_value(
        &self,
        field_type: FieldType,
        value: &str,
        field_label: &str,
    ) -> Result<(), String> {
        self.validate_string(value, field_label)?;

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        match field_type {
            FieldType::Integer => {
                let n = trimmed
                    .parse::<i64>()
                    .map_err(|_| format!("{} must be a whole number", field_label))?;
                self.validate_number(n as f64, field_label)
            }
            FieldType::Decimal => {
                let n = trimmed
                    .parse::<f64>()
                    .map_err(|_| format!("{} must be a number", field_label))?;
                self.validate_number(n, field_label)
            }
            FieldType::Date => normalize_date(trimmed)
                .map(|_| ())
                .ok_or_else(|| format!("{} must be a valid date (YYYY-MM-DD)", field_label)),
            FieldType::Text | FieldType::Enum | FieldType::Reference => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_value(FieldType::Text, "   ", "SKU").is_err());
        assert!(rules.validate_value(FieldType::Text, "SKU1", "SKU").is_ok());
    }

    #[test]
    fn test_positive_numbers() {
        let rules = ValidationRules::required_positive();
        assert_eq!(
            rules.validate_value(FieldType::Integer, "0", "Quantity"),
            Err("Quantity must be greater than 0".to_string())
        );
        assert!(rules.validate_value(FieldType::Integer, "-3", "Quantity").is_err());
        assert!(rules.validate_value(FieldType::Integer, "2.5", "Quantity").is_err());
        assert!(rules.validate_value(FieldType::Integer, "12", "Quantity").is_ok());
        assert!(rules.validate_value(FieldType::Decimal, "0.01", "Cost").is_ok());
        assert!(rules.validate_value(FieldType::Decimal, "abc", "Cost").is_err());
    }

    #[test]
    fn test_optional_empty_passes() {
        let rules = ValidationRules {
            positive: true,
            ..ValidationRules::none()
        };
        assert!(rules.validate_value(FieldType::Integer, "", "Quantity").is_ok());
    }

    #[test]
    fn test_date_and_allowed_values() {
        let rules = ValidationRules::required();
        assert!(rules.validate_value(FieldType::Date, "2024-02-30", "Date").is_err());
        assert!(rules.validate_value(FieldType::Date, "2024-02-29", "Date").is_ok());

        let currency = ValidationRules::one_of(&["USD", "EUR"]);
        assert!(currency.validate_value(FieldType::Enum, "EUR", "Currency").is_ok());
        assert!(currency.validate_value(FieldType::Enum, "JPY", "Currency").is_err());
    }

    #[test]
    fn test_rules_only_carry_used_constraints() {
        let rules = ValidationRules::required_positive();
        assert_eq!(
            rules,
            ValidationRules {
                required: true,
                positive: true,
                allowed: None,
            }
        );
        assert_eq!(
            rules.validate_value(FieldType::Decimal, "1e9", "Cost"),
            Ok(())
        );
    }
}
