//! Calendar date helpers
//!
//! Dates travel as `YYYY-MM-DD` strings everywhere (API, CSV, filters).
//! Comparisons are plain string comparisons on that canonical form.

use chrono::NaiveDate;

/// Canonical external date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input formats accepted from date pickers, CSV files and server payloads
const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Parse a date in any accepted format.
///
/// A time component (`2024-03-20T10:15:00Z`, `2024-03-20 10:15:00`) is dropped,
/// the calendar date is kept as written (no timezone shift).
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Normalize any accepted date representation to `YYYY-MM-DD`
pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format(DATE_FORMAT).to_string())
}

/// Inclusive range test on canonical date strings.
///
/// Empty bounds are open. A record date that cannot be normalized never matches
/// a bounded range.
pub fn date_in_range(value: &str, from: &str, to: &str) -> bool {
    let from = from.trim();
    let to = to.trim();
    if from.is_empty() && to.is_empty() {
        return true;
    }

    let Some(date) = normalize_date(value) else {
        return false;
    };

    (from.is_empty() || date.as_str() >= from) && (to.is_empty() || date.as_str() <= to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_accepted_formats() {
        assert_eq!(normalize_date("2024-03-20"), Some("2024-03-20".to_string()));
        assert_eq!(normalize_date("2024/03/20"), Some("2024-03-20".to_string()));
        assert_eq!(normalize_date("20.03.2024"), Some("2024-03-20".to_string()));
        assert_eq!(normalize_date("03/20/2024"), Some("2024-03-20".to_string()));
        assert_eq!(
            normalize_date("2024-03-20T23:59:59.000Z"),
            Some("2024-03-20".to_string())
        );
        assert_eq!(
            normalize_date(" 2024-03-20 08:00:00 "),
            Some("2024-03-20".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("yesterday"), None);
        assert_eq!(normalize_date("2024-13-01"), None);
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(date_in_range("2024-01-01", "2024-01-01", "2024-01-31"));
        assert!(date_in_range("2024-01-31T12:00:00Z", "2024-01-01", "2024-01-31"));
        assert!(!date_in_range("2024-02-01", "2024-01-01", "2024-01-31"));
        assert!(!date_in_range("2023-12-31", "2024-01-01", "2024-01-31"));
    }

    #[test]
    fn test_open_bounds() {
        assert!(date_in_range("2024-05-05", "", ""));
        assert!(date_in_range("2024-05-05", "2024-05-01", ""));
        assert!(date_in_range("2024-05-05", "", "2024-05-05"));
        assert!(!date_in_range("not a date", "2024-05-01", ""));
    }
}
