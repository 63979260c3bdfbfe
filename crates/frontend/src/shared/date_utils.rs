/// Utilities for date formatting
///
/// Dates are shown and exchanged in `YYYY-MM-DD`; parsing lives in
/// `contracts::shared::date`.
use contracts::shared::date::{normalize_date, DATE_FORMAT};

/// Canonical display form of a record date, raw value if it cannot be parsed
/// Example: "2024-03-15T14:02:26Z" -> "2024-03-15"
pub fn display_date(raw: &str) -> String {
    normalize_date(raw).unwrap_or_else(|| raw.to_string())
}

/// Today's date, used to stamp exported file names
pub fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// File name with a date suffix
/// Example: ("sales_records", "csv") -> "sales_records_2024-03-15.csv"
pub fn dated_file_name(stem: &str, extension: &str) -> String {
    format!("{}_{}.{}", stem, today(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-03-15"), "2024-03-15");
        assert_eq!(display_date("2024-03-15T14:02:26.123Z"), "2024-03-15");
        assert_eq!(display_date("15.03.2024"), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(display_date("invalid"), "invalid");
    }

    #[test]
    fn test_dated_file_name() {
        let name = dated_file_name("returns", "csv");
        assert!(name.starts_with("returns_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "returns_".len() + 10 + ".csv".len());
    }
}
