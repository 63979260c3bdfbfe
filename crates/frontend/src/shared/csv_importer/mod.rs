//! CSV template download and bulk upload

pub mod types;
pub mod upload;
pub mod widget;

pub use types::{parse_records, CsvImportError, CsvTemplate};
pub use widget::BulkUploadDialog;
