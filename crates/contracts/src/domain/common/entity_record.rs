use super::record_key::RecordKey;
use crate::shared::metadata::{EntityMetadataInfo, FieldMetadata};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A flat record managed by a CRUD screen.
///
/// The record is owned by the server; the console only caches it. The trait
/// ties together the wire shape, the identity, the create/update payloads and
/// the field metadata that drives grid, dialog and CSV template.
pub trait EntityRecord:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Key: RecordKey;
    /// Payload of `POST /{entity}` and of one bulk-ingest record
    type Create: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Partial edit, absent fields mean "no change"
    type Update: Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    fn metadata() -> &'static EntityMetadataInfo;

    fn fields() -> &'static [FieldMetadata];

    /// Example data row of the CSV template, aligned with the form fields
    fn csv_example() -> &'static [&'static str];

    fn key(&self) -> Self::Key;

    /// Display value of a field (grid cell, search, CSV export)
    fn field_value(&self, field: &str) -> Option<String>;

    /// Raw value of the record's business date
    fn record_date(&self) -> &str;

    /// Value matched by the reference filter (e.g. supplier name)
    fn reference_value(&self) -> Option<&str> {
        None
    }

    /// REST path segment
    fn collection() -> &'static str {
        Self::metadata().collection_name
    }
}

/// Format a money/cost amount for display and CSV export
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
