//! Common types and traits for all record entities

pub mod batch;
pub mod entity_record;
pub mod record_key;

// Re-exports
pub use batch::{
    ApiErrorBody, BatchUpdate, BulkIngestRequest, BulkIngestResponse, DeleteRequest,
    DeleteResponse, DeletedCount, FailedRecord, UpdateEntry, UpdateRequest, UpdateResponse,
};
pub use entity_record::{format_amount, EntityRecord};
pub use record_key::RecordKey;
pub mod reference;
pub use reference::{option_values, ReferenceEntry};
