//! Field metadata for record entities
//!
//! Every entity describes its fields once; the grid columns, the record dialog,
//! the CSV template and the form validation are all driven by that description.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::domain::common::EntityRecord;
//! use contracts::domain::a103_sales_record::aggregate::SalesRecord;
//!
//! for field in SalesRecord::fields() {
//!     println!("{}: {}", field.name, field.ui.label);
//! }
//! ```

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldRole, FieldType, ReferenceList};
pub use types::{
    form_fields, list_fields, EntityMetadataInfo, EntityUiMetadata, FieldMetadata,
    FieldUiMetadata,
};
pub use validation::ValidationRules;
