//! Core metadata types for record entities
//!
//! All types use 'static lifetimes for zero-cost compile-time constants.

use super::field_type::{FieldRole, FieldType, ReferenceList};
use super::validation::ValidationRules;

// ============================================================================
// Entity-level metadata
// ============================================================================

/// Metadata for a record entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMetadataInfo {
    pub entity_name: &'static str,
    pub entity_index: &'static str,
    /// REST path segment (`/{collection_name}`)
    pub collection_name: &'static str,
    pub ui: EntityUiMetadata,
}

/// UI metadata for entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityUiMetadata {
    pub element_name: &'static str,
    pub list_name: &'static str,
    pub icon: Option<&'static str>,
    /// File name of the downloadable CSV template
    pub template_file: &'static str,
}

// ============================================================================
// Field-level metadata
// ============================================================================

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    pub name: &'static str,
    pub field_type: FieldType,
    pub role: FieldRole,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,
    pub ref_list: Option<ReferenceList>,
    pub enum_values: Option<&'static [&'static str]>,
}

impl FieldMetadata {
    /// Business field, visible everywhere, no validation
    pub const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            role: FieldRole::Business,
            ui: FieldUiMetadata::labelled(label),
            validation: ValidationRules::none(),
            ref_list: None,
            enum_values: None,
        }
    }

    /// Surrogate key: listed, never entered
    pub const fn surrogate_id(name: &'static str, label: &'static str) -> Self {
        let mut meta = Self::new(name, label, FieldType::Integer);
        meta.role = FieldRole::Identity;
        meta.ui.visible_in_form = false;
        meta.ui.editable_on_update = false;
        meta
    }

    /// Part of a natural key: entered on create, fixed afterwards
    pub const fn identity(self) -> Self {
        let mut meta = self;
        meta.role = FieldRole::Identity;
        meta.ui.editable_on_update = false;
        meta
    }

    /// Server-computed value: listed, never entered
    pub const fn derived(self) -> Self {
        let mut meta = self;
        meta.role = FieldRole::Derived;
        meta.ui.visible_in_form = false;
        meta.ui.editable_on_update = false;
        meta
    }

    pub const fn rules(self, validation: ValidationRules) -> Self {
        let mut meta = self;
        meta.validation = validation;
        meta
    }

    pub const fn reference(self, list: ReferenceList) -> Self {
        let mut meta = self;
        meta.field_type = FieldType::Reference;
        meta.ref_list = Some(list);
        meta
    }

    pub const fn one_of(self, values: &'static [&'static str]) -> Self {
        let mut meta = self;
        meta.field_type = FieldType::Enum;
        meta.enum_values = Some(values);
        meta.validation = ValidationRules::one_of(values);
        meta
    }

    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        let mut meta = self;
        meta.ui.placeholder = Some(placeholder);
        meta
    }

    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }

    /// Check if field should be visible in list view
    pub fn visible_in_list(&self) -> bool {
        self.ui.visible_in_list
    }

    /// Check if field is entered in the create form (and therefore a CSV column)
    pub fn visible_in_form(&self) -> bool {
        self.ui.visible_in_form
    }

    pub fn editable_on_update(&self) -> bool {
        self.ui.editable_on_update
    }

    pub fn label(&self) -> &'static str {
        self.ui.label
    }
}

/// UI metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub visible_in_list: bool,
    pub visible_in_form: bool,
    pub editable_on_update: bool,
}

impl FieldUiMetadata {
    pub const fn labelled(label: &'static str) -> Self {
        Self {
            label,
            placeholder: None,
            visible_in_list: true,
            visible_in_form: true,
            editable_on_update: true,
        }
    }
}

/// Default values for FieldUiMetadata
impl Default for FieldUiMetadata {
    fn default() -> Self {
        Self::labelled("")
    }
}

/// Fields entered in the create form, in declaration order
pub fn form_fields(fields: &'static [FieldMetadata]) -> Vec<&'static FieldMetadata> {
    fields.iter().filter(|f| f.visible_in_form()).collect()
}

/// Fields shown as grid columns, in declaration order
pub fn list_fields(fields: &'static [FieldMetadata]) -> Vec<&'static FieldMetadata> {
    fields.iter().filter(|f| f.visible_in_list()).collect()
}
