use contracts::domain::common::{BatchUpdate, EntityRecord, UpdateEntry};
use contracts::shared::form::{
    payload_from_values, validate_changes, validate_form, FieldErrors, FormValues,
};
use contracts::shared::metadata::{form_fields, FieldMetadata};

/// What a submitted dialog asks the list to do
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSubmit<T: EntityRecord> {
    Create(T::Create),
    Update(BatchUpdate<T::Key, T::Update>),
}

/// One selected record and the edit typed for it
#[derive(Debug, Clone, PartialEq)]
pub struct EditRow<T> {
    pub current: T,
    pub changes: FormValues,
    pub errors: FieldErrors,
}

/// Form model of the record dialog.
///
/// Without records the dialog creates one record; with records it edits each
/// of them, the i-th form belonging to the i-th record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDialogState<T: EntityRecord> {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub rows: Vec<EditRow<T>>,
    /// Message not tied to a field
    pub form_error: Option<String>,
}

impl<T: EntityRecord> RecordDialogState<T> {
    pub fn create() -> Self {
        Self {
            values: FormValues::new(),
            errors: FieldErrors::new(),
            rows: Vec::new(),
            form_error: None,
        }
    }

    pub fn update(records: Vec<T>) -> Self {
        Self {
            rows: records
                .into_iter()
                .map(|current| EditRow {
                    current,
                    changes: FormValues::new(),
                    errors: FieldErrors::new(),
                })
                .collect(),
            ..Self::create()
        }
    }

    pub fn is_update(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Fields entered on create
    pub fn create_fields() -> Vec<&'static FieldMetadata> {
        form_fields(T::fields())
    }

    /// Fields offered for editing existing records
    pub fn update_fields() -> Vec<&'static FieldMetadata> {
        form_fields(T::fields())
            .into_iter()
            .filter(|f| f.editable_on_update())
            .collect()
    }

    pub fn set_value(&mut self, field: &str, value: String) {
        self.errors.remove(field);
        self.form_error = None;
        self.values.insert(field.to_string(), value);
    }

    pub fn set_change(&mut self, row: usize, field: &str, value: String) {
        self.form_error = None;
        if let Some(edit) = self.rows.get_mut(row) {
            edit.errors.remove(field);
            edit.changes.insert(field.to_string(), value);
        }
    }

    /// Validate and build the request.
    ///
    /// On failure the errors are stored and `None` is returned; nothing may
    /// be sent then.
    pub fn submit(&mut self) -> Option<DialogSubmit<T>> {
        if self.is_update() {
            self.submit_update()
        } else {
            self.submit_create()
        }
    }

    fn submit_create(&mut self) -> Option<DialogSubmit<T>> {
        let fields = Self::create_fields();
        self.errors = validate_form(&fields, &self.values);
        if !self.errors.is_empty() {
            return None;
        }
        match payload_from_values::<T::Create>(&fields, &self.values, false) {
            Ok(payload) => Some(DialogSubmit::Create(payload)),
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    fn submit_update(&mut self) -> Option<DialogSubmit<T>> {
        let fields = Self::update_fields();
        let has_changes = self
            .rows
            .iter()
            .any(|r| r.changes.values().any(|v| !v.trim().is_empty()));
        if !has_changes {
            self.form_error = Some("Enter at least one new value".to_string());
            return None;
        }

        let mut entries = Vec::with_capacity(self.rows.len());
        let mut valid = true;
        for row in &mut self.rows {
            row.errors = validate_changes(&fields, &row.changes);
            if !row.errors.is_empty() {
                valid = false;
                continue;
            }
            match payload_from_values::<T::Update>(&fields, &row.changes, true) {
                Ok(changes) => entries.push(UpdateEntry {
                    key: row.current.key(),
                    changes,
                }),
                Err(errors) => {
                    row.errors = errors;
                    valid = false;
                }
            }
        }

        if valid {
            Some(DialogSubmit::Update(BatchUpdate::new(entries)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a101_manufacture_order::aggregate::{
        ManufactureOrder, ManufactureOrderCreate, ManufactureOrderUpdate,
    };
    use contracts::domain::a102_return_order::aggregate::{ReturnOrder, ReturnOrderKey};

    fn order(id: i64, quantity: i64) -> ManufactureOrder {
        ManufactureOrder {
            id,
            supplier_name: "Supplier A".to_string(),
            product: "Product A".to_string(),
            sku: format!("SKU{:03}", id),
            quantity,
            unit_cost: 1.0,
            currency: "USD".to_string(),
            order_date: "2024-03-01".to_string(),
            total_cost: quantity as f64,
            quantity_left: quantity,
        }
    }

    fn fill_create(state: &mut RecordDialogState<ManufactureOrder>) {
        for (field, value) in [
            ("supplier_name", "Supplier A"),
            ("product", "Product A"),
            ("sku", "SKU001"),
            ("quantity", "100"),
            ("unit_cost", "12.50"),
            ("currency", "USD"),
            ("order_date", "2024/03/20"),
        ] {
            state.set_value(field, value.to_string());
        }
    }

    #[test]
    fn test_create_builds_typed_payload() {
        let mut state = RecordDialogState::<ManufactureOrder>::create();
        fill_create(&mut state);
        assert_eq!(
            state.submit(),
            Some(DialogSubmit::Create(ManufactureOrderCreate {
                supplier_name: "Supplier A".to_string(),
                product: "Product A".to_string(),
                sku: "SKU001".to_string(),
                quantity: 100,
                unit_cost: 12.5,
                currency: "USD".to_string(),
                order_date: "2024-03-20".to_string(),
            }))
        );
    }

    #[test]
    fn test_invalid_create_is_not_submitted() {
        let mut state = RecordDialogState::<ManufactureOrder>::create();
        fill_create(&mut state);
        state.set_value("quantity", "-5".to_string());
        state.set_value("currency", "XYZ".to_string());
        assert_eq!(state.submit(), None);
        assert!(state.errors.contains_key("quantity"));
        assert!(state.errors.contains_key("currency"));

        state.set_value("quantity", "5".to_string());
        assert!(!state.errors.contains_key("quantity"));
    }

    #[test]
    fn test_update_pairs_each_record_with_its_form() {
        let mut state = RecordDialogState::update(vec![order(3, 10), order(1, 20), order(2, 30)]);
        state.set_change(0, "quantity", "11".to_string());
        state.set_change(2, "order_date", "31.03.2024".to_string());

        let Some(DialogSubmit::Update(batch)) = state.submit() else {
            panic!("expected an update");
        };
        let wire = batch.into_wire();
        assert_eq!(wire.selected_records, vec![3, 1, 2]);
        assert_eq!(
            wire.update_data,
            vec![
                ManufactureOrderUpdate {
                    quantity: Some(11),
                    ..Default::default()
                },
                ManufactureOrderUpdate::default(),
                ManufactureOrderUpdate {
                    order_date: Some("2024-03-31".to_string()),
                    ..Default::default()
                },
            ]
        );
    }

    #[test]
    fn test_update_without_changes_is_blocked() {
        let mut state = RecordDialogState::update(vec![order(1, 10)]);
        state.set_change(0, "quantity", "  ".to_string());
        assert_eq!(state.submit(), None);
        assert!(state.form_error.is_some());
    }

    #[test]
    fn test_invalid_row_blocks_whole_batch() {
        let mut state = RecordDialogState::update(vec![order(1, 10), order(2, 10)]);
        state.set_change(0, "quantity", "12".to_string());
        state.set_change(1, "unit_cost", "abc".to_string());
        assert_eq!(state.submit(), None);
        assert!(state.rows[0].errors.is_empty());
        assert!(state.rows[1].errors.contains_key("unit_cost"));
    }

    #[test]
    fn test_identity_fields_are_not_editable() {
        let names: Vec<&str> = RecordDialogState::<ReturnOrder>::update_fields()
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["return_quantity", "customer_name", "reason"]);

        let record = ReturnOrder {
            return_order_id: "RO1".to_string(),
            sku: "SKU001".to_string(),
            return_date: "2024-03-20".to_string(),
            return_quantity: 1,
            customer_name: "Customer A".to_string(),
            reason: String::new(),
        };
        let mut state = RecordDialogState::update(vec![record]);
        state.set_change(0, "reason", "Damaged".to_string());
        let Some(DialogSubmit::Update(batch)) = state.submit() else {
            panic!("expected an update");
        };
        assert_eq!(
            batch.entries[0].key,
            ReturnOrderKey {
                return_order_id: "RO1".to_string(),
                sku: "SKU001".to_string(),
                return_date: "2024-03-20".to_string(),
            }
        );
    }
}
