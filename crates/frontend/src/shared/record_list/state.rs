use crate::shared::list_utils::{sort_records, RecordFilter};
use contracts::domain::common::EntityRecord;
use leptos::prelude::*;
use std::collections::HashSet;

/// Local cache of one entity's collection plus the grid's view state
#[derive(Clone, Debug)]
pub struct RecordListState<T: EntityRecord> {
    pub records: Vec<T>,
    pub selected: HashSet<T::Key>,
    pub filter: RecordFilter,
    /// Empty = server order
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T: EntityRecord> Default for RecordListState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            selected: HashSet::new(),
            filter: RecordFilter::default(),
            sort_field: String::new(),
            sort_ascending: true,
            is_loaded: false,
            is_loading: false,
            error: None,
        }
    }
}

impl<T: EntityRecord> RecordListState<T> {
    /// Replace the cache with a fresh server list.
    ///
    /// Keys that no longer exist drop out of the selection.
    pub fn set_records(&mut self, records: Vec<T>) {
        let present: HashSet<T::Key> = records.iter().map(EntityRecord::key).collect();
        self.selected.retain(|k| present.contains(k));
        self.records = records;
        self.is_loaded = true;
        self.is_loading = false;
        self.error = None;
    }

    /// Filtered then sorted view of the cache
    pub fn visible(&self) -> Vec<T> {
        let mut rows = self.filter.apply(&self.records);
        if !self.sort_field.is_empty() {
            sort_records(&mut rows, &self.sort_field, self.sort_ascending);
        }
        rows
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
    }

    pub fn toggle(&mut self, key: T::Key, checked: bool) {
        if checked {
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
    }

    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.selected.contains(key)
    }

    /// Header checkbox: select every visible row, or clear when all are selected
    pub fn toggle_all_visible(&mut self) {
        let visible: Vec<T::Key> = self.visible().iter().map(EntityRecord::key).collect();
        if !visible.is_empty() && visible.iter().all(|k| self.selected.contains(k)) {
            for key in &visible {
                self.selected.remove(key);
            }
        } else {
            self.selected.extend(visible);
        }
    }

    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|r| self.selected.contains(&r.key()))
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected records in collection order
    pub fn selected_records(&self) -> Vec<T> {
        self.records
            .iter()
            .filter(|r| self.selected.contains(&r.key()))
            .cloned()
            .collect()
    }

    pub fn selected_keys(&self) -> Vec<T::Key> {
        self.records
            .iter()
            .map(EntityRecord::key)
            .filter(|k| self.selected.contains(k))
            .collect()
    }
}

pub fn create_state<T: EntityRecord>() -> RwSignal<RecordListState<T>> {
    RwSignal::new(RecordListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a103_sales_record::aggregate::{SalesRecord, SalesRecordKey};

    fn sale(id: &str, sku: &str, date: &str, quantity: i64) -> SalesRecord {
        SalesRecord {
            sales_record_id: id.to_string(),
            sales_date: date.to_string(),
            sku: sku.to_string(),
            quantity_sold: quantity,
            customer_name: "Customer A".to_string(),
        }
    }

    fn key(id: &str, sku: &str) -> SalesRecordKey {
        SalesRecordKey {
            sales_record_id: id.to_string(),
            sku: sku.to_string(),
        }
    }

    fn loaded() -> RecordListState<SalesRecord> {
        let mut state = RecordListState::default();
        state.set_records(vec![
            sale("SR1", "SKU001", "2024-03-01", 5),
            sale("SR1", "SKU002", "2024-03-01", 1),
            sale("SR2", "SKU001", "2024-03-05", 9),
        ]);
        state
    }

    #[test]
    fn test_selected_records_match_by_full_key() {
        let mut state = loaded();
        state.toggle(key("SR1", "SKU002"), true);
        let selected = state.selected_records();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].sku, "SKU002");
        assert_eq!(selected[0].quantity_sold, 1);
    }

    #[test]
    fn test_reload_drops_vanished_keys() {
        let mut state = loaded();
        state.toggle(key("SR1", "SKU001"), true);
        state.toggle(key("SR2", "SKU001"), true);
        state.set_records(vec![sale("SR2", "SKU001", "2024-03-05", 9)]);
        assert_eq!(state.selected_keys(), vec![key("SR2", "SKU001")]);
    }

    #[test]
    fn test_toggle_all_applies_to_visible_rows() {
        let mut state = loaded();
        state.filter.search_text = "sr1".to_string();
        state.toggle_all_visible();
        assert_eq!(state.selected.len(), 2);
        assert!(state.all_visible_selected());

        state.toggle_all_visible();
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_visible_sorts_after_filtering() {
        let mut state = loaded();
        state.filter.date_from = "2024-03-01".to_string();
        state.toggle_sort("quantity_sold");
        state.toggle_sort("quantity_sold");
        let quantities: Vec<i64> = state.visible().iter().map(|r| r.quantity_sold).collect();
        assert_eq!(quantities, vec![9, 5, 1]);
    }
}
