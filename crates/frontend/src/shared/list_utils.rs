/// Shared list helpers: filtering, sorting, search input, match highlighting
use contracts::domain::common::EntityRecord;
use contracts::shared::date::date_in_range;
use contracts::shared::metadata::{list_fields, FieldType};
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

/// Filter inputs of a record grid.
///
/// All set criteria must hold (logical AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Case-insensitive substring over the displayed fields
    pub search_text: String,
    /// Inclusive lower bound, `YYYY-MM-DD`, empty = open
    pub date_from: String,
    /// Inclusive upper bound, `YYYY-MM-DD`, empty = open
    pub date_to: String,
    /// Exact match on the record's reference value (e.g. supplier)
    pub reference: Option<String>,
}

impl RecordFilter {
    pub fn matches<T: EntityRecord>(&self, record: &T) -> bool {
        self.matches_text(record) && self.matches_reference(record) && self.matches_dates(record)
    }

    fn matches_text<T: EntityRecord>(&self, record: &T) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        list_fields(T::fields()).iter().any(|f| {
            record
                .field_value(f.name)
                .map(|v| v.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }

    fn matches_reference<T: EntityRecord>(&self, record: &T) -> bool {
        match self.reference.as_deref().filter(|r| !r.is_empty()) {
            None => true,
            Some(wanted) => record.reference_value() == Some(wanted),
        }
    }

    fn matches_dates<T: EntityRecord>(&self, record: &T) -> bool {
        date_in_range(record.record_date(), &self.date_from, &self.date_to)
    }

    /// Number of active criteria (filter panel badge)
    pub fn active_count(&self) -> usize {
        [
            !self.search_text.trim().is_empty(),
            !self.date_from.is_empty(),
            !self.date_to.is_empty(),
            self.reference.as_deref().is_some_and(|r| !r.is_empty()),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Records passing the filter, original order preserved
    pub fn apply<T: EntityRecord>(&self, records: &[T]) -> Vec<T> {
        records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect()
    }
}

/// Compare two records by a field, numerically for numeric fields
pub fn compare_by_field<T: EntityRecord>(a: &T, b: &T, field: &str) -> Ordering {
    let numeric = T::fields()
        .iter()
        .find(|f| f.name == field)
        .map(|f| f.field_type.is_numeric())
        .unwrap_or(false);
    let va = a.field_value(field).unwrap_or_default();
    let vb = b.field_value(field).unwrap_or_default();
    if numeric {
        let na = va.parse::<f64>().unwrap_or(0.0);
        let nb = vb.parse::<f64>().unwrap_or(0.0);
        na.partial_cmp(&nb).unwrap_or(Ordering::Equal)
    } else if T::fields()
        .iter()
        .any(|f| f.name == field && f.field_type == FieldType::Date)
    {
        va.cmp(&vb)
    } else {
        va.to_lowercase().cmp(&vb.to_lowercase())
    }
}

/// Sorts a list by the given field
pub fn sort_records<T: EntityRecord>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = compare_by_field(a, b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Byte ranges of `text` matching `filter` case-insensitively.
///
/// Matching runs on the lowercased text; each range is mapped back to the
/// original characters, so the ranges always fall on char boundaries.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let filter_lower = filter.trim().to_lowercase();
    if filter_lower.is_empty() {
        return Vec::new();
    }

    // Lowercased text plus, per source char, (offset in lowercased text, offset in text)
    let mut text_lower = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (pos, ch) in text.char_indices() {
        offsets.push((text_lower.len(), pos));
        text_lower.extend(ch.to_lowercase());
    }
    offsets.push((text_lower.len(), text.len()));

    let original_offset = |lower: usize| {
        offsets
            .binary_search_by_key(&lower, |&(l, _)| l)
            .ok()
            .map(|i| offsets[i].1)
    };

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(found) = text_lower[from..].find(&filter_lower) {
        let lower_start = from + found;
        let lower_end = lower_start + filter_lower.len();
        // A match starting or ending inside one char's lowercase expansion is skipped
        if let (Some(start), Some(end)) = (original_offset(lower_start), original_offset(lower_end)) {
            ranges.push((start, end));
            from = lower_end;
        } else {
            from = lower_start
                + text_lower[lower_start..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
        }
        if from >= text_lower.len() {
            break;
        }
    }
    ranges
}

/// Highlight matches in text (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(
            view! { <span class="search-highlight">{text[start..end].to_string()}</span> }
                .into_any(),
        );
        last_pos = end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search input with debounce and clear button
#[component]
pub fn SearchInput(
    /// Current filter value (for the "active" style)
    #[prop(into)]
    value: Signal<String>,
    /// Called with the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Local input state (before debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(w) = web_sys::window() {
                w.clear_timeout_with_handle(timeout_id);
            }
        }

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure = wasm_bindgen::closure::Closure::once(move || on_change.run(new_value));

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                debounce_timeout.set_value(Some(timeout_id));
            }
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a101_manufacture_order::aggregate::ManufactureOrder;

    fn order(id: i64, supplier: &str, sku: &str, date: &str, quantity: i64) -> ManufactureOrder {
        ManufactureOrder {
            id,
            supplier_name: supplier.to_string(),
            product: "Widget".to_string(),
            sku: sku.to_string(),
            quantity,
            unit_cost: 2.0,
            currency: "USD".to_string(),
            order_date: date.to_string(),
            total_cost: 2.0 * quantity as f64,
            quantity_left: quantity,
        }
    }

    fn sample() -> Vec<ManufactureOrder> {
        vec![
            order(1, "Acme", "SKU-A", "2024-01-01", 10),
            order(2, "Acme", "SKU-B", "2024-01-15T09:30:00Z", 5),
            order(3, "Globex", "sku-c", "2024-01-31", 20),
            order(4, "Globex", "SKU-D", "2024-02-01", 1),
        ]
    }

    fn ids(records: &[ManufactureOrder]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let filter = RecordFilter {
            search_text: "SKU-C".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![3]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = RecordFilter {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-31".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![1, 2, 3]);
    }

    #[test]
    fn test_criteria_are_combined() {
        let filter = RecordFilter {
            search_text: "sku".to_string(),
            date_from: "2024-01-10".to_string(),
            reference: Some("Globex".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&sample())), vec![3, 4]);
        assert_eq!(filter.active_count(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = RecordFilter {
            search_text: "acme".to_string(),
            date_to: "2024-01-20".to_string(),
            ..Default::default()
        };
        let once = filter.apply(&sample());
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = RecordFilter::default();
        assert_eq!(filter.apply(&sample()), sample());
        assert_eq!(filter.active_count(), 0);
    }

    #[test]
    fn test_sort_numeric_fields_numerically() {
        let mut records = sample();
        sort_records(&mut records, "quantity", true);
        assert_eq!(ids(&records), vec![4, 2, 1, 3]);
        sort_records(&mut records, "sku", false);
        assert_eq!(ids(&records), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_match_ranges_are_case_insensitive() {
        assert_eq!(match_ranges("SKU-a sku-b", "sku"), vec![(0, 3), (6, 9)]);
        assert_eq!(match_ranges("Acme", "  "), Vec::new());
        assert_eq!(match_ranges("Acme", "globex"), Vec::new());
    }

    #[test]
    fn test_match_ranges_follow_char_boundaries() {
        // İ lowercases to two chars (longer), the Kelvin sign to a plain `k` (shorter)
        let text = "\u{130}\u{130}\u{212A}";
        let ranges = match_ranges(text, "k");
        assert_eq!(ranges, vec![(4, 7)]);
        for (start, end) in ranges {
            assert_eq!(&text[start..end], "\u{212A}");
        }

        // A match starting inside the expansion of İ is not highlighted
        let text = "Straße \u{130}stanbul";
        assert_eq!(match_ranges(text, "stanbul"), Vec::new());
        assert_eq!(match_ranges(text, "\u{130}stanbul"), vec![(8, 17)]);
    }
}
