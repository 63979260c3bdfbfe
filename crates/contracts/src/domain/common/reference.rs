use crate::shared::metadata::ReferenceList;
use serde::de::DeserializeOwned;

/// Item of a reference list used as dropdown option and filter value
pub trait ReferenceEntry: DeserializeOwned + Clone + Send + Sync + 'static {
    const LIST: ReferenceList;

    /// Value written into the referencing record field
    fn option_value(&self) -> String;
}

/// Sorted, de-duplicated option values of a reference list
pub fn option_values<R: ReferenceEntry>(items: &[R]) -> Vec<String> {
    let mut values: Vec<String> = items
        .iter()
        .map(ReferenceEntry::option_value)
        .filter(|v| !v.trim().is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}
