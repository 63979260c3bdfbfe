use crate::domain::common::ReferenceEntry;
use crate::shared::metadata::ReferenceList;
use serde::{Deserialize, Serialize};

/// Supplier reference (a105), read-only in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: Option<i64>,
    pub supplier_name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

impl ReferenceEntry for Supplier {
    const LIST: ReferenceList = ReferenceList::Suppliers;

    fn option_value(&self) -> String {
        self.supplier_name.clone()
    }
}
