use crate::domain::common::ReferenceEntry;
use crate::shared::metadata::ReferenceList;
use serde::{Deserialize, Serialize};

/// Customer reference (a104), read-only in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    pub customer_name: String,
}

impl ReferenceEntry for Customer {
    const LIST: ReferenceList = ReferenceList::Customers;

    fn option_value(&self) -> String {
        self.customer_name.clone()
    }
}
