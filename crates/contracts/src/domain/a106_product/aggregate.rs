use crate::domain::common::ReferenceEntry;
use crate::shared::metadata::ReferenceList;
use serde::{Deserialize, Serialize};

/// Product reference (a106), read-only in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub sku: Option<String>,
    pub product_name: String,
}

impl ReferenceEntry for Product {
    const LIST: ReferenceList = ReferenceList::Products;

    fn option_value(&self) -> String {
        self.product_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::option_values;

    #[test]
    fn test_option_values_sorted_unique() {
        let items: Vec<Product> = serde_json::from_value(serde_json::json!([
            {"product_name": "Widget"},
            {"product_name": "Bolt", "sku": "B-1"},
            {"product_name": "Widget"},
            {"product_name": " "}
        ]))
        .unwrap();
        assert_eq!(option_values(&items), vec!["Bolt".to_string(), "Widget".to_string()]);
    }
}
