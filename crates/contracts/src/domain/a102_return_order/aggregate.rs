use crate::domain::common::{EntityRecord, RecordKey};
use crate::shared::metadata::{
    EntityMetadataInfo, EntityUiMetadata, FieldMetadata, FieldType, ReferenceList,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Natural key of a return line
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReturnOrderKey {
    pub return_order_id: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    pub return_date: String,
}

impl RecordKey for ReturnOrderKey {
    fn as_string(&self) -> String {
        format!("{}/{}/{}", self.return_order_id, self.sku, self.return_date)
    }
}

/// Customer return of a product (a102)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnOrder {
    pub return_order_id: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    /// Return date (YYYY-MM-DD)
    pub return_date: String,
    pub return_quantity: i64,
    pub customer_name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnOrderCreate {
    pub return_order_id: String,
    #[serde(rename = "SKU", alias = "sku")]
    pub sku: String,
    pub return_date: String,
    pub return_quantity: i64,
    pub customer_name: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnOrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

static METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_name: "return_order",
    entity_index: "a102",
    collection_name: "returns",
    ui: EntityUiMetadata {
        element_name: "Return",
        list_name: "Returns",
        icon: Some("package-x"),
        template_file: "returns_template.csv",
    },
};

static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("return_order_id", "Return order", FieldType::Text)
        .rules(ValidationRules::required())
        .identity()
        .placeholder("RO123"),
    FieldMetadata::new("SKU", "SKU", FieldType::Text)
        .rules(ValidationRules::required())
        .identity()
        .placeholder("SKU001"),
    FieldMetadata::new("return_date", "Return date", FieldType::Date)
        .rules(ValidationRules::required())
        .identity(),
    FieldMetadata::new("return_quantity", "Quantity", FieldType::Integer)
        .rules(ValidationRules::required_positive()),
    FieldMetadata::new("customer_name", "Customer", FieldType::Text)
        .reference(ReferenceList::Customers)
        .rules(ValidationRules::required()),
    FieldMetadata::new("reason", "Reason", FieldType::Text),
];

static CSV_EXAMPLE: &[&str] = &[
    "RO123",
    "SKU001",
    "2024-03-20",
    "2",
    "Customer A",
    "Damaged in transit",
];

impl EntityRecord for ReturnOrder {
    type Key = ReturnOrderKey;
    type Create = ReturnOrderCreate;
    type Update = ReturnOrderUpdate;

    fn metadata() -> &'static EntityMetadataInfo {
        &METADATA
    }

    fn fields() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn csv_example() -> &'static [&'static str] {
        CSV_EXAMPLE
    }

    fn key(&self) -> ReturnOrderKey {
        ReturnOrderKey {
            return_order_id: self.return_order_id.clone(),
            sku: self.sku.clone(),
            return_date: self.return_date.clone(),
        }
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "return_order_id" => Some(self.return_order_id.clone()),
            "SKU" => Some(self.sku.clone()),
            "return_date" => Some(self.return_date.clone()),
            "return_quantity" => Some(self.return_quantity.to_string()),
            "customer_name" => Some(self.customer_name.clone()),
            "reason" => Some(self.reason.clone()),
            _ => None,
        }
    }

    fn record_date(&self) -> &str {
        &self.return_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_serializes_with_upper_sku() {
        let key = ReturnOrderKey {
            return_order_id: "RO1".into(),
            sku: "SKU9".into(),
            return_date: "2024-03-01".into(),
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            serde_json::json!({"return_order_id": "RO1", "SKU": "SKU9", "return_date": "2024-03-01"})
        );
        assert_eq!(key.as_string(), "RO1/SKU9/2024-03-01");
    }

    #[test]
    fn test_identity_fields_are_locked_on_update() {
        let editable: Vec<&str> = ReturnOrder::fields()
            .iter()
            .filter(|f| f.editable_on_update())
            .map(|f| f.name)
            .collect();
        assert_eq!(editable, vec!["return_quantity", "customer_name", "reason"]);
    }
}
