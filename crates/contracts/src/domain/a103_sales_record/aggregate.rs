use crate::domain::common::{EntityRecord, RecordKey};
use crate::shared::metadata::{
    EntityMetadataInfo, EntityUiMetadata, FieldMetadata, FieldType, ReferenceList,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Natural key of a sales line
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SalesRecordKey {
    pub sales_record_id: String,
    pub sku: String,
}

impl RecordKey for SalesRecordKey {
    fn as_string(&self) -> String {
        format!("{}/{}", self.sales_record_id, self.sku)
    }
}

/// Sold quantity of one SKU within a sales document (a103)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sales_record_id: String,
    /// Sales date (YYYY-MM-DD)
    pub sales_date: String,
    pub sku: String,
    pub quantity_sold: i64,
    pub customer_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecordCreate {
    pub sales_record_id: String,
    pub sales_date: String,
    pub sku: String,
    pub quantity_sold: i64,
    pub customer_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecordUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_sold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

static METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_name: "sales_record",
    entity_index: "a103",
    collection_name: "sales_records",
    ui: EntityUiMetadata {
        element_name: "Sales record",
        list_name: "Sales records",
        icon: Some("cash"),
        template_file: "sales_records_template.csv",
    },
};

static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::new("sales_record_id", "Sales record", FieldType::Text)
        .rules(ValidationRules::required())
        .identity()
        .placeholder("SR123"),
    FieldMetadata::new("sales_date", "Sales date", FieldType::Date)
        .rules(ValidationRules::required()),
    FieldMetadata::new("sku", "SKU", FieldType::Text)
        .rules(ValidationRules::required())
        .identity()
        .placeholder("SKU001"),
    FieldMetadata::new("quantity_sold", "Quantity sold", FieldType::Integer)
        .rules(ValidationRules::required_positive()),
    FieldMetadata::new("customer_name", "Customer", FieldType::Text)
        .reference(ReferenceList::Customers)
        .rules(ValidationRules::required()),
];

static CSV_EXAMPLE: &[&str] = &["SR123", "2024-03-20", "SKU001", "10", "Customer A"];

impl EntityRecord for SalesRecord {
    type Key = SalesRecordKey;
    type Create = SalesRecordCreate;
    type Update = SalesRecordUpdate;

    fn metadata() -> &'static EntityMetadataInfo {
        &METADATA
    }

    fn fields() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn csv_example() -> &'static [&'static str] {
        CSV_EXAMPLE
    }

    fn key(&self) -> SalesRecordKey {
        SalesRecordKey {
            sales_record_id: self.sales_record_id.clone(),
            sku: self.sku.clone(),
        }
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "sales_record_id" => Some(self.sales_record_id.clone()),
            "sales_date" => Some(self.sales_date.clone()),
            "sku" => Some(self.sku.clone()),
            "quantity_sold" => Some(self.quantity_sold.to_string()),
            "customer_name" => Some(self.customer_name.clone()),
            _ => None,
        }
    }

    fn record_date(&self) -> &str {
        &self.sales_date
    }
}
