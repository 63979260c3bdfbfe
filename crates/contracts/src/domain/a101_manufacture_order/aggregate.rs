use crate::domain::common::{format_amount, EntityRecord};
use crate::shared::metadata::{
    EntityMetadataInfo, EntityUiMetadata, FieldMetadata, FieldType, ReferenceList,
    ValidationRules,
};
use serde::{Deserialize, Serialize};

/// Currencies accepted by the order form
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CNY", "RUB"];

/// Production order placed with a supplier (a101).
///
/// `total_cost` and `quantity_left` are computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufactureOrder {
    pub id: i64,
    pub supplier_name: String,
    pub product: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub currency: String,
    /// Order date (YYYY-MM-DD)
    pub order_date: String,
    #[serde(default)]
    pub total_cost: f64,
    /// Units not yet sold
    #[serde(default)]
    pub quantity_left: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufactureOrderCreate {
    pub supplier_name: String,
    pub product: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub currency: String,
    pub order_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufactureOrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
}

/// Summary of `GET /manufacture_orders/status/check`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufactureStatus {
    #[serde(default)]
    pub total_orders: usize,
    /// Orders with units still in stock
    #[serde(default)]
    pub open_orders: usize,
    #[serde(default)]
    pub total_quantity_left: i64,
    #[serde(default)]
    pub last_order_date: Option<String>,
}

static METADATA: EntityMetadataInfo = EntityMetadataInfo {
    entity_name: "manufacture_order",
    entity_index: "a101",
    collection_name: "manufacture_orders",
    ui: EntityUiMetadata {
        element_name: "Manufacture order",
        list_name: "Manufacture orders",
        icon: Some("package"),
        template_file: "manufacture_orders_template.csv",
    },
};

static FIELDS: &[FieldMetadata] = &[
    FieldMetadata::surrogate_id("id", "ID"),
    FieldMetadata::new("supplier_name", "Supplier", FieldType::Text)
        .reference(ReferenceList::Suppliers)
        .rules(ValidationRules::required()),
    FieldMetadata::new("product", "Product", FieldType::Text)
        .reference(ReferenceList::Products)
        .rules(ValidationRules::required()),
    FieldMetadata::new("sku", "SKU", FieldType::Text)
        .rules(ValidationRules::required())
        .placeholder("SKU001"),
    FieldMetadata::new("quantity", "Quantity", FieldType::Integer)
        .rules(ValidationRules::required_positive()),
    FieldMetadata::new("unit_cost", "Unit cost", FieldType::Decimal)
        .rules(ValidationRules::required_positive()),
    FieldMetadata::new("currency", "Currency", FieldType::Text).one_of(CURRENCIES),
    FieldMetadata::new("order_date", "Order date", FieldType::Date)
        .rules(ValidationRules::required()),
    FieldMetadata::new("total_cost", "Total cost", FieldType::Decimal).derived(),
    FieldMetadata::new("quantity_left", "Qty left", FieldType::Integer).derived(),
];

static CSV_EXAMPLE: &[&str] = &[
    "Supplier A",
    "Product A",
    "SKU001",
    "100",
    "12.50",
    "USD",
    "2024-03-20",
];

impl EntityRecord for ManufactureOrder {
    type Key = i64;
    type Create = ManufactureOrderCreate;
    type Update = ManufactureOrderUpdate;

    fn metadata() -> &'static EntityMetadataInfo {
        &METADATA
    }

    fn fields() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn csv_example() -> &'static [&'static str] {
        CSV_EXAMPLE
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "supplier_name" => Some(self.supplier_name.clone()),
            "product" => Some(self.product.clone()),
            "sku" => Some(self.sku.clone()),
            "quantity" => Some(self.quantity.to_string()),
            "unit_cost" => Some(format_amount(self.unit_cost)),
            "currency" => Some(self.currency.clone()),
            "order_date" => Some(self.order_date.clone()),
            "total_cost" => Some(format_amount(self.total_cost)),
            "quantity_left" => Some(self.quantity_left.to_string()),
            _ => None,
        }
    }

    fn record_date(&self) -> &str {
        &self.order_date
    }

    fn reference_value(&self) -> Option<&str> {
        Some(&self.supplier_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::form_fields;

    #[test]
    fn test_form_fields_match_csv_example() {
        let fields = form_fields(ManufactureOrder::fields());
        assert_eq!(fields.len(), ManufactureOrder::csv_example().len());
        assert!(fields.iter().all(|f| f.name != "total_cost" && f.name != "id"));
    }

    #[test]
    fn test_deserialize_without_derived_fields() {
        let order: ManufactureOrder = serde_json::from_value(serde_json::json!({
            "id": 5,
            "supplier_name": "Supplier A",
            "product": "Widget",
            "sku": "W-1",
            "quantity": 10,
            "unit_cost": 2.5,
            "currency": "EUR",
            "order_date": "2024-01-15"
        }))
        .unwrap();
        assert_eq!(order.key(), 5);
        assert_eq!(order.total_cost, 0.0);
        assert_eq!(order.field_value("unit_cost").as_deref(), Some("2.50"));
        assert_eq!(order.reference_value(), Some("Supplier A"));
    }

    #[test]
    fn test_update_skips_unchanged_fields() {
        let update = ManufactureOrderUpdate {
            quantity: Some(4),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"quantity": 4})
        );
    }
}
