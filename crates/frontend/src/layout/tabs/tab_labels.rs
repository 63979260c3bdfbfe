//! Tab titles
//!
//! Record screens take their `list_name` from the contracts metadata.

use super::registry::{MANUFACTURE_ORDERS, PROFITABILITY, RETURN_ORDERS, SALES_RECORDS};
use contracts::domain::a101_manufacture_order::aggregate::ManufactureOrder;
use contracts::domain::a102_return_order::aggregate::ReturnOrder;
use contracts::domain::a103_sales_record::aggregate::SalesRecord;
use contracts::domain::common::EntityRecord;

/// Title of the tab with this key, empty for unknown keys
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        MANUFACTURE_ORDERS => ManufactureOrder::metadata().ui.list_name,
        RETURN_ORDERS => ReturnOrder::metadata().ui.list_name,
        SALES_RECORDS => SalesRecord::metadata().ui.list_name,
        PROFITABILITY => "Profitability",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_come_from_metadata() {
        assert_eq!(tab_label_for_key(MANUFACTURE_ORDERS), "Manufacture orders");
        assert_eq!(tab_label_for_key(PROFITABILITY), "Profitability");
        assert_eq!(tab_label_for_key("a999_unknown"), "");
    }
}
