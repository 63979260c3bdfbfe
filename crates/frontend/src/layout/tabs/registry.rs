//! Tab key to screen

use crate::domain::a101_manufacture_order::ui::list::ManufactureOrderList;
use crate::domain::a102_return_order::ui::list::ReturnOrderList;
use crate::domain::a103_sales_record::ui::list::SalesRecordList;
use crate::projections::p910_profitability::ui::list::ProfitabilityList;
use leptos::prelude::*;

pub const MANUFACTURE_ORDERS: &str = "a101_manufacture_order";
pub const RETURN_ORDERS: &str = "a102_return_order";
pub const SALES_RECORDS: &str = "a103_sales_record";
pub const PROFITABILITY: &str = "p910_profitability";

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        MANUFACTURE_ORDERS => view! { <ManufactureOrderList /> }.into_any(),
        RETURN_ORDERS => view! { <ReturnOrderList /> }.into_any(),
        SALES_RECORDS => view! { <SalesRecordList /> }.into_any(),
        PROFITABILITY => view! { <ProfitabilityList /> }.into_any(),
        _ => {
            log::warn!("Unknown tab type: {}", key);
            view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
        }
    }
}
