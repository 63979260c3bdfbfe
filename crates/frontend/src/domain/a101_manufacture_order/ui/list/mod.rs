use crate::shared::date_utils::display_date;
use crate::shared::record_api::{fetch_summary, HttpRecordApi};
use crate::shared::record_list::{
    load_reference, refresh_summary, RecordListPage, ReferenceOptions, SummaryCard, SummaryState,
};
use crate::shared::toast::ToastService;
use contracts::domain::a101_manufacture_order::aggregate::{ManufactureOrder, ManufactureStatus};
use contracts::domain::a105_supplier::aggregate::Supplier;
use contracts::domain::a106_product::aggregate::Product;
use contracts::shared::metadata::ReferenceList;
use leptos::prelude::*;

const STATUS_PATH: &str = "manufacture_orders/status/check";

#[component]
fn StatusCard(state: RwSignal<SummaryState<ManufactureStatus>>) -> impl IntoView {
    let body = move || match state.get() {
        SummaryState::Loading => view! { <span class="summary-card__muted">"Loading..."</span> }.into_any(),
        SummaryState::NoData => view! { <span class="summary-card__muted">"No data"</span> }.into_any(),
        SummaryState::Failed(e) => view! { <span class="summary-card__error">{e}</span> }.into_any(),
        SummaryState::Ready(status) => {
            let last_order = status
                .last_order_date
                .as_deref()
                .map(display_date)
                .unwrap_or_else(|| "-".to_string());
            view! {
                <div class="summary-card__item">
                    <span class="summary-card__label">"Orders"</span>
                    <span class="summary-card__value">{status.total_orders}</span>
                </div>
                <div class="summary-card__item">
                    <span class="summary-card__label">"Open"</span>
                    <span class="summary-card__value">{status.open_orders}</span>
                </div>
                <div class="summary-card__item">
                    <span class="summary-card__label">"Units left"</span>
                    <span class="summary-card__value">{status.total_quantity_left}</span>
                </div>
                <div class="summary-card__item">
                    <span class="summary-card__label">"Last order"</span>
                    <span class="summary-card__value">{last_order}</span>
                </div>
            }
            .into_any()
        }
    };

    view! { <SummaryCard title="Production status">{body}</SummaryCard> }
}

/// Manufacture orders screen, filterable by supplier
#[component]
#[allow(non_snake_case)]
pub fn ManufactureOrderList() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let references = RwSignal::new(ReferenceOptions::new());
    load_reference::<Supplier>(references, toasts);
    load_reference::<Product>(references, toasts);

    let status = RwSignal::new(SummaryState::<ManufactureStatus>::Loading);
    let on_reloaded = Callback::new(move |_| {
        refresh_summary(status, || fetch_summary::<ManufactureStatus>(STATUS_PATH));
    });

    let api = HttpRecordApi::<ManufactureOrder>::from_config();

    view! {
        <RecordListPage
            api=api
            references=references
            reference_filter=ReferenceList::Suppliers
            on_reloaded=on_reloaded
        >
            <StatusCard state=status />
        </RecordListPage>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRecord;

    #[test]
    fn test_status_check_lives_under_the_collection() {
        assert_eq!(
            STATUS_PATH,
            format!("{}/status/check", ManufactureOrder::collection())
        );
    }
}
