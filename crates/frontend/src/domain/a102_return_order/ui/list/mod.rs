use crate::shared::record_api::{HttpRecordApi, RecordApi};
use crate::shared::record_list::{
    load_reference, refresh_summary, LatestRecordCard, RecordListPage, ReferenceOptions,
    SummaryState,
};
use crate::shared::toast::ToastService;
use contracts::domain::a102_return_order::aggregate::ReturnOrder;
use contracts::domain::a104_customer::aggregate::Customer;
use leptos::prelude::*;

/// Customer returns screen
#[component]
#[allow(non_snake_case)]
pub fn ReturnOrderList() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let references = RwSignal::new(ReferenceOptions::new());
    load_reference::<Customer>(references, toasts);

    let api = HttpRecordApi::<ReturnOrder>::from_config();
    let latest = RwSignal::new(SummaryState::<ReturnOrder>::Loading);
    let latest_api = api.clone();
    let on_reloaded = Callback::new(move |_| {
        let api = latest_api.clone();
        refresh_summary(latest, move || async move { api.latest().await });
    });

    view! {
        <RecordListPage api=api references=references on_reloaded=on_reloaded>
            <LatestRecordCard state=latest />
        </RecordListPage>
    }
}
