mod state;

use crate::shared::api_utils::{api_base, get_json, join_url};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::toast::ToastService;
use contracts::domain::common::format_amount;
use contracts::projections::p910_profitability::dto::ProfitabilityRow;
use leptos::prelude::*;
use state::{create_state, persist_state};
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Products ranked by profit, computed by the server
#[component]
#[allow(non_snake_case)]
pub fn ProfitabilityList() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");
    let state = create_state();

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let search_text = Memo::new(move |_| state.with(|s| s.q.clone()));

    let load = move || {
        state.update(|s| s.is_loading = true);
        spawn_local(async move {
            let url = join_url(&api_base(), "profitability");
            match get_json::<Vec<ProfitabilityRow>>(&url).await {
                Ok(rows) => {
                    log::info!("Loaded {} profitability rows", rows.len());
                    state.update(|s| {
                        s.rows = rows;
                        s.is_loading = false;
                        s.is_loaded = true;
                        s.error = None;
                    });
                }
                Err(e) => {
                    state.update(|s| {
                        s.is_loading = false;
                        s.error = Some(e.to_string());
                    });
                    toasts.error(format!("Failed to load profitability: {}", e));
                }
            }
        });
    };

    load();

    let on_search = Callback::new(move |q: String| {
        state.update(|s| s.q = q);
        persist_state(state);
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("bar-chart")}
                    <h2>"Profitability"</h2>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || state.with(|s| s.is_loading))
                    >
                        {icon("refresh")}
                        {move || if state.with(|s| s.is_loading) { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <SearchInput
                    value=Signal::derive(move || search_text.get())
                    on_change=on_search
                    placeholder="Search by SKU or product..."
                />
                <span class="filter-panel__count">
                    {move || format!("{} of {}", visible.with(|v| v.len()), state.with(|s| s.rows.len()))}
                </span>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table-container">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Rank"</th>
                            <th class="table__header-cell">"SKU"</th>
                            <th class="table__header-cell">"Product"</th>
                            <th class="table__header-cell table__header-cell--right">"Units sold"</th>
                            <th class="table__header-cell table__header-cell--right">"Revenue"</th>
                            <th class="table__header-cell table__header-cell--right">"Cost"</th>
                            <th class="table__header-cell table__header-cell--right">"Profit"</th>
                            <th class="table__header-cell table__header-cell--right">"Margin, %"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let filter = search_text.get();
                            visible.get().into_iter().map(|row| {
                                let profit_class = if row.profit < 0.0 {
                                    "table__cell table__cell--right table__cell--negative"
                                } else {
                                    "table__cell table__cell--right"
                                };
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.rank}</td>
                                        <td class="table__cell">{highlight_matches(&row.sku, &filter)}</td>
                                        <td class="table__cell">{highlight_matches(&row.product, &filter)}</td>
                                        <td class="table__cell table__cell--right">{row.units_sold}</td>
                                        <td class="table__cell table__cell--right">{format_amount(row.revenue)}</td>
                                        <td class="table__cell table__cell--right">{format_amount(row.cost)}</td>
                                        <td class=profit_class>{format_amount(row.profit)}</td>
                                        <td class="table__cell table__cell--right">{format_amount(row.margin)}</td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
                {move || {
                    let empty = state.with(|s| s.is_loaded && !s.is_loading) && visible.with(|v| v.is_empty());
                    empty.then(|| view! { <div class="table__empty">"No data"</div> })
                }}
            </div>
        </div>
    }
}
