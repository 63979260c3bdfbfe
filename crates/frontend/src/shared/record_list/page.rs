use super::delete::{execute_deletion, DeleteThresholds, DeletionPlan};
use super::state::create_state;
use super::ReferenceOptions;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::table_checkbox::TableCheckbox;
use crate::shared::csv_importer::upload::UploadReport;
use crate::shared::csv_importer::BulkUploadDialog;
use crate::shared::date_utils::{dated_file_name, display_date};
use crate::shared::export::export_records;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};
use crate::shared::modal_stack::{CloseGuard, ModalHandle, ModalStackService};
use crate::shared::record_api::{HttpRecordApi, RecordApi};
use crate::shared::record_dialog::{DialogSubmit, RecordDialog};
use crate::shared::toast::ToastService;
use contracts::domain::common::EntityRecord;
use contracts::shared::metadata::{list_fields, FieldType, ReferenceList};
use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// CRUD screen of one entity: toolbar, filter panel and selectable grid.
///
/// The grid shows the server collection as last loaded; every successful
/// mutation reloads it.
#[component]
pub fn RecordListPage<T>(
    api: HttpRecordApi<T>,
    /// Reference lists for dialog dropdowns and the reference filter
    #[prop(into)]
    references: Signal<ReferenceOptions>,
    /// Reference list whose values filter the grid
    #[prop(optional)]
    reference_filter: Option<ReferenceList>,
    /// Called whenever the collection is (re)loaded, e.g. to refresh summary widgets
    #[prop(optional)]
    on_reloaded: Option<Callback<()>>,
    /// Summary widgets above the grid
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView
where
    T: EntityRecord,
{
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let toasts = use_context::<ToastService>().expect("ToastService not found in context");

    let state = create_state::<T>();
    let api = StoredValue::new(api);
    let saving = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    let meta = T::metadata();
    let list_name = meta.ui.list_name;
    let element_name = meta.ui.element_name;
    let columns = list_fields(T::fields());

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let search_text = Memo::new(move |_| state.with(|s| s.filter.search_text.clone()));

    let load = move || {
        state.update(|s| s.is_loading = true);
        if let Some(callback) = on_reloaded {
            callback.run(());
        }
        spawn_local(async move {
            match api.get_value().list().await {
                Ok(records) => {
                    log::info!("Loaded {} {}", records.len(), T::collection());
                    state.update(|s| s.set_records(records));
                }
                Err(e) => {
                    state.update(|s| {
                        s.is_loading = false;
                        s.error = Some(e.to_string());
                    });
                    toasts.error(format!("Failed to load {}: {}", list_name, e));
                }
            }
        });
    };

    let submit = move |submission: DialogSubmit<T>, handle: ModalHandle| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        spawn_local(async move {
            let api = api.get_value();
            let result = match submission {
                DialogSubmit::Create(payload) => api
                    .create(&payload)
                    .await
                    .map(|_| format!("{} created", element_name)),
                DialogSubmit::Update(batch) => {
                    let count = batch.len();
                    api.update(batch)
                        .await
                        .map(|_| format!("Updated {} record(s)", count))
                }
            };
            saving.set(false);
            match result {
                Ok(message) => {
                    toasts.success(message);
                    handle.close();
                    state.update(|s| s.clear_selection());
                    load();
                }
                Err(e) => {
                    toasts.error(format!("Save failed: {}", e));
                    state.update(|s| s.clear_selection());
                    load();
                }
            }
        });
    };

    let open_dialog = move |records: Vec<T>| {
        modal_stack.push_with_frame(
            Some("max-width: min(900px, 95vw); width: min(900px, 95vw);".to_string()),
            Some("record-dialog-modal".to_string()),
            move |handle| {
                let submit_handle = handle.clone();
                let cancel_handle = handle.clone();
                view! {
                    <RecordDialog
                        records=records.clone()
                        references=references
                        saving=saving
                        on_submit=Callback::new(move |s| submit(s, submit_handle.clone()))
                        on_cancel=Callback::new(move |_| cancel_handle.close())
                    />
                }
                .into_any()
            },
        );
    };

    let run_delete = move |plan: DeletionPlan, keys: Vec<T::Key>| {
        deleting.set(true);
        spawn_local(async move {
            let outcome = execute_deletion(&api.get_value(), plan, &keys).await;
            deleting.set(false);
            toasts.show(outcome.kind(), outcome.message());
            state.update(|s| s.clear_selection());
            load();
        });
    };

    let confirm_delete = move || {
        let (keys, total) = state.with_untracked(|s| (s.selected_keys(), s.records.len()));
        if keys.is_empty() || deleting.get_untracked() {
            return;
        }
        let plan = DeletionPlan::choose(keys.len(), total, DeleteThresholds::from_config());
        let message = match plan {
            DeletionPlan::All => format!(
                "All {} {} are selected. Delete the whole collection?",
                keys.len(),
                list_name.to_lowercase()
            ),
            _ => format!("Delete {} selected record(s)?", keys.len()),
        };
        modal_stack.push(move |handle| {
            let keys = keys.clone();
            let confirm_handle = handle.clone();
            let cancel_handle = handle.clone();
            view! {
                <ConfirmDialog
                    title="Delete records"
                    message=message.clone()
                    confirm_label="Delete"
                    on_confirm=Callback::new(move |_| {
                        confirm_handle.close();
                        run_delete(plan, keys.clone());
                    })
                    on_cancel=Callback::new(move |_| cancel_handle.close())
                />
            }
            .into_any()
        });
    };

    let open_upload = move || {
        let close_lock = Arc::new(AtomicBool::new(false));
        let close_guard = {
            let close_lock = close_lock.clone();
            Arc::new(move || !close_lock.load(Ordering::Relaxed)) as CloseGuard
        };
        modal_stack.push_with_frame_guard(
            Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
            Some("bulk-upload-modal".to_string()),
            Some(close_guard),
            move |handle| {
                let close_handle = handle.clone();
                view! {
                    <BulkUploadDialog
                        api=api.get_value()
                        close_lock=close_lock.clone()
                        on_uploaded=Callback::new(move |report: UploadReport| {
                            toasts.show(report.kind(), report.message());
                            load();
                        })
                        on_close=Callback::new(move |_| close_handle.close())
                    />
                }
                .into_any()
            },
        );
    };

    let export = move || {
        let rows = visible.get_untracked();
        let file_name = dated_file_name(T::collection(), "csv");
        match export_records(&rows, &file_name) {
            Ok(()) => toasts.info(format!("Exported {} record(s)", rows.len())),
            Err(e) => toasts.warning(e),
        }
    };

    let edit_selected = move || {
        let records = state.with_untracked(|s| s.selected_records());
        if !records.is_empty() {
            open_dialog(records);
        }
    };

    let selected_count = move || state.with(|s| s.selected.len());
    let reference_options = move || {
        reference_filter
            .and_then(|list| references.with(|r| r.get(&list).cloned()))
            .unwrap_or_default()
    };

    load();

    let header_columns = columns.clone();

    view! {
        <div class="page">
            <div class="header">
                <h2>{list_name}</h2>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_dialog(Vec::new())>
                        {icon("plus")}
                        " New"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| edit_selected()
                        disabled=Signal::derive(move || selected_count() == 0)
                    >
                        {icon("edit")}
                        {move || format!(" Edit ({})", selected_count())}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| confirm_delete()
                        disabled=Signal::derive(move || selected_count() == 0 || deleting.get())
                    >
                        {icon("delete")}
                        {move || format!(" Delete ({})", selected_count())}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| open_upload()>
                        {icon("upload")}
                        " Upload CSV"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| export()>
                        {icon("download")}
                        " Export"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || state.with(|s| s.is_loading))
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            {children.map(|c| view! { <div class="summary-row">{c()}</div> })}

            <div class="filter-panel">
                <SearchInput
                    value=Signal::derive(move || state.with(|s| s.filter.search_text.clone()))
                    on_change=Callback::new(move |v: String| state.update(|s| s.filter.search_text = v))
                    placeholder=format!("Search {}...", list_name.to_lowercase())
                />
                <label class="filter-panel__label">"From"</label>
                <DateInput
                    value=Signal::derive(move || state.with(|s| s.filter.date_from.clone()))
                    on_change=Callback::new(move |v: String| state.update(|s| s.filter.date_from = v))
                    title="From date (inclusive)"
                />
                <label class="filter-panel__label">"To"</label>
                <DateInput
                    value=Signal::derive(move || state.with(|s| s.filter.date_to.clone()))
                    on_change=Callback::new(move |v: String| state.update(|s| s.filter.date_to = v))
                    title="To date (inclusive)"
                />
                {reference_filter.map(|list| view! {
                    <select
                        class="filter-panel__select"
                        prop:value=move || state.with(|s| s.filter.reference.clone().unwrap_or_default())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| {
                                s.filter.reference = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                    >
                        <option value="">{format!("All {}", list.path())}</option>
                        {move || reference_options().into_iter().map(|opt| {
                            view! { <option value=opt.clone()>{opt.clone()}</option> }
                        }).collect_view()}
                    </select>
                })}
                <Show when=move || state.with(|s| s.filter.active_count() > 0)>
                    <button
                        class="button button--ghost"
                        on:click=move |_| state.update(|s| s.filter = Default::default())
                    >
                        {icon("x")}
                        {move || format!(" Reset filters ({})", state.with(|s| s.filter.active_count()))}
                    </button>
                </Show>
                <span class="filter-panel__count">
                    {move || state.with(|s| {
                        format!(
                            "{} of {} shown, {} selected",
                            visible.with(|v| v.len()),
                            s.records.len(),
                            s.selected.len()
                        )
                    })}
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
                            <th class="table__header-cell table__header-cell--checkbox">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    prop:checked=move || state.with(|s| s.all_visible_selected())
                                    on:change=move |_| state.update(|s| s.toggle_all_visible())
                                />
                            </th>
                            {header_columns.into_iter().map(|field| {
                                let name = field.name;
                                view! {
                                    <th
                                        class="table__header-cell table__header-cell--sortable"
                                        on:click=move |_| state.update(|s| s.toggle_sort(name))
                                    >
                                        {field.label()}
                                        <span class="table__sort-indicator">
                                            {move || state.with(|s| get_sort_indicator(&s.sort_field, name, s.sort_ascending))}
                                        </span>
                                    </th>
                                }
                            }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = search_text.get();
                            visible.get().into_iter().map(|record| {
                                let key = record.key();
                                let key_for_checked = key.clone();
                                let key_for_class = key.clone();
                                let record_for_edit = record.clone();
                                let cells = columns.iter().map(|field| {
                                    let raw = record.field_value(field.name).unwrap_or_default();
                                    let text = if field.field_type == FieldType::Date {
                                        display_date(&raw)
                                    } else {
                                        raw
                                    };
                                    let class = if field.field_type.is_numeric() {
                                        "table__cell table__cell--number"
                                    } else {
                                        "table__cell"
                                    };
                                    view! { <td class=class>{highlight_matches(&text, &search)}</td> }
                                }).collect_view();
                                view! {
                                    <tr
                                        class="table__row"
                                        class:table__row--selected=move || state.with(|s| s.is_selected(&key_for_class))
                                        on:dblclick=move |_| open_dialog(vec![record_for_edit.clone()])
                                    >
                                        <TableCheckbox
                                            checked=Signal::derive(move || state.with(|s| s.is_selected(&key_for_checked)))
                                            on_change=Callback::new(move |checked| state.update(|s| s.toggle(key.clone(), checked)))
                                        />
                                        {cells}
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
                <Show when=move || state.with(|s| s.is_loaded && !s.is_loading) && visible.with(|v| v.is_empty())>
                    <div class="table__empty">{format!("No {} to show", list_name.to_lowercase())}</div>
                </Show>
                <Show when=move || state.with(|s| s.is_loading)>
                    <div class="table__loading">"Loading..."</div>
                </Show>
            </div>
        </div>
    }
}
