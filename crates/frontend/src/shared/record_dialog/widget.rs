use super::state::{DialogSubmit, RecordDialogState};
use crate::shared::date_utils::display_date;
use crate::shared::icons::icon;
use crate::shared::record_list::ReferenceOptions;
use contracts::domain::common::EntityRecord;
use contracts::shared::metadata::{FieldMetadata, FieldType};
use leptos::prelude::*;
use thaw::*;

/// Options offered by a field: its enum values or its reference list
fn field_options(field: &FieldMetadata, references: &ReferenceOptions) -> Vec<String> {
    if let Some(values) = field.enum_values {
        return values.iter().map(|v| v.to_string()).collect();
    }
    field
        .ref_list
        .and_then(|list| references.get(&list).cloned())
        .unwrap_or_default()
}

/// Single input bound to a field's metadata
#[component]
fn FieldInput(
    field: &'static FieldMetadata,
    /// DOM id, unique within the dialog
    #[prop(into)]
    input_id: String,
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)]
    options: Signal<Vec<String>>,
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let placeholder = field.ui.placeholder.unwrap_or_default();
    let list_id = format!("{}-options", input_id);

    let input = match field.field_type {
        FieldType::Enum => view! {
            <select
                id=input_id.clone()
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">"-- select --"</option>
                {move || options.get().into_iter().map(|opt| {
                    let selected = opt == value.get_untracked();
                    view! { <option value=opt.clone() selected=selected>{opt.clone()}</option> }
                }).collect_view()}
            </select>
        }
        .into_any(),
        FieldType::Reference => view! {
            <input
                id=input_id.clone()
                type="text"
                class="form__input"
                list=list_id.clone()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <datalist id=list_id.clone()>
                {move || options.get().into_iter().map(|opt| {
                    view! { <option value=opt></option> }
                }).collect_view()}
            </datalist>
        }
        .into_any(),
        FieldType::Date => view! {
            <input
                id=input_id.clone()
                type="date"
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldType::Integer | FieldType::Decimal => {
            let step = if field.field_type == FieldType::Integer { "1" } else { "0.01" };
            view! {
                <input
                    id=input_id.clone()
                    type="number"
                    class="form__input"
                    step=step
                    placeholder=placeholder
                    prop:value=move || value.get()
                    on:input=move |ev| on_change.run(event_target_value(&ev))
                />
            }
            .into_any()
        }
        FieldType::Text => view! {
            <input
                id=input_id.clone()
                type="text"
                class="form__input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    let required = !field.is_optional();

    view! {
        <div class="form__group">
            <label class="form__label" for=input_id>
                {field.label()}
                {required.then_some(" *")}
            </label>
            {input}
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}

/// Create/edit dialog of an entity.
///
/// `records` empty: create one record. Otherwise each selected record gets its
/// own form showing current values next to empty inputs for the new ones.
#[component]
pub fn RecordDialog<T>(
    records: Vec<T>,
    /// Reference lists for the dropdowns
    #[prop(into)]
    references: Signal<ReferenceOptions>,
    /// Called with a validated request
    on_submit: Callback<DialogSubmit<T>>,
    on_cancel: Callback<()>,
    /// Disables the submit button while the request runs
    #[prop(into)]
    saving: Signal<bool>,
) -> impl IntoView
where
    T: EntityRecord,
{
    let is_update = !records.is_empty();
    let record_count = records.len();
    let state = RwSignal::new(if is_update {
        RecordDialogState::update(records)
    } else {
        RecordDialogState::create()
    });
    let element_name = T::metadata().ui.element_name;
    let title = if is_update {
        format!("Edit {} ({})", element_name, record_count)
    } else {
        format!("New {}", element_name)
    };

    let handle_submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let mut submission = None;
        state.update(|s| submission = s.submit());
        if let Some(submission) = submission {
            on_submit.run(submission);
        }
    };

    let create_form = move || {
        RecordDialogState::<T>::create_fields()
            .into_iter()
            .map(|field| {
                let name = field.name;
                view! {
                    <FieldInput
                        field=field
                        input_id=format!("record-dialog-{}", name)
                        value=Signal::derive(move || {
                            state.with(|s| s.values.get(name).cloned().unwrap_or_default())
                        })
                        on_change=Callback::new(move |v: String| state.update(|s| s.set_value(name, v)))
                        options=Signal::derive(move || field_options(field, &references.get()))
                        error=Signal::derive(move || state.with(|s| s.errors.get(name).cloned()))
                    />
                }
            })
            .collect_view()
    };

    let update_forms = move || {
        (0..record_count)
            .map(|row| {
                let current = state.with_untracked(|s| s.rows[row].current.clone());
                let caption = T::fields()
                    .iter()
                    .filter(|f| !f.editable_on_update() && f.visible_in_list())
                    .filter_map(|f| {
                        current.field_value(f.name).map(|v| {
                            if f.field_type == FieldType::Date { display_date(&v) } else { v }
                        })
                    })
                    .collect::<Vec<_>>()
                    .join(" / ");
                let row_error = move || {
                    state.with(|s| {
                        s.rows[row]
                            .errors
                            .get(contracts::shared::form::RECORD_ERROR_KEY)
                            .cloned()
                    })
                };

                let inputs = RecordDialogState::<T>::update_fields()
                    .into_iter()
                    .map(|field| {
                        let name = field.name;
                        let current_value = current.field_value(name).unwrap_or_default();
                        view! {
                            <div class="record-dialog__pair">
                                <div class="record-dialog__current">
                                    <span class="record-dialog__current-label">"Current"</span>
                                    <span class="record-dialog__current-value">{current_value}</span>
                                </div>
                                <FieldInput
                                    field=field
                                    input_id=format!("record-dialog-{}-{}", row, name)
                                    value=Signal::derive(move || {
                                        state.with(|s| s.rows[row].changes.get(name).cloned().unwrap_or_default())
                                    })
                                    on_change=Callback::new(move |v: String| {
                                        state.update(|s| s.set_change(row, name, v))
                                    })
                                    options=Signal::derive(move || field_options(field, &references.get()))
                                    error=Signal::derive(move || {
                                        state.with(|s| s.rows[row].errors.get(name).cloned())
                                    })
                                />
                            </div>
                        }
                    })
                    .collect_view();

                view! {
                    <fieldset class="record-dialog__record">
                        <legend>{caption}</legend>
                        {inputs}
                        {move || row_error().map(|e| view! { <div class="form__error">{e}</div> })}
                    </fieldset>
                }
            })
            .collect_view()
    };

    view! {
        <div class="record-dialog">
            <div class="modal-header">
                <h3 class="modal-title">{title}</h3>
                <div class="modal-header-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_submit
                        disabled=saving
                    >
                        {icon("save")}
                        {move || if saving.get() { " Saving..." } else { " Save" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                    >
                        {icon("x")}
                        " Cancel"
                    </Button>
                </div>
            </div>

            <div class="modal-body record-dialog__body">
                {move || state.with(|s| s.form_error.clone()).map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                {move || state.with(|s| s.errors.get(contracts::shared::form::RECORD_ERROR_KEY).cloned()).map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                <div class="record-dialog__form">
                    {if is_update { update_forms().into_any() } else { create_form().into_any() }}
                </div>
            </div>
        </div>
    }
}
