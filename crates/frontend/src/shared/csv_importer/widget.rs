use super::types::CsvTemplate;
use super::upload::{import_csv, UploadPhase, UploadReport};
use crate::shared::config::config;
use crate::shared::export::download_csv;
use crate::shared::icons::icon;
use crate::shared::record_api::HttpRecordApi;
use contracts::domain::common::EntityRecord;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "Failed to read file: not a text file".to_string())
}

/// CSV bulk upload of one entity.
///
/// Every instance starts idle; the dialog is rebuilt on each open.
#[component]
pub fn BulkUploadDialog<T>(
    api: HttpRecordApi<T>,
    /// Called once every batch has been attempted
    on_uploaded: Callback<UploadReport>,
    on_close: Callback<()>,
    /// Close lock shared with the modal stack guard, set while busy
    #[prop(optional)]
    close_lock: Option<Arc<AtomicBool>>,
) -> impl IntoView
where
    T: EntityRecord,
{
    let phase = RwSignal::new(UploadPhase::Idle);
    let file_name = RwSignal::new(None::<String>);
    let api = StoredValue::new(api);
    let close_lock = StoredValue::new(close_lock);

    let template = CsvTemplate::for_entity::<T>();
    let expected_headers = template.headers().join(", ");
    let entity_name = T::metadata().ui.list_name;

    let set_phase = move |next: UploadPhase| {
        if let Some(lock) = close_lock.get_value() {
            lock.store(next.is_busy(), Ordering::Relaxed);
        }
        phase.set(next);
    };

    let download_template = move |_| {
        let template = CsvTemplate::for_entity::<T>();
        if let Err(e) = template
            .to_csv()
            .and_then(|csv| download_csv(&csv, template.file_name))
        {
            set_phase(UploadPhase::Failed(e));
        }
    };

    let handle_file_select = move |ev: web_sys::Event| {
        if phase.get_untracked().is_busy() {
            return;
        }
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Let the same file be chosen again after a failure
        input.set_value("");

        file_name.set(Some(file.name()));
        set_phase(UploadPhase::Reading);

        leptos::task::spawn_local(async move {
            let text = match read_file_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    set_phase(UploadPhase::Failed(e));
                    return;
                }
            };

            set_phase(UploadPhase::Parsing);
            let settings = &config().bulk_upload;
            let report = match import_csv(
                &api.get_value(),
                &text,
                settings.batch_size,
                |batch, total| set_phase(UploadPhase::Uploading { batch, total }),
            )
            .await
            {
                Ok(report) => report,
                Err(e) => {
                    log::warn!("Rejected upload file: {}", e);
                    set_phase(UploadPhase::Failed(e.to_string()));
                    return;
                }
            };

            on_uploaded.run(report.clone());
            let succeeded = report.failures.is_empty();
            set_phase(UploadPhase::Done(report));

            if succeeded {
                TimeoutFuture::new(settings.close_delay_ms).await;
                // The user may have closed the dialog meanwhile
                if phase.try_get_untracked().is_some() {
                    on_close.run(());
                }
            }
        });
    };

    let handle_close = move |_| {
        if phase.get_untracked().is_busy() {
            return;
        }
        on_close.run(());
    };

    let status_class = move || match phase.get() {
        UploadPhase::Failed(_) => "upload-status upload-status--error",
        UploadPhase::Done(ref report) if !report.failures.is_empty() => {
            "upload-status upload-status--warning"
        }
        UploadPhase::Done(_) => "upload-status upload-status--success",
        _ => "upload-status",
    };

    view! {
        <div class="bulk-upload">
            <div class="modal-header">
                <h3 class="modal-title">{format!("Upload {}", entity_name)}</h3>
                <div class="modal-header-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=handle_close
                        disabled=Signal::derive(move || phase.get().is_busy())
                    >
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="modal-body bulk-upload__body">
                <p class="bulk-upload__hint">
                    "Required columns: "
                    <code>{expected_headers}</code>
                </p>

                <div class="bulk-upload__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=download_template>
                        {icon("download")}
                        " Download template"
                    </Button>
                    <label
                        class=move || {
                            if phase.get().is_busy() {
                                "button button--primary button--disabled"
                            } else {
                                "button button--primary"
                            }
                        }
                        for="bulk-upload-file-input"
                    >
                        {icon("upload")}
                        " Choose CSV file"
                    </label>
                    <input
                        id="bulk-upload-file-input"
                        type="file"
                        accept=".csv,text/csv"
                        class="hidden"
                        prop:disabled=move || phase.get().is_busy()
                        on:change=handle_file_select
                    />
                    {move || file_name.get().map(|name| {
                        view! { <span class="bulk-upload__file">{name}</span> }
                    })}
                </div>

                <div class="bulk-upload__progress">
                    <div class="progress">
                        <div
                            class="progress__bar"
                            style=move || format!("width: {}%;", phase.get().percent())
                        ></div>
                    </div>
                    <div class=status_class>{move || phase.get().status_text()}</div>
                </div>
            </div>
        </div>
    }
}
