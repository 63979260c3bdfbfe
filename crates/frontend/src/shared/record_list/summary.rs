use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::display_date;
use contracts::domain::common::EntityRecord;
use contracts::shared::metadata::{list_fields, FieldType};
use leptos::prelude::*;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;

/// Content of a summary widget above the grid
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryState<R> {
    Loading,
    /// The endpoint answered 404
    NoData,
    Ready(R),
    Failed(String),
}

impl<R> SummaryState<R> {
    pub fn from_result(result: Result<Option<R>, ApiError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Ready(value),
            Ok(None) => Self::NoData,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Run a summary request in the background and store its outcome.
///
/// The previous value stays visible until the answer arrives.
pub fn refresh_summary<R, F, Fut>(target: RwSignal<SummaryState<R>>, request: F)
where
    R: Send + Sync + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<Option<R>, ApiError>> + 'static,
{
    spawn_local(async move {
        let result = request().await;
        if let Err(e) = &result {
            log::warn!("Summary request failed: {}", e);
        }
        // The screen may have been closed meanwhile
        let _ = target.try_set(SummaryState::from_result(result));
    });
}

/// Card frame shared by the summary widgets
#[component]
pub fn SummaryCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="summary-card">
            <div class="summary-card__title">{title}</div>
            <div class="summary-card__body">{children()}</div>
        </div>
    }
}

/// Most recently added record of an entity
#[component]
pub fn LatestRecordCard<T>(state: RwSignal<SummaryState<T>>) -> impl IntoView
where
    T: EntityRecord,
{
    let title = format!("Latest {}", T::metadata().ui.element_name.to_lowercase());

    let body = move || match state.get() {
        SummaryState::Loading => view! { <span class="summary-card__muted">"Loading..."</span> }.into_any(),
        SummaryState::NoData => view! { <span class="summary-card__muted">"No data"</span> }.into_any(),
        SummaryState::Failed(e) => view! { <span class="summary-card__error">{e}</span> }.into_any(),
        SummaryState::Ready(record) => list_fields(T::fields())
            .into_iter()
            .map(|field| {
                let value = record.field_value(field.name).unwrap_or_default();
                let value = if field.field_type == FieldType::Date {
                    display_date(&value)
                } else {
                    value
                };
                view! {
                    <div class="summary-card__item">
                        <span class="summary-card__label">{field.label()}</span>
                        <span class="summary-card__value">{value}</span>
                    </div>
                }
            })
            .collect_view()
            .into_any(),
    };

    view! { <SummaryCard title=title>{body}</SummaryCard> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_no_data() {
        let state: SummaryState<u32> = SummaryState::from_result(Ok(None));
        assert_eq!(state, SummaryState::NoData);
        assert_eq!(SummaryState::from_result(Ok(Some(7))), SummaryState::Ready(7));
    }

    #[test]
    fn test_error_keeps_server_message() {
        let state: SummaryState<u32> = SummaryState::from_result(Err(ApiError::Http {
            status: 500,
            message: "database unavailable".to_string(),
        }));
        let SummaryState::Failed(message) = state else {
            panic!("expected a failure");
        };
        assert!(message.contains("database unavailable"));
    }
}
