use super::ReferenceOptions;
use crate::shared::record_api::fetch_reference;
use crate::shared::toast::ToastService;
use contracts::domain::common::{option_values, ReferenceEntry};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Fetch one reference list in the background and store its option values.
///
/// Each call runs independently, so several lists load concurrently.
pub fn load_reference<R: ReferenceEntry>(target: RwSignal<ReferenceOptions>, toasts: ToastService) {
    spawn_local(async move {
        match fetch_reference::<R>().await {
            Ok(items) => {
                let values = option_values(&items);
                log::debug!("Loaded {} {}", values.len(), R::LIST.path());
                target.update(|options| {
                    options.insert(R::LIST, values);
                });
            }
            Err(e) => toasts.warning(format!("Failed to load {}: {}", R::LIST.path(), e)),
        }
    });
}
