use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// Content of one open tab.
///
/// Created once per open and kept alive while hidden, so switching tabs
/// keeps each screen's filters and selection.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let tab_key = tab.key;
    let key_for_active = tab_key.clone();
    let is_active = move || tabs_store.active.with(|a| a.as_ref() == Some(&key_for_active));

    log::debug!("Tab content created: '{}'", tab_key);
    let key_for_cleanup = tab_key.clone();
    on_cleanup(move || log::debug!("Tab content dropped: '{}'", key_for_cleanup));

    let content = render_tab_content(&tab_key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}
