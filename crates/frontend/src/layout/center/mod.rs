pub mod tab;

use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;
use tab::Tab;

/// Tab headers of the open screens
#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <Show when=move || ctx.opened.with(|tabs| !tabs.is_empty())>
            <div class="tabs__bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <Tab tab=tab /> }
                />
            </div>
        </Show>
    }
}

#[component]
pub fn Center(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let nothing_open = move || ctx.opened.with(|tabs| tabs.is_empty());

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <TabBar />
            <Show when=nothing_open>
                <div class="app-tabs__placeholder">"Choose a section in the menu"</div>
            </Show>
            {children()}
        </div>
    }
}
