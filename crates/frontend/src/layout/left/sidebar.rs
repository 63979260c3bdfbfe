//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::registry::{
    MANUFACTURE_ORDERS, PROFITABILITY, RETURN_ORDERS, SALES_RECORDS,
};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "records",
            label: "Records",
            icon: "folder",
            items: vec![
                (MANUFACTURE_ORDERS, "package"),
                (RETURN_ORDERS, "package-x"),
                (SALES_RECORDS, "cash"),
            ],
        },
        MenuGroup {
            id: "reports",
            label: "Reports",
            icon: "file-text",
            items: vec![(PROFITABILITY, "bar-chart")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let groups = get_menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id;
                let toggle_group = move |_| {
                    expanded_groups.update(|items| {
                        if let Some(pos) = items.iter().position(|x| *x == group_id) {
                            items.remove(pos);
                        } else {
                            items.push(group_id);
                        }
                    });
                };
                let is_expanded = move || expanded_groups.with(|items| items.contains(&group_id));
                let items = StoredValue::new(group.items);

                view! {
                    <div>
                        <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle_group>
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.with(|a| a.as_deref() == Some(key))
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
