use crate::app_shell::MainLayout;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());
    provide_context(ToastService::new());

    view! {
        <ConfigProvider>
            <MainLayout />
            <ModalHost />
            <ToastHost />
        </ConfigProvider>
    }
}
