use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Yes/no question shown through the modal stack
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="confirm-dialog">
            <div class="modal-header">
                <h3 class="modal-title">{title}</h3>
            </div>
            <div class="modal-body">
                <p class="confirm-dialog__message">{message}</p>
            </div>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_confirm.run(())>
                    {icon("delete")}
                    {format!(" {}", confirm_label)}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
