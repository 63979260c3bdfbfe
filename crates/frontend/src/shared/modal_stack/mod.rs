//! Stack of open dialogs rendered at the application root
//!
//! Record, confirmation and upload dialogs are pushed here instead of being
//! mounted inside the list page, so they overlay the whole shell and
//! Escape only ever closes the topmost one.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Returns false while the dialog must stay open (e.g. an upload is running)
pub type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    modal_style: Option<String>,
    modal_class: Option<String>,
    can_close: Option<CloseGuard>,
}

impl ModalEntry {
    fn closable(&self) -> bool {
        self.can_close.as_ref().map(|f| f()).unwrap_or(true)
    }
}

/// Lets a dialog close itself
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    /// Close on the next tick, after the triggering event has finished
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            // Removing the dialog inside its own DOM event would drop the running handler
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    fn push_entry(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        can_close: Option<CloseGuard>,
        builder: ModalBuilder,
    ) -> ModalHandle {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder,
                modal_style,
                modal_class,
                can_close,
            })
        });
        ModalHandle { id, svc: *self }
    }

    /// Open a dialog with the default frame
    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(None, None, None, Arc::new(builder))
    }

    /// Open a dialog with extra style/class on the surface
    pub fn push_with_frame<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(modal_style, modal_class, None, Arc::new(builder))
    }

    /// Like `push_with_frame`, but overlay click and Escape are ignored
    /// while `can_close` returns false.
    pub fn push_with_frame_guard<F>(
        &self,
        modal_style: Option<String>,
        modal_class: Option<String>,
        can_close: Option<CloseGuard>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(modal_style, modal_class, can_close, Arc::new(builder))
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    /// Close the topmost dialog unless its guard refuses
    fn pop_closable_deferred(&self) {
        let closable = self
            .stack
            .with_untracked(|s| s.last().map(ModalEntry::closable).unwrap_or(false));
        if closable {
            self.defer(|svc| svc.stack.update(|s| {
                s.pop();
            }));
        }
    }
}

/// Renders the dialog stack. Mounted once, next to the shell.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.is_open() {
                    svc.pop_closable_deferred();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // Lives as long as the app
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each=move || {
                    svc.stack
                        .get()
                        .into_iter()
                        .enumerate()
                        .collect::<Vec<(usize, ModalEntry)>>()
                }
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let z_index = 1000 + idx as i32;
                    let on_close = {
                        let entry = entry.clone();
                        Callback::new(move |_| {
                            if entry.closable() {
                                svc.close_deferred(entry.id);
                            }
                        })
                    };
                    let view = (entry.builder)(ModalHandle { id: entry.id, svc });

                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_style=entry.modal_style.clone().unwrap_or_default()
                            modal_class=entry.modal_class.clone().unwrap_or_default()
                        >
                            {view}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
