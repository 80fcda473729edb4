use dioxus::prelude::*;
use tutor_core::store::{Action, Store};

use crate::context::AppContext;
use crate::store_handle::StoreHandle;
use crate::vm::render_shell;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Owns the store for everything below it and renders the global alert and
/// loading overlay on top.
#[component]
pub fn StoreProvider(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_signal(|| Store::new(ctx.clock()));
    let handle = use_context_provider(|| StoreHandle::new(store, ctx.runner()));

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<StoreTestHandles>() {
            handles.register(handle.clone());
        }
    }

    let init = handle.clone();
    use_effect(move || init.dispatch(Action::Init));

    let shell = render_shell(&store.read());

    rsx! {
        {children}
        if let Some(message) = shell.alert {
            AlertModal { message }
        }
        if shell.loading {
            LoadingOverlay {}
        }
    }
}

#[component]
fn AlertModal(message: String) -> Element {
    let handle = use_context::<StoreHandle>();
    rsx! {
        div { class: "modal-backdrop", role: "alertdialog",
            div { class: "modal",
                p { class: "modal-message", "{message}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        id: "alert-ok",
                        onclick: move |_| handle.dispatch(Action::DismissAlert),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
fn LoadingOverlay() -> Element {
    rsx! {
        div { class: "loading-overlay",
            div { class: "spinner" }
            p { "Chargement..." }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StoreTestHandles {
    handle: Rc<RefCell<Option<StoreHandle>>>,
}

#[cfg(test)]
impl StoreTestHandles {
    pub(crate) fn register(&self, handle: StoreHandle) {
        *self.handle.borrow_mut() = Some(handle);
    }

    pub(crate) fn handle(&self) -> StoreHandle {
        self.handle
            .borrow()
            .clone()
            .expect("store handle registered")
    }
}
