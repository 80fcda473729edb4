use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use tutor_core::store::Section;

use crate::store_handle::StoreHandle;
use crate::views::{ChatView, ProgressView, QuizView};
use crate::vm::render_shell;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ChatView)] Chat {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/progress", ProgressView)] Progress {},
}

impl Route {
    #[must_use]
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Chat => Route::Chat {},
            Section::Quiz => Route::Quiz {},
            Section::Progress => Route::Progress {},
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "🎓 Tuteur Éducatif" }
                Nav {}
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Nav() -> Element {
    let handle = use_context::<StoreHandle>();
    let items = render_shell(&handle.store().read())
        .nav
        .into_iter()
        .map(|item| {
            let class = if item.active { "nav-btn active" } else { "nav-btn" };
            (item.label, class.to_string(), Route::for_section(item.section))
        });
    rsx! {
        nav { class: "nav",
            for (label, class, to) in items {
                Link { key: "{label}", class, to, "{label}" }
            }
        }
    }
}
