use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::views::StoreProvider;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Tuteur Éducatif" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Une erreur inattendue s'est produite" }
                        pre { "{errors:?}" }
                    }
                },
                StoreProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
