use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, EffectRunner, InMemoryTutorApi, TutorApi};
use tutor_core::store::{Action, Store};
use tutor_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::store_handle::StoreHandle;
use crate::views::{ChatView, ProgressView, QuizView, StoreProvider, StoreTestHandles};

#[derive(Clone)]
struct TestApp {
    api: Arc<dyn TutorApi>,
}

impl UiApp for TestApp {
    fn runner(&self) -> EffectRunner {
        EffectRunner::new(Arc::clone(&self.api), "lycée")
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Chat,
    Quiz,
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: StoreTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! {
        StoreProvider {
            Router::<TestRoute> {}
        }
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Chat => rsx! { ChatView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    handles: StoreTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Runs pending effects and their follow-ups until nothing is left.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let handle: StoreHandle = self.handles.handle();
        self.dom.in_runtime(|| handle.dispatch(action));
        drive_dom(&mut self.dom);
    }

    pub fn store(&self) -> Store {
        let handle = self.handles.handle();
        self.dom.in_runtime(|| handle.store().read().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: InMemoryTutorApi) -> ViewHarness {
    setup_view_harness_with_api(view, Arc::new(api))
}

pub fn setup_view_harness_with_api(view: ViewKind, api: Arc<dyn TutorApi>) -> ViewHarness {
    let handles = StoreTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { api }),
            view,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
