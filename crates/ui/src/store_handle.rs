use dioxus::prelude::*;
use dioxus::core::spawn_forever;
use services::EffectRunner;
use tracing::trace;
use tutor_core::store::{Action, Store};

/// The application store and the runner that performs its effects.
///
/// Effects run on the root scope so a request keeps going when the view that
/// issued it unmounts.
#[derive(Clone)]
pub struct StoreHandle {
    store: Signal<Store>,
    runner: EffectRunner,
}

impl StoreHandle {
    #[must_use]
    pub fn new(store: Signal<Store>, runner: EffectRunner) -> Self {
        Self { store, runner }
    }

    #[must_use]
    pub fn store(&self) -> Signal<Store> {
        self.store
    }

    pub fn dispatch(&self, action: Action) {
        let mut store = self.store;
        let effect = store.write().apply(action);
        let Some(effect) = effect else {
            return;
        };
        trace!(effect = effect.name(), "spawning effect");
        let handle = self.clone();
        spawn_forever(async move {
            let completion = handle.runner.run(effect).await;
            handle.dispatch(completion);
        });
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}
