use std::sync::Arc;

use services::{Clock, EffectRunner};

pub trait UiApp: Send + Sync {
    fn runner(&self) -> EffectRunner;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    runner: EffectRunner,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            runner: app.runner(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn runner(&self) -> EffectRunner {
        self.runner.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// Provided by the composition root (`crates/app`) through the launch builder.

#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
