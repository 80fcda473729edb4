#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod runner;

pub use tutor_core::Clock;

pub use api::{ApiCall, HttpTutorApi, InMemoryTutorApi, Operation, ServiceInfo, TutorApi};
pub use config::ApiConfig;
pub use error::RequestFailure;
pub use runner::EffectRunner;
