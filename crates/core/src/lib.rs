#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod store;
pub mod time;

pub use time::Clock;
