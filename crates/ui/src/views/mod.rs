mod chat;
mod progress;
mod quiz;
mod shell;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat::ChatView;
pub use progress::ProgressView;
pub use quiz::QuizView;
pub use shell::StoreProvider;

#[cfg(test)]
pub(crate) use shell::StoreTestHandles;
