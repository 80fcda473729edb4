//! Shared error types for the services crate.

use thiserror::Error;
use tutor_core::error::FailureNotice;

/// Any failed exchange with the tutoring API.
///
/// Network errors, non-2xx statuses and undecodable bodies all end up here;
/// callers never see anything else from the API boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestFailure {
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("response body could not be decoded: {0}")]
    Decode(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<RequestFailure> for FailureNotice {
    fn from(failure: RequestFailure) -> Self {
        FailureNotice::new(failure.to_string())
    }
}
