//! Boundary to the remote tutoring API.

mod http;
mod memory;
mod wire;

use async_trait::async_trait;
use tutor_core::model::{
    GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, QuizId, QuizRequest, QuizResult, Subject,
    SubjectStats,
};

use crate::error::RequestFailure;

pub use http::HttpTutorApi;
pub use memory::{ApiCall, InMemoryTutorApi, Operation};

/// What the API root reports about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub subjects: Vec<String>,
}

/// One method per remote capability.
///
/// Requests are issued once: no retries, no cancellation.
#[async_trait]
pub trait TutorApi: Send + Sync {
    /// Returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn send_chat_message(
        &self,
        subject: Subject,
        message: &str,
        student_level: &str,
    ) -> Result<String, RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn fetch_history(&self, subject: Subject) -> Result<Vec<HistoryEntry>, RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn clear_history(&self, subject: Subject) -> Result<(), RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn generate_quiz(&self, request: &QuizRequest) -> Result<GeneratedQuiz, RequestFailure>;

    /// `answers` holds one option index per question, in question order.
    ///
    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn submit_quiz(
        &self,
        quiz_id: &QuizId,
        answers: &[usize],
    ) -> Result<QuizResult, RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn fetch_leaderboard(&self) -> Result<LeaderboardSnapshot, RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn fetch_subject_progress(&self, subject: Subject)
    -> Result<SubjectStats, RequestFailure>;

    /// # Errors
    ///
    /// Returns `RequestFailure` when the request fails or the status is not 2xx.
    async fn service_info(&self) -> Result<ServiceInfo, RequestFailure>;
}
