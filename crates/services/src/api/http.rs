use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tutor_core::model::{
    GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, QuizId, QuizRequest, QuizResult, Subject,
    SubjectStats,
};

use crate::api::wire::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, HistoryResponse,
    LeaderboardResponse, ServiceInfoResponse, SubjectStatsBody, SubmitRequest, SubmitResponse,
};
use crate::api::{ServiceInfo, TutorApi};
use crate::config::ApiConfig;
use crate::error::RequestFailure;

/// `TutorApi` over HTTP with JSON bodies.
#[derive(Clone, Debug)]
pub struct HttpTutorApi {
    client: Client,
    base_url: String,
}

impl HttpTutorApi {
    /// # Errors
    ///
    /// Returns `RequestFailure::Transport` when the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, RequestFailure> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
    }

    async fn exchange(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Vec<u8>, RequestFailure> {
        let started = Instant::now();
        let response = build(self.request(method.clone(), path)).send().await;
        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, path, error = %err, "request did not complete");
                return Err(err.into());
            }
        };

        let status = response.status();
        debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api response"
        );
        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "api returned an error status");
            return Err(RequestFailure::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, RequestFailure> {
        let body = self.exchange(method, path, build).await?;
        serde_json::from_slice(&body).map_err(|err| RequestFailure::Decode(err.to_string()))
    }
}

#[async_trait]
impl TutorApi for HttpTutorApi {
    async fn send_chat_message(
        &self,
        subject: Subject,
        message: &str,
        student_level: &str,
    ) -> Result<String, RequestFailure> {
        let payload = ChatRequest {
            message,
            subject,
            student_level,
        };
        let body: ChatResponse = self
            .fetch(Method::POST, "/chat", |req| req.json(&payload))
            .await?;
        Ok(body.response)
    }

    async fn fetch_history(&self, subject: Subject) -> Result<Vec<HistoryEntry>, RequestFailure> {
        let path = format!("/history/{}", subject.as_str());
        let body: HistoryResponse = self.fetch(Method::GET, &path, |req| req).await?;
        Ok(body.history.into_iter().map(HistoryEntry::from).collect())
    }

    async fn clear_history(&self, subject: Subject) -> Result<(), RequestFailure> {
        let path = format!("/history/{}", subject.as_str());
        self.exchange(Method::DELETE, &path, |req| req).await?;
        Ok(())
    }

    async fn generate_quiz(&self, request: &QuizRequest) -> Result<GeneratedQuiz, RequestFailure> {
        let payload = GenerateRequest::from(request);
        let body: GenerateResponse = self
            .fetch(Method::POST, "/quiz/generate", |req| req.json(&payload))
            .await?;
        Ok(body.into())
    }

    async fn submit_quiz(
        &self,
        quiz_id: &QuizId,
        answers: &[usize],
    ) -> Result<QuizResult, RequestFailure> {
        let payload = SubmitRequest { quiz_id, answers };
        let body: SubmitResponse = self
            .fetch(Method::POST, "/quiz/submit", |req| req.json(&payload))
            .await?;
        Ok(body.into())
    }

    async fn fetch_leaderboard(&self) -> Result<LeaderboardSnapshot, RequestFailure> {
        let body: LeaderboardResponse = self.fetch(Method::GET, "/leaderboard", |req| req).await?;
        Ok(body.into())
    }

    async fn fetch_subject_progress(
        &self,
        subject: Subject,
    ) -> Result<SubjectStats, RequestFailure> {
        let path = format!("/progress/{}", subject.as_str());
        let body: SubjectStatsBody = self.fetch(Method::GET, &path, |req| req).await?;
        Ok(body.into())
    }

    async fn service_info(&self) -> Result<ServiceInfo, RequestFailure> {
        let body: ServiceInfoResponse = self.fetch(Method::GET, "/", |req| req).await?;
        Ok(body.into())
    }
}
