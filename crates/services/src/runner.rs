//! Performs store effects against a `TutorApi`.

use std::sync::Arc;

use tracing::debug;
use tutor_core::error::FailureNotice;
use tutor_core::store::{Action, Effect, Store};

use crate::api::TutorApi;
use crate::error::RequestFailure;

#[derive(Clone)]
pub struct EffectRunner {
    api: Arc<dyn TutorApi>,
    student_level: String,
}

impl std::fmt::Debug for EffectRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRunner")
            .field("student_level", &self.student_level)
            .finish_non_exhaustive()
    }
}

impl EffectRunner {
    #[must_use]
    pub fn new(api: Arc<dyn TutorApi>, student_level: impl Into<String>) -> Self {
        Self {
            api,
            student_level: student_level.into(),
        }
    }

    #[must_use]
    pub fn api(&self) -> &Arc<dyn TutorApi> {
        &self.api
    }

    #[must_use]
    pub fn student_level(&self) -> &str {
        &self.student_level
    }

    /// Issues the request behind `effect` and returns its completion.
    ///
    /// Failures are folded into the completion; this never errors.
    pub async fn run(&self, effect: Effect) -> Action {
        debug!(effect = effect.name(), "running effect");
        match effect {
            Effect::SendChat { ticket, message } => Action::ChatReplied {
                ticket,
                outcome: notice(
                    self.api
                        .send_chat_message(ticket.subject, &message, &self.student_level)
                        .await,
                ),
            },
            Effect::FetchHistory { ticket } => Action::HistoryLoaded {
                ticket,
                outcome: notice(self.api.fetch_history(ticket.subject).await),
            },
            Effect::ClearHistory { ticket } => Action::HistoryCleared {
                ticket,
                outcome: notice(self.api.clear_history(ticket.subject).await),
            },
            Effect::GenerateQuiz { ticket, request } => Action::QuizGenerated {
                ticket,
                outcome: notice(self.api.generate_quiz(&request).await),
            },
            Effect::SubmitQuiz {
                ticket,
                quiz_id,
                answers,
            } => Action::QuizSubmitted {
                ticket,
                outcome: notice(self.api.submit_quiz(&quiz_id, &answers).await),
            },
            Effect::FetchLeaderboard { ticket } => Action::LeaderboardLoaded {
                ticket,
                outcome: notice(self.api.fetch_leaderboard().await),
            },
            Effect::FetchSubjectProgress { ticket, subject } => Action::SubjectProgressLoaded {
                ticket,
                subject,
                outcome: notice(self.api.fetch_subject_progress(subject).await),
            },
        }
    }

    /// Applies `action`, then every effect it leads to, until the store
    /// settles.
    pub async fn dispatch(&self, store: &mut Store, action: Action) {
        let mut pending = store.apply(action);
        while let Some(effect) = pending {
            let completion = self.run(effect).await;
            pending = store.apply(completion);
        }
    }
}

fn notice<T>(result: Result<T, RequestFailure>) -> Result<T, FailureNotice> {
    result.map_err(FailureNotice::from)
}
