use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tutor_core::model::{
    ChatRole, GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, Question, QuestionResult, Quiz,
    QuizId, QuizRequest, QuizResult, Subject, SubjectStats,
};

use crate::api::{ServiceInfo, TutorApi};
use crate::error::RequestFailure;

const DEFAULT_REPLY: &str = "Bonne question !";

/// The remote capabilities, for scripting failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    SendChat,
    FetchHistory,
    ClearHistory,
    GenerateQuiz,
    SubmitQuiz,
    FetchLeaderboard,
    FetchSubjectProgress,
    ServiceInfo,
}

/// A request as received by `InMemoryTutorApi`, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    SendChat {
        subject: Subject,
        message: String,
        student_level: String,
    },
    FetchHistory(Subject),
    ClearHistory(Subject),
    GenerateQuiz(QuizRequest),
    SubmitQuiz {
        quiz_id: QuizId,
        answers: Vec<usize>,
    },
    FetchLeaderboard,
    FetchSubjectProgress(Subject),
    ServiceInfo,
}

impl ApiCall {
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            ApiCall::SendChat { .. } => Operation::SendChat,
            ApiCall::FetchHistory(_) => Operation::FetchHistory,
            ApiCall::ClearHistory(_) => Operation::ClearHistory,
            ApiCall::GenerateQuiz(_) => Operation::GenerateQuiz,
            ApiCall::SubmitQuiz { .. } => Operation::SubmitQuiz,
            ApiCall::FetchLeaderboard => Operation::FetchLeaderboard,
            ApiCall::FetchSubjectProgress(_) => Operation::FetchSubjectProgress,
            ApiCall::ServiceInfo => Operation::ServiceInfo,
        }
    }
}

#[derive(Debug)]
struct Backend {
    histories: HashMap<Subject, Vec<HistoryEntry>>,
    reply: String,
    quiz: Option<GeneratedQuiz>,
    result: Option<QuizResult>,
    leaderboard: LeaderboardSnapshot,
    failing: HashSet<Operation>,
    calls: Vec<ApiCall>,
    next_quiz_id: i64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            histories: HashMap::new(),
            reply: DEFAULT_REPLY.to_string(),
            quiz: None,
            result: None,
            leaderboard: LeaderboardSnapshot::default(),
            failing: HashSet::new(),
            calls: Vec::new(),
            next_quiz_id: 1,
        }
    }
}

impl Backend {
    fn record(&mut self, call: ApiCall) -> Result<(), RequestFailure> {
        let operation = call.operation();
        self.calls.push(call);
        if self.failing.contains(&operation) {
            return Err(RequestFailure::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }

    fn sample_quiz(&mut self, request: &QuizRequest) -> GeneratedQuiz {
        let quiz_id = QuizId::numeric(self.next_quiz_id);
        self.next_quiz_id += 1;
        let questions = (1..=request.num_questions)
            .map(|n| Question {
                prompt: format!("{} : question {n}", request.topic),
                options: ["A", "B", "C", "D"].map(String::from).to_vec(),
            })
            .collect();
        GeneratedQuiz {
            quiz_id,
            quiz: Quiz {
                title: format!("Quiz : {}", request.topic),
                questions,
            },
        }
    }
}

/// Scripted stand-in for the remote API.
///
/// Clones share one backend, so a test can keep a handle while the runner
/// owns another. Without a scripted result, option 0 is the right answer to
/// every question.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTutorApi {
    backend: Arc<Mutex<Backend>>,
}

impl InMemoryTutorApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_history(self, subject: Subject, entries: Vec<HistoryEntry>) -> Self {
        self.update(|backend| {
            backend.histories.insert(subject, entries);
        });
        self
    }

    pub fn set_reply(&self, reply: impl Into<String>) {
        let reply = reply.into();
        self.update(|backend| backend.reply = reply);
    }

    pub fn set_quiz(&self, quiz: GeneratedQuiz) {
        self.update(|backend| backend.quiz = Some(quiz));
    }

    pub fn set_result(&self, result: QuizResult) {
        self.update(|backend| backend.result = Some(result));
    }

    pub fn set_leaderboard(&self, snapshot: LeaderboardSnapshot) {
        self.update(|backend| backend.leaderboard = snapshot);
    }

    /// Makes every later `operation` answer with a 500.
    pub fn fail(&self, operation: Operation) {
        self.update(|backend| {
            backend.failing.insert(operation);
        });
    }

    pub fn recover(&self, operation: Operation) {
        self.update(|backend| {
            backend.failing.remove(&operation);
        });
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.with(|backend| backend.calls.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn history(&self, subject: Subject) -> Vec<HistoryEntry> {
        self.with(|backend| backend.histories.get(&subject).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Backend) -> R) -> Result<R, RequestFailure> {
        let mut guard = self
            .backend
            .lock()
            .map_err(|e| RequestFailure::Unavailable(e.to_string()))?;
        Ok(f(&mut guard))
    }

    fn try_with<R>(
        &self,
        f: impl FnOnce(&mut Backend) -> Result<R, RequestFailure>,
    ) -> Result<R, RequestFailure> {
        self.with(f)?
    }

    fn update(&self, f: impl FnOnce(&mut Backend)) {
        let _ = self.with(f);
    }
}

#[async_trait]
impl TutorApi for InMemoryTutorApi {
    async fn send_chat_message(
        &self,
        subject: Subject,
        message: &str,
        student_level: &str,
    ) -> Result<String, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::SendChat {
                subject,
                message: message.to_string(),
                student_level: student_level.to_string(),
            })?;
            let reply = backend.reply.clone();
            let history = backend.histories.entry(subject).or_default();
            history.push(HistoryEntry::new(ChatRole::User, message));
            history.push(HistoryEntry::new(ChatRole::Assistant, reply.clone()));
            Ok(reply)
        })
    }

    async fn fetch_history(&self, subject: Subject) -> Result<Vec<HistoryEntry>, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::FetchHistory(subject))?;
            Ok(backend.histories.get(&subject).cloned().unwrap_or_default())
        })
    }

    async fn clear_history(&self, subject: Subject) -> Result<(), RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::ClearHistory(subject))?;
            backend.histories.remove(&subject);
            Ok(())
        })
    }

    async fn generate_quiz(&self, request: &QuizRequest) -> Result<GeneratedQuiz, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::GenerateQuiz(request.clone()))?;
            let generated = match backend.quiz.clone() {
                Some(quiz) => quiz,
                None => backend.sample_quiz(request),
            };
            Ok(generated)
        })
    }

    async fn submit_quiz(
        &self,
        quiz_id: &QuizId,
        answers: &[usize],
    ) -> Result<QuizResult, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::SubmitQuiz {
                quiz_id: quiz_id.clone(),
                answers: answers.to_vec(),
            })?;
            if let Some(result) = backend.result.clone() {
                return Ok(result);
            }
            Ok(first_option_result(answers))
        })
    }

    async fn fetch_leaderboard(&self) -> Result<LeaderboardSnapshot, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::FetchLeaderboard)?;
            Ok(backend.leaderboard.clone())
        })
    }

    async fn fetch_subject_progress(
        &self,
        subject: Subject,
    ) -> Result<SubjectStats, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::FetchSubjectProgress(subject))?;
            Ok(backend.leaderboard.subject(subject))
        })
    }

    async fn service_info(&self) -> Result<ServiceInfo, RequestFailure> {
        self.try_with(|backend| {
            backend.record(ApiCall::ServiceInfo)?;
            Ok(ServiceInfo {
                message: "Tuteur Éducatif (mémoire)".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                subjects: Subject::ALL
                    .iter()
                    .map(|subject| subject.as_str().to_string())
                    .collect(),
            })
        })
    }
}

fn first_option_result(answers: &[usize]) -> QuizResult {
    let results: Vec<QuestionResult> = answers
        .iter()
        .enumerate()
        .map(|(index, &answer)| QuestionResult {
            question: format!("Question {}", index + 1),
            user_answer: answer.to_string(),
            is_correct: answer == 0,
            correct_answer: "0".to_string(),
            explanation: String::new(),
        })
        .collect();
    let total = results.len() as u32;
    let correct = results.iter().filter(|r| r.is_correct).count() as u32;
    let score = if total == 0 {
        0.0
    } else {
        (f64::from(correct) * 10_000.0 / f64::from(total)).round() / 100.0
    };
    let performance = if score >= 80.0 {
        "Excellent !"
    } else if score >= 50.0 {
        "Bien"
    } else {
        "À revoir"
    };
    QuizResult {
        score,
        correct,
        total,
        performance: performance.to_string(),
        results,
    }
}
