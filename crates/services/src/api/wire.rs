//! JSON shapes exchanged with the API and their mapping onto the domain model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tutor_core::model::{
    Badge, ChatRole, Difficulty, GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, Level,
    Question, QuestionResult, Quiz, QuizId, QuizRequest, QuizResult, RecentQuiz, Subject,
    SubjectStats,
};

use crate::api::ServiceInfo;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    pub subject: Subject,
    pub student_level: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryItem {
    role: ChatRole,
    content: String,
}

impl From<HistoryItem> for HistoryEntry {
    fn from(item: HistoryItem) -> Self {
        HistoryEntry::new(item.role, item.content)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    subject: Subject,
    topic: &'a str,
    difficulty: Difficulty,
    num_questions: u8,
}

impl<'a> From<&'a QuizRequest> for GenerateRequest<'a> {
    fn from(request: &'a QuizRequest) -> Self {
        Self {
            subject: request.subject,
            topic: &request.topic,
            difficulty: request.difficulty,
            num_questions: request.num_questions,
        }
    }
}

/// The generator also returns correct answers and explanations; the client
/// deliberately ignores them and leaves scoring to the server.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    quiz_id: QuizId,
    quiz: QuizBody,
}

#[derive(Debug, Deserialize)]
struct QuizBody {
    title: String,
    questions: Vec<QuestionBody>,
}

#[derive(Debug, Deserialize)]
struct QuestionBody {
    question: String,
    options: Vec<String>,
}

impl From<GenerateResponse> for GeneratedQuiz {
    fn from(body: GenerateResponse) -> Self {
        GeneratedQuiz {
            quiz_id: body.quiz_id,
            quiz: Quiz {
                title: body.quiz.title,
                questions: body
                    .quiz
                    .questions
                    .into_iter()
                    .map(|q| Question {
                        prompt: q.question,
                        options: q.options,
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub quiz_id: &'a QuizId,
    pub answers: &'a [usize],
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    score: f64,
    correct: u32,
    total: u32,
    performance: String,
    results: Vec<ResultItem>,
}

#[derive(Debug, Deserialize)]
struct ResultItem {
    question: String,
    user_answer: String,
    is_correct: bool,
    correct_answer: String,
    explanation: String,
}

impl From<SubmitResponse> for QuizResult {
    fn from(body: SubmitResponse) -> Self {
        QuizResult {
            score: body.score,
            correct: body.correct,
            total: body.total,
            performance: body.performance,
            results: body
                .results
                .into_iter()
                .map(|r| QuestionResult {
                    question: r.question,
                    user_answer: r.user_answer,
                    is_correct: r.is_correct,
                    correct_answer: r.correct_answer,
                    explanation: r.explanation,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeaderboardResponse {
    total_points: u64,
    total_quizzes: u32,
    #[serde(default)]
    badges: Vec<BadgeItem>,
    #[serde(default)]
    subjects: BTreeMap<String, SubjectStatsBody>,
}

#[derive(Debug, Deserialize)]
struct BadgeItem {
    icon: String,
    name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectStatsBody {
    #[serde(default)]
    level: Option<LevelBody>,
    #[serde(default)]
    total_points: u64,
    #[serde(default)]
    interactions: u32,
    #[serde(default)]
    quizzes_completed: u32,
    #[serde(default)]
    avg_score: f64,
    #[serde(default)]
    best_score: f64,
    #[serde(default)]
    recent_quizzes: Vec<RecentQuizItem>,
}

#[derive(Debug, Deserialize)]
struct LevelBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecentQuizItem {
    topic: String,
    score: f64,
}

impl From<SubjectStatsBody> for SubjectStats {
    fn from(body: SubjectStatsBody) -> Self {
        SubjectStats {
            level: body.level.map(|level| Level {
                name: level.name,
                icon: level.icon,
            }),
            total_points: body.total_points,
            interactions: body.interactions,
            quizzes_completed: body.quizzes_completed,
            avg_score: body.avg_score,
            best_score: body.best_score,
            recent_quizzes: body
                .recent_quizzes
                .into_iter()
                .map(|q| RecentQuiz {
                    topic: q.topic,
                    score: q.score,
                })
                .collect(),
        }
    }
}

impl From<LeaderboardResponse> for LeaderboardSnapshot {
    fn from(body: LeaderboardResponse) -> Self {
        let subjects = body
            .subjects
            .into_iter()
            .filter_map(|(name, stats)| match name.parse::<Subject>() {
                Ok(subject) => Some((subject, SubjectStats::from(stats))),
                Err(unknown) => {
                    debug!(%unknown, "skipping stats for unknown subject");
                    None
                }
            })
            .collect();

        LeaderboardSnapshot {
            total_points: body.total_points,
            total_quizzes: body.total_quizzes,
            badges: body
                .badges
                .into_iter()
                .map(|b| Badge {
                    icon: b.icon,
                    name: b.name,
                })
                .collect(),
            subjects,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceInfoResponse {
    message: String,
    version: String,
    #[serde(default)]
    subjects: Vec<String>,
}

impl From<ServiceInfoResponse> for ServiceInfo {
    fn from(body: ServiceInfoResponse) -> Self {
        ServiceInfo {
            message: body.message,
            version: body.version,
            subjects: body.subjects,
        }
    }
}
