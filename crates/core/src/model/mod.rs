mod chat;
mod ids;
mod progress;
mod quiz;
mod subject;

pub use chat::{CHAT_FALLBACK_REPLY, ChatMessage, ChatRole, DEFAULT_STUDENT_LEVEL, HistoryEntry};
pub use ids::QuizId;
pub use progress::{
    Badge, DEFAULT_LEVEL_NAME, LeaderboardSnapshot, Level, RecentQuiz, SubjectStats,
};
pub use quiz::{
    DEFAULT_QUESTION_COUNT, GeneratedQuiz, QUESTION_COUNT_CHOICES, Question, QuestionResult, Quiz,
    QuizRequest, QuizResult,
};
pub use subject::{Difficulty, Subject};
