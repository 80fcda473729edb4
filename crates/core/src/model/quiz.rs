use crate::model::{Difficulty, QuizId, Subject};

/// Question counts offered by the generator form.
pub const QUESTION_COUNT_CHOICES: [u8; 3] = [3, 5, 10];
pub const DEFAULT_QUESTION_COUNT: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
}

/// A generated quiz. Immutable once rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub quiz_id: QuizId,
    pub quiz: Quiz,
}

/// Parameters of a generate request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    pub subject: Subject,
    pub topic: String,
    pub difficulty: Difficulty,
    pub num_questions: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionResult {
    pub question: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Server-side scoring of a submitted quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizResult {
    /// Percentage, 0 to 100.
    pub score: f64,
    pub correct: u32,
    pub total: u32,
    pub performance: String,
    pub results: Vec<QuestionResult>,
}
