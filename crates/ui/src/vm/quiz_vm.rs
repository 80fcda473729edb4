use tutor_core::model::{Difficulty, QUESTION_COUNT_CHOICES};
use tutor_core::store::{QuizPhase, QuizReview, QuizSheet, Store};

use super::chat_vm::{SubjectTabVm, subject_tabs};
use super::time_fmt::format_percent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm<T> {
    pub value: T,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorVm {
    pub tabs: Vec<SubjectTabVm>,
    pub topic: String,
    pub difficulties: Vec<ChoiceVm<Difficulty>>,
    pub question_counts: Vec<ChoiceVm<u8>>,
    pub generate_disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub heading: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetVm {
    pub title: String,
    pub questions: Vec<QuestionVm>,
    pub submit_disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultLineVm {
    pub class: &'static str,
    pub heading: String,
    pub question: String,
    pub user_answer: String,
    pub verdict: &'static str,
    /// Only shown when the answer was wrong.
    pub correct_answer: Option<String>,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub title: String,
    pub score: String,
    pub summary: String,
    pub lines: Vec<ResultLineVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Generator(GeneratorVm),
    Sheet(SheetVm),
    Review(ReviewVm),
}

#[must_use]
pub fn render_quiz(store: &Store) -> QuizVm {
    let quiz = store.quiz();
    match quiz.phase() {
        QuizPhase::Generating => {
            let form = quiz.form();
            QuizVm::Generator(GeneratorVm {
                tabs: subject_tabs(store.session().quiz_subject()),
                topic: form.topic.clone(),
                difficulties: Difficulty::ALL
                    .into_iter()
                    .map(|value| ChoiceVm {
                        value,
                        label: value.label().to_string(),
                        selected: value == form.difficulty,
                    })
                    .collect(),
                question_counts: QUESTION_COUNT_CHOICES
                    .into_iter()
                    .map(|value| ChoiceVm {
                        value,
                        label: format!("{value} questions"),
                        selected: value == form.question_count,
                    })
                    .collect(),
                generate_disabled: quiz.is_busy(),
            })
        }
        QuizPhase::InProgress(sheet) => QuizVm::Sheet(render_sheet(sheet, quiz.is_busy())),
        QuizPhase::Reviewing(review) => QuizVm::Review(render_review(review)),
    }
}

fn render_sheet(sheet: &QuizSheet, busy: bool) -> SheetVm {
    let questions = sheet
        .quiz()
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = sheet.selection(index);
            QuestionVm {
                index,
                heading: format!("Question {}", index + 1),
                prompt: question.prompt.clone(),
                options: question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(option, label)| OptionVm {
                        index: option,
                        label: label.clone(),
                        checked: selected == Some(option),
                    })
                    .collect(),
            }
        })
        .collect();

    SheetVm {
        title: sheet.quiz().title.clone(),
        questions,
        submit_disabled: busy,
    }
}

fn render_review(review: &QuizReview) -> ReviewVm {
    let result = review.result();
    let lines = result
        .results
        .iter()
        .enumerate()
        .map(|(index, line)| ResultLineVm {
            class: if line.is_correct {
                "result-item correct"
            } else {
                "result-item incorrect"
            },
            heading: format!("Question {}:", index + 1),
            question: line.question.clone(),
            user_answer: line.user_answer.clone(),
            verdict: if line.is_correct { "✅" } else { "❌" },
            correct_answer: (!line.is_correct).then(|| line.correct_answer.clone()),
            explanation: line.explanation.clone(),
        })
        .collect();

    ReviewVm {
        title: review.quiz().title.clone(),
        score: format_percent(result.score),
        summary: format!("{}/{} - {}", result.correct, result.total, result.performance),
        lines,
    }
}
