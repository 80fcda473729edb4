use std::mem;

use tracing::debug;

use crate::error::{FailureNotice, ValidationFailure};
use crate::model::{
    DEFAULT_QUESTION_COUNT, Difficulty, GeneratedQuiz, Quiz, QuizRequest, QuizResult,
};
use crate::store::SessionState;
use crate::store::action::{Effect, Outcome, QuizTicket};

/// Inputs of the generator form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorForm {
    pub topic: String,
    pub difficulty: Difficulty,
    pub question_count: u8,
}

impl Default for GeneratorForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            difficulty: Difficulty::default(),
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

/// A quiz being answered. Each question holds at most one selected option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSheet {
    quiz: Quiz,
    selections: Vec<Option<usize>>,
}

impl QuizSheet {
    fn new(quiz: Quiz) -> Self {
        let selections = vec![None; quiz.question_count()];
        Self { quiz, selections }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    fn select(&mut self, question: usize, option: usize) -> bool {
        let in_range = self
            .quiz
            .questions
            .get(question)
            .is_some_and(|q| option < q.options.len());
        if in_range {
            self.selections[question] = Some(option);
        }
        in_range
    }

    /// One answer per question in order, or the first unanswered question.
    fn collect_answers(&self) -> Result<Vec<usize>, ValidationFailure> {
        self.selections
            .iter()
            .enumerate()
            .map(|(index, selected)| selected.ok_or(ValidationFailure::Unanswered { index }))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizReview {
    quiz: Quiz,
    result: QuizResult,
}

impl QuizReview {
    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn result(&self) -> &QuizResult {
        &self.result
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum QuizPhase {
    #[default]
    Generating,
    InProgress(QuizSheet),
    Reviewing(QuizReview),
}

/// Generate → answer → submit → review → reset.
///
/// `busy` covers the one request a phase may have in flight (generate while
/// `Generating`, submit while `InProgress`). `epoch` moves on every generate
/// and reset so completions for an abandoned quiz are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizState {
    form: GeneratorForm,
    phase: QuizPhase,
    busy: bool,
    epoch: u64,
}

impl QuizState {
    #[must_use]
    pub fn form(&self) -> &GeneratorForm {
        &self.form
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn form_mut(&mut self) -> &mut GeneratorForm {
        &mut self.form
    }

    pub(crate) fn begin_generate(
        &mut self,
        session: &SessionState,
    ) -> Result<Option<Effect>, ValidationFailure> {
        if self.busy || !matches!(self.phase, QuizPhase::Generating) {
            return Ok(None);
        }
        let topic = self.form.topic.trim();
        if topic.is_empty() {
            return Err(ValidationFailure::EmptyTopic);
        }
        let request = QuizRequest {
            subject: session.quiz_subject(),
            topic: topic.to_string(),
            difficulty: self.form.difficulty,
            num_questions: self.form.question_count,
        };
        self.busy = true;
        self.epoch += 1;
        Ok(Some(Effect::GenerateQuiz {
            ticket: QuizTicket { epoch: self.epoch },
            request,
        }))
    }

    pub(crate) fn finish_generate(
        &mut self,
        ticket: QuizTicket,
        outcome: Outcome<GeneratedQuiz>,
        session: &mut SessionState,
    ) -> Result<(), FailureNotice> {
        if ticket.epoch != self.epoch {
            debug!(epoch = ticket.epoch, "discarding generated quiz after reset");
            return Ok(());
        }
        self.busy = false;
        let generated = outcome?;
        session.start_quiz(generated.quiz_id);
        self.phase = QuizPhase::InProgress(QuizSheet::new(generated.quiz));
        Ok(())
    }

    pub(crate) fn select_option(&mut self, question: usize, option: usize) {
        if let QuizPhase::InProgress(sheet) = &mut self.phase {
            if !sheet.select(question, option) {
                debug!(question, option, "ignoring out-of-range selection");
            }
        }
    }

    pub(crate) fn begin_submit(
        &mut self,
        session: &mut SessionState,
    ) -> Result<Option<Effect>, ValidationFailure> {
        let QuizPhase::InProgress(sheet) = &self.phase else {
            return Ok(None);
        };
        if self.busy {
            return Ok(None);
        }
        let answers = sheet.collect_answers()?;
        let Some(quiz_id) = session.active_quiz_id().cloned() else {
            return Ok(None);
        };
        session.record_answers(answers.clone());
        self.busy = true;
        Ok(Some(Effect::SubmitQuiz {
            ticket: QuizTicket { epoch: self.epoch },
            quiz_id,
            answers,
        }))
    }

    pub(crate) fn finish_submit(
        &mut self,
        ticket: QuizTicket,
        outcome: Outcome<QuizResult>,
    ) -> Result<(), FailureNotice> {
        if ticket.epoch != self.epoch {
            debug!(epoch = ticket.epoch, "discarding quiz result after reset");
            return Ok(());
        }
        self.busy = false;
        let result = outcome?;
        self.phase = match mem::take(&mut self.phase) {
            QuizPhase::InProgress(sheet) => QuizPhase::Reviewing(QuizReview {
                quiz: sheet.quiz,
                result,
            }),
            other => other,
        };
        Ok(())
    }

    pub(crate) fn reset(&mut self, session: &mut SessionState) {
        session.end_quiz();
        self.form.topic.clear();
        self.phase = QuizPhase::Generating;
        self.busy = false;
        self.epoch += 1;
    }
}
