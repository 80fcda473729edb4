use crate::model::{QuizId, Subject};

/// Cross-view selections and the identity of the quiz being taken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    chat_subject: Subject,
    quiz_subject: Subject,
    active_quiz_id: Option<QuizId>,
    collected_answers: Vec<usize>,
}

impl SessionState {
    #[must_use]
    pub fn chat_subject(&self) -> Subject {
        self.chat_subject
    }

    #[must_use]
    pub fn quiz_subject(&self) -> Subject {
        self.quiz_subject
    }

    #[must_use]
    pub fn active_quiz_id(&self) -> Option<&QuizId> {
        self.active_quiz_id.as_ref()
    }

    /// One option index per question, in question order. Filled at submit.
    #[must_use]
    pub fn collected_answers(&self) -> &[usize] {
        &self.collected_answers
    }

    pub(crate) fn set_chat_subject(&mut self, subject: Subject) {
        self.chat_subject = subject;
    }

    pub(crate) fn set_quiz_subject(&mut self, subject: Subject) {
        self.quiz_subject = subject;
    }

    pub(crate) fn start_quiz(&mut self, quiz_id: QuizId) {
        self.active_quiz_id = Some(quiz_id);
        self.collected_answers.clear();
    }

    pub(crate) fn record_answers(&mut self, answers: Vec<usize>) {
        self.collected_answers = answers;
    }

    pub(crate) fn end_quiz(&mut self) {
        self.active_quiz_id = None;
        self.collected_answers.clear();
    }
}
