//! Explicit client state and the transitions between its versions.
//!
//! UI events and request completions are both `Action`s. `Store::apply` is the
//! only way state changes; when a transition needs the network it returns an
//! `Effect` for the caller to perform, whose completion is applied in turn.

mod action;
mod chat;
mod progress;
mod quiz;
mod session;


use tracing::warn;

use crate::error::FailureNotice;
use crate::time::Clock;

pub use action::{Action, ChatTicket, Effect, Outcome, ProgressTicket, QuizTicket};
pub use chat::{ChatState, ChatStatus};
pub use progress::{ProgressState, ProgressStatus};
pub use quiz::{GeneratorForm, QuizPhase, QuizReview, QuizSheet, QuizState};
pub use session::SessionState;

pub const GENERATE_FAILED_ALERT: &str =
    "❌ Erreur lors de la génération du quiz. Vérifie que le serveur est bien démarré.";
pub const SUBMIT_FAILED_ALERT: &str = "❌ Erreur lors de la soumission du quiz";
pub const PROGRESS_FAILED_ALERT: &str = "❌ Erreur lors du chargement de la progression";
pub const SUBJECT_REFRESH_FAILED_ALERT: &str =
    "❌ Erreur lors de l'actualisation de la progression de la matière";
pub const CLEAR_FAILED_ALERT: &str = "Erreur lors de l'effacement de l'historique";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Chat,
    Quiz,
    Progress,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Chat, Section::Quiz, Section::Progress];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Section::Chat => "💬 Chat",
            Section::Quiz => "📝 Quiz",
            Section::Progress => "📊 Progression",
        }
    }
}

/// A blocking message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    message: String,
}

impl Alert {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    clock: Clock,
    section: Section,
    session: SessionState,
    chat: ChatState,
    quiz: QuizState,
    progress: ProgressState,
    alert: Option<Alert>,
    /// Requests that show the loading overlay while pending.
    in_flight: u32,
}

impl Store {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Applies one action and returns the request it calls for, if any.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Init => Some(self.chat.begin_history_load(self.session.chat_subject())),
            Action::Navigate(section) => {
                self.section = section;
                if section != Section::Progress {
                    return None;
                }
                let effect = self.progress.begin_load();
                Some(self.overlay(effect))
            }
            Action::DismissAlert => {
                self.alert = None;
                None
            }

            Action::SelectChatSubject(subject) => {
                self.session.set_chat_subject(subject);
                Some(self.chat.switch_subject(subject))
            }
            Action::EditChatInput(input) => {
                self.chat.set_input(input);
                None
            }
            Action::SendMessage => {
                let now = self.clock.now();
                let effect = self.chat.begin_send(self.session.chat_subject(), now)?;
                Some(self.overlay(effect))
            }
            Action::InputFocused => {
                self.chat.focus_taken();
                None
            }
            Action::RequestClearHistory => {
                self.chat.ask_clear();
                None
            }
            Action::CancelClearHistory => {
                self.chat.cancel_clear();
                None
            }
            Action::ConfirmClearHistory => {
                let effect = self.chat.confirm_clear(self.session.chat_subject())?;
                Some(self.overlay(effect))
            }
            Action::ChatReplied { ticket, outcome } => {
                self.settle();
                self.chat.finish_send(ticket, outcome, self.clock.now());
                None
            }
            Action::HistoryLoaded { ticket, outcome } => {
                self.chat
                    .finish_history_load(ticket, outcome, self.clock.now());
                None
            }
            Action::HistoryCleared { ticket, outcome } => {
                self.settle();
                match self
                    .chat
                    .finish_clear(ticket, outcome, self.session.chat_subject())
                {
                    Ok(reload) => reload,
                    Err(failure) => {
                        self.raise(&failure, CLEAR_FAILED_ALERT);
                        None
                    }
                }
            }

            Action::SelectQuizSubject(subject) => {
                self.session.set_quiz_subject(subject);
                None
            }
            Action::EditTopic(topic) => {
                self.quiz.form_mut().topic = topic;
                None
            }
            Action::SelectDifficulty(difficulty) => {
                self.quiz.form_mut().difficulty = difficulty;
                None
            }
            Action::SelectQuestionCount(count) => {
                self.quiz.form_mut().question_count = count;
                None
            }
            Action::GenerateQuiz => match self.quiz.begin_generate(&self.session) {
                Ok(effect) => effect.map(|effect| self.overlay(effect)),
                Err(invalid) => {
                    self.alert = Some(Alert::new(invalid.to_string()));
                    None
                }
            },
            Action::SelectOption { question, option } => {
                self.quiz.select_option(question, option);
                None
            }
            Action::SubmitQuiz => match self.quiz.begin_submit(&mut self.session) {
                Ok(effect) => effect.map(|effect| self.overlay(effect)),
                Err(invalid) => {
                    self.alert = Some(Alert::new(invalid.to_string()));
                    None
                }
            },
            Action::ResetQuiz => {
                self.quiz.reset(&mut self.session);
                None
            }
            Action::QuizGenerated { ticket, outcome } => {
                self.settle();
                if let Err(failure) =
                    self.quiz
                        .finish_generate(ticket, outcome, &mut self.session)
                {
                    self.raise(&failure, GENERATE_FAILED_ALERT);
                }
                None
            }
            Action::QuizSubmitted { ticket, outcome } => {
                self.settle();
                if let Err(failure) = self.quiz.finish_submit(ticket, outcome) {
                    self.raise(&failure, SUBMIT_FAILED_ALERT);
                }
                None
            }

            Action::LeaderboardLoaded { ticket, outcome } => {
                self.settle();
                if let Err(failure) = self.progress.finish_load(ticket, outcome) {
                    self.raise(&failure, PROGRESS_FAILED_ALERT);
                }
                None
            }
            Action::RefreshSubject(subject) => self.progress.begin_refresh(subject),
            Action::SubjectProgressLoaded {
                ticket,
                subject,
                outcome,
            } => {
                if let Err(failure) = self.progress.finish_refresh(ticket, subject, outcome) {
                    self.raise(&failure, SUBJECT_REFRESH_FAILED_ALERT);
                }
                None
            }
        }
    }

    fn overlay(&mut self, effect: Effect) -> Effect {
        self.in_flight += 1;
        effect
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn raise(&mut self, failure: &FailureNotice, message: &str) {
        warn!(%failure, "{message}");
        self.alert = Some(Alert::new(message));
    }
}
