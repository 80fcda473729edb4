use crate::error::FailureNotice;
use crate::model::{
    Difficulty, GeneratedQuiz, HistoryEntry, LeaderboardSnapshot, QuizId, QuizRequest, QuizResult,
    Subject, SubjectStats,
};
use crate::store::Section;

/// Completion payload of an effect.
pub type Outcome<T> = Result<T, FailureNotice>;

/// Tags a chat request with the conversation it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatTicket {
    pub subject: Subject,
    pub epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTicket {
    pub epoch: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressTicket {
    pub sequence: u64,
}

/// Everything that can happen to the store: one variant per UI event, plus
/// one per request completion.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Init,
    Navigate(Section),
    DismissAlert,

    SelectChatSubject(Subject),
    EditChatInput(String),
    SendMessage,
    InputFocused,
    RequestClearHistory,
    CancelClearHistory,
    ConfirmClearHistory,
    ChatReplied {
        ticket: ChatTicket,
        outcome: Outcome<String>,
    },
    HistoryLoaded {
        ticket: ChatTicket,
        outcome: Outcome<Vec<HistoryEntry>>,
    },
    HistoryCleared {
        ticket: ChatTicket,
        outcome: Outcome<()>,
    },

    SelectQuizSubject(Subject),
    EditTopic(String),
    SelectDifficulty(Difficulty),
    SelectQuestionCount(u8),
    GenerateQuiz,
    SelectOption {
        question: usize,
        option: usize,
    },
    SubmitQuiz,
    ResetQuiz,
    QuizGenerated {
        ticket: QuizTicket,
        outcome: Outcome<GeneratedQuiz>,
    },
    QuizSubmitted {
        ticket: QuizTicket,
        outcome: Outcome<QuizResult>,
    },

    LeaderboardLoaded {
        ticket: ProgressTicket,
        outcome: Outcome<LeaderboardSnapshot>,
    },
    RefreshSubject(Subject),
    SubjectProgressLoaded {
        ticket: ProgressTicket,
        subject: Subject,
        outcome: Outcome<SubjectStats>,
    },
}

/// A request the store wants performed. Its completion comes back as the
/// matching `Action`.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SendChat {
        ticket: ChatTicket,
        message: String,
    },
    FetchHistory {
        ticket: ChatTicket,
    },
    ClearHistory {
        ticket: ChatTicket,
    },
    GenerateQuiz {
        ticket: QuizTicket,
        request: QuizRequest,
    },
    SubmitQuiz {
        ticket: QuizTicket,
        quiz_id: QuizId,
        answers: Vec<usize>,
    },
    FetchLeaderboard {
        ticket: ProgressTicket,
    },
    /// Refreshes one subject block of the current snapshot.
    FetchSubjectProgress {
        ticket: ProgressTicket,
        subject: Subject,
    },
}

impl Effect {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Effect::SendChat { .. } => "send_chat",
            Effect::FetchHistory { .. } => "fetch_history",
            Effect::ClearHistory { .. } => "clear_history",
            Effect::GenerateQuiz { .. } => "generate_quiz",
            Effect::SubmitQuiz { .. } => "submit_quiz",
            Effect::FetchLeaderboard { .. } => "fetch_leaderboard",
            Effect::FetchSubjectProgress { .. } => "fetch_subject_progress",
        }
    }
}
