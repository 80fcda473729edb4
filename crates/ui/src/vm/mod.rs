mod chat_vm;
mod markdown;
mod progress_vm;
mod quiz_vm;
mod shell_vm;
mod time_fmt;

pub use chat_vm::{
    CLEAR_CONFIRM_TEXT, ChatVm, MessageBody, MessageVm, SubjectTabVm, WELCOME_TEXT,
    WELCOME_TITLE, render_chat, subject_tabs,
};
pub use markdown::{looks_like_markdown, markdown_to_html, sanitize_html};
pub use progress_vm::{
    BadgeVm, DashboardVm, NO_BADGES_TEXT, NO_QUIZZES_TEXT, ProgressVm, RecentQuizVm,
    SubjectBlockVm, render_progress,
};
pub use quiz_vm::{
    ChoiceVm, GeneratorVm, OptionVm, QuestionVm, QuizVm, ResultLineVm, ReviewVm, SheetVm,
    render_quiz,
};
pub use shell_vm::{NavItemVm, ShellVm, render_shell};
pub use time_fmt::{format_clock_time, format_percent};
