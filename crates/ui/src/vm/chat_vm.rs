use chrono::Local;
use tutor_core::model::{ChatMessage, ChatRole, Subject};
use tutor_core::store::{ChatStatus, Store};

use super::markdown::{looks_like_markdown, markdown_to_html};
use super::time_fmt::format_clock_time;

pub const WELCOME_TITLE: &str = "Bonjour ! Je suis ton tuteur personnel";
pub const WELCOME_TEXT: &str =
    "Sélectionne une matière et pose-moi tes questions. Je suis là pour t'aider à réussir !";
pub const CLEAR_CONFIRM_TEXT: &str =
    "Êtes-vous sûr de vouloir effacer l'historique de cette matière ?";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectTabVm {
    pub subject: Subject,
    pub label: String,
    pub active: bool,
}

/// Tabs for every known subject, with `selected` marked active.
#[must_use]
pub fn subject_tabs(selected: Subject) -> Vec<SubjectTabVm> {
    Subject::ALL
        .into_iter()
        .map(|subject| SubjectTabVm {
            subject,
            label: format!("{} {}", subject.icon(), subject.label()),
            active: subject == selected,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Html(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageVm {
    pub class: &'static str,
    pub avatar: &'static str,
    pub body: MessageBody,
    pub time: String,
    /// User messages put the avatar after the bubble.
    pub avatar_last: bool,
}

impl MessageVm {
    fn from_message(message: &ChatMessage) -> Self {
        let time = format_clock_time(&message.timestamp().with_timezone(&Local));
        match message.role() {
            ChatRole::User => Self {
                class: "message user",
                avatar: "👤",
                body: MessageBody::Text(message.content().to_string()),
                time,
                avatar_last: true,
            },
            ChatRole::Assistant => {
                let content = message.content();
                let body = if looks_like_markdown(content) {
                    MessageBody::Html(markdown_to_html(content))
                } else {
                    MessageBody::Text(content.to_string())
                };
                Self {
                    class: "message assistant",
                    avatar: "🤖",
                    body,
                    time,
                    avatar_last: false,
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub tabs: Vec<SubjectTabVm>,
    pub messages: Vec<MessageVm>,
    pub show_welcome: bool,
    pub input: String,
    pub input_disabled: bool,
    pub send_disabled: bool,
    pub clear_disabled: bool,
    pub confirm_clear: bool,
    pub focus_input: bool,
}

#[must_use]
pub fn render_chat(store: &Store) -> ChatVm {
    let chat = store.chat();
    let sending = chat.status() == ChatStatus::Sending;
    ChatVm {
        tabs: subject_tabs(store.session().chat_subject()),
        messages: chat.messages().iter().map(MessageVm::from_message).collect(),
        show_welcome: chat.shows_welcome(),
        input: chat.input().to_string(),
        input_disabled: sending,
        send_disabled: sending,
        clear_disabled: chat.is_busy(),
        confirm_clear: chat.is_confirming_clear(),
        focus_input: chat.wants_focus(),
    }
}

#[cfg(test)]
mod tests {
    use tutor_core::model::{CHAT_FALLBACK_REPLY, HistoryEntry};
    use tutor_core::store::{Action, ChatTicket, Effect};
    use tutor_core::time::fixed_clock;

    use super::*;

    fn sent(store: &mut Store, text: &str) -> ChatTicket {
        store.apply(Action::EditChatInput(text.to_string()));
        match store.apply(Action::SendMessage) {
            Some(Effect::SendChat { ticket, .. }) => ticket,
            other => panic!("expected a send, got {other:?}"),
        }
    }

    #[test]
    fn empty_conversation_shows_welcome_once_loaded() {
        let mut store = Store::new(fixed_clock());
        let Some(Effect::FetchHistory { ticket }) = store.apply(Action::Init) else {
            panic!("init should load history");
        };
        assert!(!render_chat(&store).show_welcome);

        store.apply(Action::HistoryLoaded {
            ticket,
            outcome: Ok(Vec::new()),
        });
        let vm = render_chat(&store);
        assert!(vm.show_welcome);
        assert!(vm.messages.is_empty());
        assert!(vm.tabs[0].active);
        assert!(!vm.tabs[1].active);
    }

    #[test]
    fn sending_locks_input_until_reply() {
        let mut store = Store::new(fixed_clock());
        let ticket = sent(&mut store, "Qui était Napoléon ?");

        let vm = render_chat(&store);
        assert!(vm.input_disabled && vm.send_disabled);
        assert!(vm.input.is_empty());
        assert_eq!(
            vm.messages[0].body,
            MessageBody::Text("Qui était Napoléon ?".into())
        );
        assert!(vm.messages[0].avatar_last);

        store.apply(Action::ChatReplied {
            ticket,
            outcome: Ok("**Napoléon Bonaparte**, empereur.".into()),
        });
        let vm = render_chat(&store);
        assert!(!vm.input_disabled && !vm.send_disabled);
        assert!(vm.focus_input);
        let MessageBody::Html(html) = &vm.messages[1].body else {
            panic!("markdown reply should render as html");
        };
        assert!(html.contains("<strong>Napoléon Bonaparte</strong>"));
        assert_eq!(vm.messages[1].avatar, "🤖");
    }

    #[test]
    fn clear_button_is_disabled_while_busy() {
        let mut store = Store::new(fixed_clock());
        let Some(Effect::FetchHistory { ticket: history }) = store.apply(Action::Init) else {
            panic!("init should load history");
        };
        assert!(render_chat(&store).clear_disabled);

        store.apply(Action::HistoryLoaded {
            ticket: history,
            outcome: Ok(Vec::new()),
        });
        assert!(!render_chat(&store).clear_disabled);

        let ticket = sent(&mut store, "Bonjour");
        assert!(render_chat(&store).clear_disabled);
        store.apply(Action::ChatReplied {
            ticket,
            outcome: Ok("Salut".into()),
        });
        assert!(!render_chat(&store).clear_disabled);
    }

    #[test]
    fn fallback_reply_is_plain_text() {
        let mut store = Store::new(fixed_clock());
        let ticket = sent(&mut store, "Bonjour");
        store.apply(Action::ChatReplied {
            ticket,
            outcome: Err(tutor_core::error::FailureNotice::new("offline")),
        });
        let vm = render_chat(&store);
        assert_eq!(
            vm.messages[1].body,
            MessageBody::Text(CHAT_FALLBACK_REPLY.into())
        );
    }

    #[test]
    fn history_entries_render_in_order() {
        let mut store = Store::new(fixed_clock());
        let Some(Effect::FetchHistory { ticket }) =
            store.apply(Action::SelectChatSubject(Subject::Svt))
        else {
            panic!("subject switch should load history");
        };
        store.apply(Action::HistoryLoaded {
            ticket,
            outcome: Ok(vec![
                HistoryEntry::new(ChatRole::User, "ADN ?"),
                HistoryEntry::new(ChatRole::Assistant, "Acide désoxyribonucléique."),
            ]),
        });
        let vm = render_chat(&store);
        assert_eq!(vm.messages.len(), 2);
        assert_eq!(vm.messages[0].class, "message user");
        assert_eq!(vm.messages[1].class, "message assistant");
        assert_eq!(vm.messages[1].time.len(), 5);
        assert!(vm.tabs[1].active);
    }
}
