use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::FailureNotice;
use crate::model::{CHAT_FALLBACK_REPLY, ChatMessage, ChatRole, HistoryEntry, Subject};
use crate::store::action::{ChatTicket, Effect, Outcome};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatStatus {
    #[default]
    Idle,
    Sending,
}

/// Rendered conversation for the selected chat subject.
///
/// `epoch` changes whenever the rendered conversation is replaced (subject
/// switch, history reload). Completions carrying an older epoch are dropped.
/// Messages appended while a history load is pending survive it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    input: String,
    status: ChatStatus,
    loading_history: bool,
    confirm_clear: bool,
    focus_input: bool,
    epoch: u64,
    /// Length of `messages` when the pending history load was issued.
    history_base: usize,
}

impl ChatState {
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn status(&self) -> ChatStatus {
        self.status
    }

    /// The welcome placeholder replaces an empty conversation once nothing
    /// is loading.
    #[must_use]
    pub fn shows_welcome(&self) -> bool {
        self.messages.is_empty() && !self.loading_history
    }

    #[must_use]
    pub fn is_loading_history(&self) -> bool {
        self.loading_history
    }

    /// A send or history load is pending; clearing is refused meanwhile.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status == ChatStatus::Sending || self.loading_history
    }

    #[must_use]
    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_clear
    }

    /// Set after a send settles; the view moves focus back to the input and
    /// acknowledges with `Action::InputFocused`.
    #[must_use]
    pub fn wants_focus(&self) -> bool {
        self.focus_input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn focus_taken(&mut self) {
        self.focus_input = false;
    }

    pub(crate) fn switch_subject(&mut self, subject: Subject) -> Effect {
        self.messages.clear();
        self.confirm_clear = false;
        self.begin_history_load(subject)
    }

    pub(crate) fn begin_history_load(&mut self, subject: Subject) -> Effect {
        self.epoch += 1;
        self.loading_history = true;
        self.history_base = self.messages.len();
        Effect::FetchHistory {
            ticket: ChatTicket {
                subject,
                epoch: self.epoch,
            },
        }
    }

    pub(crate) fn finish_history_load(
        &mut self,
        ticket: ChatTicket,
        outcome: Outcome<Vec<HistoryEntry>>,
        now: DateTime<Utc>,
    ) {
        if ticket.epoch != self.epoch {
            debug!(subject = %ticket.subject, "discarding stale chat history");
            return;
        }
        self.loading_history = false;
        match outcome {
            Ok(entries) => {
                let base = self.history_base.min(self.messages.len());
                let pending = self.messages.split_off(base);
                self.messages = entries
                    .into_iter()
                    .map(|entry| ChatMessage::new(entry.role, entry.content, now))
                    .chain(pending)
                    .collect();
            }
            Err(failure) => {
                warn!(subject = %ticket.subject, %failure, "chat history unavailable");
            }
        }
    }

    /// Optimistically appends the user's message and locks the input.
    ///
    /// Returns `None` for blank input or while a send is already in flight.
    pub(crate) fn begin_send(&mut self, subject: Subject, now: DateTime<Utc>) -> Option<Effect> {
        if self.status == ChatStatus::Sending {
            return None;
        }
        let message = self.input.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.messages
            .push(ChatMessage::new(ChatRole::User, message.clone(), now));
        self.input.clear();
        self.status = ChatStatus::Sending;
        self.focus_input = false;

        Some(Effect::SendChat {
            ticket: ChatTicket {
                subject,
                epoch: self.epoch,
            },
            message,
        })
    }

    pub(crate) fn finish_send(
        &mut self,
        ticket: ChatTicket,
        outcome: Outcome<String>,
        now: DateTime<Utc>,
    ) {
        self.status = ChatStatus::Idle;
        self.focus_input = true;

        if ticket.epoch != self.epoch {
            debug!(subject = %ticket.subject, "discarding chat reply for a replaced conversation");
            return;
        }

        let reply = outcome.unwrap_or_else(|failure| {
            warn!(subject = %ticket.subject, %failure, "chat send failed");
            CHAT_FALLBACK_REPLY.to_string()
        });
        self.messages
            .push(ChatMessage::new(ChatRole::Assistant, reply, now));
    }

    pub(crate) fn ask_clear(&mut self) {
        if self.is_busy() {
            debug!("clear requested while the conversation is busy");
            return;
        }
        self.confirm_clear = true;
    }

    pub(crate) fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }

    pub(crate) fn confirm_clear(&mut self, subject: Subject) -> Option<Effect> {
        if !self.confirm_clear {
            return None;
        }
        self.confirm_clear = false;
        if self.is_busy() {
            debug!(subject = %subject, "clear refused while the conversation is busy");
            return None;
        }
        Some(Effect::ClearHistory {
            ticket: ChatTicket {
                subject,
                epoch: self.epoch,
            },
        })
    }

    /// A successful clear reloads the conversation it was issued for, as long
    /// as that subject is still the one on screen.
    pub(crate) fn finish_clear(
        &mut self,
        ticket: ChatTicket,
        outcome: Outcome<()>,
        current: Subject,
    ) -> Result<Option<Effect>, FailureNotice> {
        outcome?;
        if ticket.subject != current {
            debug!(subject = %ticket.subject, "history cleared for a subject no longer shown");
            return Ok(None);
        }
        Ok(Some(self.begin_history_load(current)))
    }
}
