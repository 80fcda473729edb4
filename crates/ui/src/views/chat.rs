use dioxus::document::eval;
use dioxus::prelude::*;
use tutor_core::store::{Action, Section};

use crate::store_handle::StoreHandle;
use crate::vm::{
    CLEAR_CONFIRM_TEXT, MessageBody, MessageVm, WELCOME_TEXT, WELCOME_TITLE, render_chat,
};

const SCROLL_TO_BOTTOM: &str =
    "const el = document.getElementById('chat-messages'); if (el) { el.scrollTop = el.scrollHeight; }";

#[component]
pub fn ChatView() -> Element {
    let handle = use_context::<StoreHandle>();
    {
        let handle = handle.clone();
        use_effect(move || handle.dispatch(Action::Navigate(Section::Chat)));
    }

    let vm = render_chat(&handle.store().read());

    let message_count = vm.messages.len();
    use_effect(use_reactive!(|message_count| {
        if message_count > 0 {
            let _ = eval(SCROLL_TO_BOTTOM);
        }
    }));

    let focus_input = vm.focus_input;
    {
        let handle = handle.clone();
        use_effect(use_reactive!(|focus_input| {
            if focus_input {
                let _ = eval("document.getElementById('chat-input')?.focus();");
                handle.dispatch(Action::InputFocused);
            }
        }));
    }

    let on_key = {
        let handle = handle.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
                evt.prevent_default();
                handle.dispatch(Action::SendMessage);
            }
        }
    };
    let on_input = {
        let handle = handle.clone();
        move |evt: FormEvent| handle.dispatch(Action::EditChatInput(evt.value()))
    };
    let on_send = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::SendMessage)
    };
    let on_clear = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::RequestClearHistory)
    };

    rsx! {
        section { class: "section chat-section",
            div { class: "subject-selector",
                for tab in vm.tabs {
                    button {
                        key: "{tab.subject}",
                        class: if tab.active { "subject-btn active" } else { "subject-btn" },
                        onclick: {
                            let handle = handle.clone();
                            move |_: MouseEvent| handle.dispatch(Action::SelectChatSubject(tab.subject))
                        },
                        "{tab.label}"
                    }
                }
                button { class: "btn btn-secondary", id: "clear-history-btn",
                    disabled: vm.clear_disabled, onclick: on_clear,
                    "🗑️ Effacer l'historique"
                }
            }

            div { class: "chat-messages", id: "chat-messages",
                if vm.show_welcome {
                    div { class: "welcome-message",
                        div { class: "welcome-icon", "👋" }
                        h2 { "{WELCOME_TITLE}" }
                        p { "{WELCOME_TEXT}" }
                    }
                }
                for (index, message) in vm.messages.into_iter().enumerate() {
                    ChatBubble { key: "{index}", message }
                }
            }

            div { class: "chat-input-container",
                textarea {
                    id: "chat-input",
                    class: "chat-input",
                    rows: "1",
                    placeholder: "Pose ta question...",
                    disabled: vm.input_disabled,
                    value: "{vm.input}",
                    oninput: on_input,
                    onkeydown: on_key,
                }
                button {
                    class: "btn btn-primary",
                    id: "send-btn",
                    disabled: vm.send_disabled,
                    onclick: on_send,
                    "Envoyer"
                }
            }

            if vm.confirm_clear {
                ClearConfirm {}
            }
        }
    }
}

#[component]
fn ChatBubble(message: MessageVm) -> Element {
    let content = match &message.body {
        MessageBody::Text(text) => rsx! {
            div { class: "message-text", "{text}" }
        },
        MessageBody::Html(html) => rsx! {
            div { class: "message-text", dangerous_inner_html: "{html}" }
        },
    };
    let bubble = rsx! {
        div { class: "message-content",
            {content}
            div { class: "message-time", "{message.time}" }
        }
    };
    let avatar = rsx! {
        div { class: "message-avatar", "{message.avatar}" }
    };

    rsx! {
        div { class: "{message.class}",
            if message.avatar_last {
                {bubble}
                {avatar}
            } else {
                {avatar}
                {bubble}
            }
        }
    }
}

#[component]
fn ClearConfirm() -> Element {
    let handle = use_context::<StoreHandle>();
    let on_cancel = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::CancelClearHistory)
    };
    let on_confirm = move |_: MouseEvent| handle.dispatch(Action::ConfirmClearHistory);

    rsx! {
        div { class: "modal-backdrop", role: "dialog",
            div { class: "modal",
                p { class: "modal-message", "{CLEAR_CONFIRM_TEXT}" }
                div { class: "modal-actions",
                    button { class: "btn btn-secondary", id: "clear-cancel", onclick: on_cancel, "Annuler" }
                    button { class: "btn btn-danger", id: "clear-confirm", onclick: on_confirm, "Effacer" }
                }
            }
        }
    }
}
