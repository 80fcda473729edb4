use dioxus::prelude::*;
use tracing::debug;
use tutor_core::model::Difficulty;
use tutor_core::store::{Action, Section};

use crate::store_handle::StoreHandle;
use crate::vm::{GeneratorVm, QuizVm, ReviewVm, SheetVm, render_quiz};

#[component]
pub fn QuizView() -> Element {
    let handle = use_context::<StoreHandle>();
    {
        let handle = handle.clone();
        use_effect(move || handle.dispatch(Action::Navigate(Section::Quiz)));
    }

    let body = match render_quiz(&handle.store().read()) {
        QuizVm::Generator(vm) => rsx! { QuizGenerator { vm } },
        QuizVm::Sheet(vm) => rsx! { QuizSheetView { vm } },
        QuizVm::Review(vm) => rsx! { QuizResults { vm } },
    };

    rsx! {
        section { class: "section quiz-section", {body} }
    }
}

#[component]
fn QuizGenerator(vm: GeneratorVm) -> Element {
    let handle = use_context::<StoreHandle>();
    let on_topic = {
        let handle = handle.clone();
        move |evt: FormEvent| handle.dispatch(Action::EditTopic(evt.value()))
    };
    let on_difficulty = {
        let handle = handle.clone();
        move |evt: FormEvent| match evt.value().parse::<Difficulty>() {
            Ok(difficulty) => handle.dispatch(Action::SelectDifficulty(difficulty)),
            Err(err) => debug!(%err, "ignoring difficulty"),
        }
    };
    let on_count = {
        let handle = handle.clone();
        move |evt: FormEvent| match evt.value().parse::<u8>() {
            Ok(count) => handle.dispatch(Action::SelectQuestionCount(count)),
            Err(err) => debug!(%err, "ignoring question count"),
        }
    };
    let on_generate = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::GenerateQuiz)
    };

    rsx! {
        div { class: "quiz-generator", id: "quiz-generator",
            h2 { "Générer un quiz" }
            div { class: "subject-selector",
                for tab in vm.tabs {
                    button {
                        key: "{tab.subject}",
                        class: if tab.active { "subject-btn-quiz active" } else { "subject-btn-quiz" },
                        onclick: {
                            let handle = handle.clone();
                            move |_: MouseEvent| handle.dispatch(Action::SelectQuizSubject(tab.subject))
                        },
                        "{tab.label}"
                    }
                }
            }
            div { class: "form-group",
                label { r#for: "quiz-topic", "Sujet du quiz" }
                input {
                    id: "quiz-topic",
                    r#type: "text",
                    placeholder: "Ex : La Révolution française, la photosynthèse...",
                    value: "{vm.topic}",
                    oninput: on_topic,
                }
            }
            div { class: "form-row",
                div { class: "form-group",
                    label { r#for: "quiz-difficulty", "Difficulté" }
                    select { id: "quiz-difficulty", onchange: on_difficulty,
                        for choice in vm.difficulties {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: choice.selected,
                                "{choice.label}"
                            }
                        }
                    }
                }
                div { class: "form-group",
                    label { r#for: "quiz-num-questions", "Nombre de questions" }
                    select { id: "quiz-num-questions", onchange: on_count,
                        for choice in vm.question_counts {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: choice.selected,
                                "{choice.label}"
                            }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "generate-quiz-btn",
                disabled: vm.generate_disabled,
                onclick: on_generate,
                "✨ Générer le quiz"
            }
        }
    }
}

#[component]
fn QuizSheetView(vm: SheetVm) -> Element {
    let handle = use_context::<StoreHandle>();
    let on_back = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::ResetQuiz)
    };
    let on_submit = {
        let handle = handle.clone();
        move |_: MouseEvent| handle.dispatch(Action::SubmitQuiz)
    };

    rsx! {
        div { class: "quiz-display", id: "quiz-display",
            div { class: "quiz-header",
                button { class: "btn btn-secondary", id: "back-to-generator", onclick: on_back, "← Retour" }
                h2 { id: "quiz-title", "{vm.title}" }
            }
            div { id: "quiz-questions",
                for question in vm.questions {
                    div { key: "{question.index}", class: "quiz-question",
                        div { class: "question-number", "{question.heading}" }
                        div { class: "question-text", "{question.prompt}" }
                        div { class: "question-options",
                            for option in question.options {
                                label { key: "{option.index}", class: "option-label",
                                    input {
                                        r#type: "radio",
                                        name: "question-{question.index}",
                                        value: "{option.index}",
                                        checked: option.checked,
                                        onchange: {
                                            let handle = handle.clone();
                                            let question = question.index;
                                            let option = option.index;
                                            move |_: FormEvent| {
                                                handle.dispatch(Action::SelectOption { question, option });
                                            }
                                        },
                                    }
                                    span { "{option.label}" }
                                }
                            }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "submit-quiz-btn",
                disabled: vm.submit_disabled,
                onclick: on_submit,
                "Valider mes réponses"
            }
        }
    }
}

#[component]
fn QuizResults(vm: ReviewVm) -> Element {
    let handle = use_context::<StoreHandle>();
    let on_new = move |_: MouseEvent| handle.dispatch(Action::ResetQuiz);

    rsx! {
        div { class: "quiz-results", id: "quiz-results",
            h2 { "{vm.title}" }
            div { class: "results-header",
                div { class: "results-score", id: "results-score", "{vm.score}" }
                div { class: "results-performance", id: "results-performance", "{vm.summary}" }
            }
            div { class: "results-details",
                for (index, line) in vm.lines.into_iter().enumerate() {
                    div { key: "{index}", class: "{line.class}",
                        div { class: "result-question",
                            strong { "{line.heading}" }
                            " {line.question}"
                        }
                        div { class: "result-answer user",
                            strong { "Ta réponse:" }
                            " {line.user_answer} {line.verdict}"
                        }
                        if let Some(correct) = line.correct_answer {
                            div { class: "result-answer correct-answer",
                                strong { "Bonne réponse:" }
                                " {correct}"
                            }
                        }
                        div { class: "result-explanation",
                            strong { "💡 Explication:" }
                            " {line.explanation}"
                        }
                    }
                }
            }
            button { class: "btn btn-primary", id: "new-quiz-btn", onclick: on_new, "🔄 Nouveau quiz" }
        }
    }
}
