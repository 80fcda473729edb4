use dioxus::prelude::*;
use tutor_core::store::{Action, Section};

use crate::store_handle::StoreHandle;
use crate::vm::{
    DashboardVm, NO_BADGES_TEXT, NO_QUIZZES_TEXT, ProgressVm, SubjectBlockVm, render_progress,
};

#[component]
pub fn ProgressView() -> Element {
    let handle = use_context::<StoreHandle>();
    {
        let handle = handle.clone();
        use_effect(move || handle.dispatch(Action::Navigate(Section::Progress)));
    }

    let body = match render_progress(&handle.store().read()) {
        ProgressVm::Loading => rsx! {
            p { class: "text-muted", "Chargement de la progression..." }
        },
        ProgressVm::Failed(message) => rsx! {
            div { class: "error-banner", role: "alert", "{message}" }
        },
        ProgressVm::Dashboard(vm) => rsx! { Dashboard { vm } },
    };

    rsx! {
        section { class: "section progress-section",
            h2 { "📊 Ma progression" }
            {body}
        }
    }
}

#[component]
fn Dashboard(vm: DashboardVm) -> Element {
    let no_badges = vm.badges.is_empty();
    rsx! {
        div { class: "stats-grid",
            StatCard { id: "total-points", icon: "⭐", label: "Points totaux", value: vm.total_points }
            StatCard { id: "total-quizzes", icon: "📝", label: "Quiz complétés", value: vm.total_quizzes }
            StatCard { id: "level-name", icon: "🎓", label: "Niveau", value: vm.level_name }
            StatCard { id: "badges-count", icon: "🏆", label: "Badges", value: vm.badge_count }
        }

        div { class: "badges-section",
            h3 { "🏆 Mes badges" }
            div { class: "badges-container", id: "badges-container",
                if no_badges {
                    p { class: "text-muted", "{NO_BADGES_TEXT}" }
                }
                for badge in vm.badges {
                    div { key: "{badge.name}", class: "badge",
                        span { class: "badge-icon", "{badge.icon}" }
                        span { "{badge.name}" }
                    }
                }
            }
        }

        div { class: "subjects-progress",
            for block in vm.subjects {
                SubjectBlock { key: "{block.subject}", block }
            }
        }
    }
}

#[component]
fn StatCard(id: &'static str, icon: &'static str, label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            div { class: "stat-icon", "{icon}" }
            div { class: "stat-value", id: "{id}", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn SubjectBlock(block: SubjectBlockVm) -> Element {
    let handle = use_context::<StoreHandle>();
    let subject = block.subject;
    let on_refresh = move |_: MouseEvent| handle.dispatch(Action::RefreshSubject(subject));
    rsx! {
        div { class: "subject-progress", id: "progress-{block.subject}",
            div { class: "subject-progress-header",
                h3 { "{block.title}" }
                button {
                    class: "btn btn-small btn-secondary",
                    id: "refresh-{block.subject}",
                    disabled: block.refreshing,
                    onclick: on_refresh,
                    if block.refreshing { "Actualisation..." } else { "🔄 Actualiser" }
                }
            }
            div { class: "subject-stats",
                div { class: "subject-stat",
                    span { class: "subject-stat-label", "Points" }
                    span { class: "subject-stat-value", "{block.points}" }
                }
                div { class: "subject-stat",
                    span { class: "subject-stat-label", "Quiz" }
                    span { class: "subject-stat-value", "{block.quizzes}" }
                }
                div { class: "subject-stat",
                    span { class: "subject-stat-label", "Moyenne" }
                    span { class: "subject-stat-value", "{block.average}" }
                }
                div { class: "subject-stat",
                    span { class: "subject-stat-label", "Meilleur" }
                    span { class: "subject-stat-value", "{block.best}" }
                }
            }
            div { class: "recent-quizzes",
                if block.recent.is_empty() {
                    p { class: "text-muted", "{NO_QUIZZES_TEXT}" }
                } else {
                    h4 { "Quiz récents" }
                    for (index, quiz) in block.recent.into_iter().enumerate() {
                        div { key: "{index}", class: "recent-quiz-item",
                            span { class: "recent-quiz-topic", "{quiz.topic}" }
                            span { class: "recent-quiz-score", "{quiz.score}" }
                        }
                    }
                }
            }
        }
    }
}
