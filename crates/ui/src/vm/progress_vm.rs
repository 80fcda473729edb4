use tutor_core::model::{LeaderboardSnapshot, Subject};
use tutor_core::store::{PROGRESS_FAILED_ALERT, ProgressState, ProgressStatus, Store};

use super::time_fmt::format_percent;

pub const NO_BADGES_TEXT: &str = "Continue à apprendre pour débloquer des badges !";
pub const NO_QUIZZES_TEXT: &str = "Aucun quiz complété";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub icon: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentQuizVm {
    pub topic: String,
    pub score: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectBlockVm {
    pub subject: Subject,
    pub title: String,
    pub points: String,
    pub quizzes: String,
    pub average: String,
    pub best: String,
    /// Empty means the "no quiz yet" placeholder is shown instead.
    pub recent: Vec<RecentQuizVm>,
    pub refreshing: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub total_points: String,
    pub total_quizzes: String,
    pub level_name: String,
    pub badge_count: String,
    pub badges: Vec<BadgeVm>,
    pub subjects: Vec<SubjectBlockVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressVm {
    Loading,
    Failed(&'static str),
    Dashboard(DashboardVm),
}

#[must_use]
pub fn render_progress(store: &Store) -> ProgressVm {
    let progress = store.progress();
    if matches!(progress.status(), ProgressStatus::Failed(_)) {
        return ProgressVm::Failed(PROGRESS_FAILED_ALERT);
    }
    progress
        .snapshot()
        .map_or(ProgressVm::Loading, |snapshot| {
            ProgressVm::Dashboard(render_dashboard(snapshot, progress))
        })
}

fn render_dashboard(snapshot: &LeaderboardSnapshot, progress: &ProgressState) -> DashboardVm {
    let subjects = Subject::ALL
        .into_iter()
        .map(|subject| {
            let stats = snapshot.subject(subject);
            SubjectBlockVm {
                subject,
                title: format!("{} {}", subject.icon(), subject.label()),
                points: stats.total_points.to_string(),
                quizzes: stats.quizzes_completed.to_string(),
                average: format_percent(stats.avg_score),
                best: format_percent(stats.best_score),
                recent: stats
                    .recent_quizzes
                    .iter()
                    .map(|quiz| RecentQuizVm {
                        topic: quiz.topic.clone(),
                        score: format_percent(quiz.score),
                    })
                    .collect(),
                refreshing: progress.is_refreshing(subject),
            }
        })
        .collect();

    DashboardVm {
        total_points: snapshot.total_points.to_string(),
        total_quizzes: snapshot.total_quizzes.to_string(),
        level_name: snapshot.level_name().to_string(),
        badge_count: snapshot.badges.len().to_string(),
        badges: snapshot
            .badges
            .iter()
            .map(|badge| BadgeVm {
                icon: badge.icon.clone(),
                name: badge.name.clone(),
            })
            .collect(),
        subjects,
    }
}
