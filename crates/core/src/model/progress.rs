use std::collections::BTreeMap;

use crate::model::Subject;

/// Shown when the server did not report a level.
pub const DEFAULT_LEVEL_NAME: &str = "Débutant";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub icon: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecentQuiz {
    pub topic: String,
    pub score: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubjectStats {
    pub level: Option<Level>,
    pub total_points: u64,
    pub interactions: u32,
    pub quizzes_completed: u32,
    pub avg_score: f64,
    pub best_score: f64,
    /// Most recent first, as sent by the server.
    pub recent_quizzes: Vec<RecentQuiz>,
}

/// Aggregate and per-subject statistics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeaderboardSnapshot {
    pub total_points: u64,
    pub total_quizzes: u32,
    pub badges: Vec<Badge>,
    pub subjects: BTreeMap<Subject, SubjectStats>,
}

impl LeaderboardSnapshot {
    /// Stats for `subject`; a subject the server left out reads as empty.
    #[must_use]
    pub fn subject(&self, subject: Subject) -> SubjectStats {
        self.subjects.get(&subject).cloned().unwrap_or_default()
    }

    /// The headline level is the one reported for the default subject.
    #[must_use]
    pub fn level_name(&self) -> &str {
        self.subjects
            .get(&Subject::default())
            .and_then(|stats| stats.level.as_ref())
            .map(|level| level.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_LEVEL_NAME)
    }
}
