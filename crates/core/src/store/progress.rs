use std::collections::BTreeSet;

use tracing::debug;

use crate::error::FailureNotice;
use crate::model::{LeaderboardSnapshot, Subject, SubjectStats};
use crate::store::action::{Effect, Outcome, ProgressTicket};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ProgressStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(FailureNotice),
}

/// Latest leaderboard and the state of its most recent fetch.
///
/// A failed fetch never touches `snapshot`; only the newest fetch may settle.
/// Subject refreshes patch one block of the snapshot they were issued
/// against and are dropped once a newer leaderboard fetch starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    snapshot: Option<LeaderboardSnapshot>,
    status: ProgressStatus,
    sequence: u64,
    refreshing: BTreeSet<Subject>,
}

impl ProgressState {
    #[must_use]
    pub fn snapshot(&self) -> Option<&LeaderboardSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> &ProgressStatus {
        &self.status
    }

    #[must_use]
    pub fn is_refreshing(&self, subject: Subject) -> bool {
        self.refreshing.contains(&subject)
    }

    pub(crate) fn begin_load(&mut self) -> Effect {
        self.sequence += 1;
        self.refreshing.clear();
        self.status = ProgressStatus::Loading;
        Effect::FetchLeaderboard {
            ticket: ProgressTicket {
                sequence: self.sequence,
            },
        }
    }

    pub(crate) fn finish_load(
        &mut self,
        ticket: ProgressTicket,
        outcome: Outcome<LeaderboardSnapshot>,
    ) -> Result<(), FailureNotice> {
        if ticket.sequence != self.sequence {
            debug!(sequence = ticket.sequence, "discarding superseded leaderboard");
            return Ok(());
        }
        match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.status = ProgressStatus::Ready;
                Ok(())
            }
            Err(failure) => {
                self.status = ProgressStatus::Failed(failure.clone());
                Err(failure)
            }
        }
    }

    /// Only a settled dashboard can be refreshed, one request per subject.
    pub(crate) fn begin_refresh(&mut self, subject: Subject) -> Option<Effect> {
        if self.snapshot.is_none() || self.status != ProgressStatus::Ready {
            return None;
        }
        if !self.refreshing.insert(subject) {
            return None;
        }
        Some(Effect::FetchSubjectProgress {
            ticket: ProgressTicket {
                sequence: self.sequence,
            },
            subject,
        })
    }

    pub(crate) fn finish_refresh(
        &mut self,
        ticket: ProgressTicket,
        subject: Subject,
        outcome: Outcome<SubjectStats>,
    ) -> Result<(), FailureNotice> {
        if ticket.sequence != self.sequence {
            debug!(%subject, "discarding subject progress for a replaced snapshot");
            return Ok(());
        }
        self.refreshing.remove(&subject);
        let stats = outcome?;
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.subjects.insert(subject, stats);
        }
        Ok(())
    }
}
