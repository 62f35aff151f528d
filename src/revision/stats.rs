//! Summary counts over a collection of topics.
//!
//! Folded from scratch on every call; the per-user dataset is small enough
//! that recomputing beats carrying cached state around.

use chrono::{DateTime, Utc};

use crate::domain::Topic;
use crate::revision::classify::{classify, RevisionStatus, Urgency};
use crate::revision::schedule::RevisionSchedule;

/// Aggregated revision statistics for a set of topics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyStats {
  pub total: i64,
  pub completed: i64,
  /// Topics whose classification is due right now: overdue, due today, or
  /// completed but never revised.
  pub pending_revisions: i64,
  pub overdue: i64,
  pub due_today: i64,
  pub never_revised: i64,
  pub upcoming: i64,
  pub fully_revised: i64,
}

impl StudyStats {
  /// Completion percentage rounded to the nearest whole percent.
  /// An empty set is 0%, never a division by zero.
  pub fn completion_percentage(&self) -> i64 {
    if self.total > 0 {
      (100.0 * self.completed as f64 / self.total as f64).round() as i64
    } else {
      0
    }
  }
}

/// Fold a collection of topics into summary counts as of `now`.
pub fn aggregate(topics: &[Topic], now: DateTime<Utc>, schedule: &RevisionSchedule) -> StudyStats {
  let mut stats = StudyStats::default();

  for topic in topics {
    stats.total += 1;
    if topic.completed {
      stats.completed += 1;
    }

    let status = classify(topic, now, schedule);
    if status.is_due() {
      stats.pending_revisions += 1;
    }

    match status {
      RevisionStatus::NotApplicable => {}
      RevisionStatus::NeverRevised => stats.never_revised += 1,
      RevisionStatus::FullyRevised => stats.fully_revised += 1,
      RevisionStatus::Scheduled { urgency, .. } => match urgency {
        Urgency::Overdue => stats.overdue += 1,
        Urgency::DueToday => stats.due_today += 1,
        Urgency::Upcoming => stats.upcoming += 1,
      },
    }
  }

  stats
}
