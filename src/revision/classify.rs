//! Canonical revision-status classification.
//!
//! Every consumer of a topic's revision state (dashboard stats, topic list
//! badges, the revision queue, the chat context builder) goes through
//! [`classify`]. There is exactly one place where the due/overdue boundary
//! lives.

use chrono::{DateTime, Utc};

use crate::domain::Topic;
use crate::revision::schedule::RevisionSchedule;

/// How urgent a scheduled revision is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
  /// The interval has elapsed (due days ago or exactly now).
  Overdue,
  /// Due within one day.
  DueToday,
  /// Due in more than one day.
  Upcoming,
}

/// Classification of a topic's revision state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionStatus {
  /// Incomplete topics carry no revision state.
  NotApplicable,
  /// Completed but never revised: due immediately.
  NeverRevised,
  /// Somewhere in the revision sequence.
  Scheduled {
    urgency: Urgency,
    /// Days until the next interval elapses. Non-positive when overdue;
    /// reported verbatim for display ("due in N days").
    days_until_due: i64,
  },
  /// The whole interval sequence has been worked through.
  FullyRevised,
}

impl RevisionStatus {
  /// Whether the topic needs attention right now (revision queue membership,
  /// pending-revision counts).
  pub fn is_due(&self) -> bool {
    match self {
      Self::NeverRevised => true,
      Self::Scheduled { urgency, .. } => {
        matches!(urgency, Urgency::Overdue | Urgency::DueToday)
      }
      _ => false,
    }
  }
}

/// Classify a topic's revision state as of `now`.
///
/// Pure function of its inputs: no clock reads, no storage access. Every
/// combination of `completed` / `revision_count` / `last_revision_at` maps to
/// a defined status, including degenerate ones (counts past the schedule
/// length, a last-revision timestamp in the future).
pub fn classify(topic: &Topic, now: DateTime<Utc>, schedule: &RevisionSchedule) -> RevisionStatus {
  if !topic.completed {
    return RevisionStatus::NotApplicable;
  }

  if topic.revision_count >= schedule.len() as i64 {
    return RevisionStatus::FullyRevised;
  }

  // No reference point means due now. Covers the normal never-revised case
  // (count 0) and the degenerate count > 0 with a missing timestamp.
  let last_revision_at = match topic.last_revision_at {
    Some(ts) if topic.revision_count > 0 => ts,
    _ => return RevisionStatus::NeverRevised,
  };

  let days_since = (now - last_revision_at).num_days();
  let days_until_due = schedule.interval_for(topic.revision_count) - days_since;

  let urgency = if days_until_due <= 0 {
    Urgency::Overdue
  } else if days_until_due <= 1 {
    Urgency::DueToday
  } else {
    Urgency::Upcoming
  };

  RevisionStatus::Scheduled {
    urgency,
    days_until_due,
  }
}
