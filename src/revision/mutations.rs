//! State transitions for a topic's completion and revision fields.
//!
//! Both operations are pure: they take a snapshot and a timestamp and return
//! the fragment of fields to persist. The store integration applies the
//! fragment; nothing here touches storage. Concurrent callers racing on the
//! same topic resolve last-write-wins at the store; lost updates are a
//! documented limitation, not something the scheduler coordinates.

use chrono::{DateTime, Utc};

use crate::domain::Topic;

/// Error returned when a revision mutation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionError {
  /// Revisions are only meaningful for completed topics.
  TopicNotCompleted,
}

impl std::fmt::Display for RevisionError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::TopicNotCompleted => {
        write!(f, "Topic must be marked complete before recording a revision")
      }
    }
  }
}

impl std::error::Error for RevisionError {}

/// Fields changed by a recorded revision, for the caller to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionUpdate {
  pub revision_count: i64,
  pub last_revision_at: DateTime<Utc>,
}

/// Fields changed by a completion toggle, for the caller to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
  pub completed: bool,
  pub completed_at: Option<DateTime<Utc>>,
}

/// Record a revision of a completed topic at `now`.
///
/// Increments the count by exactly one and moves the due-date reference
/// point. The count is not capped at the schedule length; classification
/// treats anything at or past it as fully revised. Rejects incomplete
/// topics: a revision cannot precede completion.
pub fn record_revision(topic: &Topic, now: DateTime<Utc>) -> Result<RevisionUpdate, RevisionError> {
  if !topic.completed {
    return Err(RevisionError::TopicNotCompleted);
  }

  Ok(RevisionUpdate {
    revision_count: topic.revision_count + 1,
    last_revision_at: now,
  })
}

/// Flip a topic's completion flag at `now`.
///
/// Completing sets `completed_at`; un-completing clears it but leaves the
/// revision history in place. Un-completing is a correction, not a reset:
/// re-completing resumes the schedule where it left off.
pub fn toggle_completion(topic: &Topic, now: DateTime<Utc>) -> CompletionUpdate {
  if topic.completed {
    CompletionUpdate {
      completed: false,
      completed_at: None,
    }
  } else {
    CompletionUpdate {
      completed: true,
      completed_at: Some(now),
    }
  }
}
