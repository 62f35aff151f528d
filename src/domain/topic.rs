use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The smallest trackable unit of study material.
///
/// A topic is the only entity carrying revision-scheduling state: whether it
/// has been completed, how many times it has been revised, and when the last
/// revision happened. Everything the scheduler computes derives from these
/// fields plus an externally supplied "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
  pub id: i64,
  pub course_id: i64,
  pub name: String,
  /// Whether the topic has been marked done at least once.
  pub completed: bool,
  /// Set when `completed` flips to true, cleared when it flips back.
  pub completed_at: Option<DateTime<Utc>>,
  /// Number of explicit revisions recorded. Only ever increments.
  pub revision_count: i64,
  /// Timestamp of the most recent revision; `None` until the first one.
  pub last_revision_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
}

impl Topic {
  pub fn new(course_id: i64, name: String) -> Self {
    Self {
      id: 0,
      course_id,
      name,
      completed: false,
      completed_at: None,
      revision_count: 0,
      last_revision_at: None,
      created_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_topic_new_defaults() {
    let topic = Topic::new(3, "Eigenvalues".to_string());

    assert_eq!(topic.id, 0);
    assert_eq!(topic.course_id, 3);
    assert_eq!(topic.name, "Eigenvalues");
    assert!(!topic.completed);
    assert!(topic.completed_at.is_none());
    assert_eq!(topic.revision_count, 0);
    assert!(topic.last_revision_at.is_none());
  }
}
