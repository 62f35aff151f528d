//! Natural-language study context for the LLM gateway.
//!
//! Builds the prompt context from the same classification the UI renders,
//! so the assistant and the dashboard never disagree about what is due.

use chrono::{DateTime, Utc};

use crate::domain::{Course, Department, Topic};
use crate::revision::{aggregate, classify, RevisionSchedule, RevisionStatus, Urgency};

/// One-line status phrase for a topic, chat register.
fn status_phrase(status: RevisionStatus) -> String {
  match status {
    RevisionStatus::NotApplicable => "not completed yet".to_string(),
    RevisionStatus::NeverRevised => "completed, first revision due now".to_string(),
    RevisionStatus::FullyRevised => "fully revised".to_string(),
    RevisionStatus::Scheduled {
      urgency,
      days_until_due,
    } => match urgency {
      Urgency::Overdue if days_until_due == 0 => "revision due now".to_string(),
      Urgency::Overdue => {
        let days = -days_until_due;
        format!("overdue by {} day{}", days, if days == 1 { "" } else { "s" })
      }
      Urgency::DueToday => "revision due today".to_string(),
      Urgency::Upcoming => format!("next revision in {} days", days_until_due),
    },
  }
}

/// Render the user's whole study state as prompt text.
///
/// Topics are grouped by course under department headings, each annotated
/// with its classification as of `now`. Courses and topics arrive in store
/// order, so the output is deterministic for a given snapshot.
pub fn build_study_context(
  departments: &[Department],
  courses: &[Course],
  topics: &[Topic],
  now: DateTime<Utc>,
  schedule: &RevisionSchedule,
) -> String {
  let stats = aggregate(topics, now, schedule);

  let mut out = format!(
    "Study overview: {} topic{} across {} course{}; {} completed ({}%); {} revision{} pending.\n",
    stats.total,
    if stats.total == 1 { "" } else { "s" },
    courses.len(),
    if courses.len() == 1 { "" } else { "s" },
    stats.completed,
    stats.completion_percentage(),
    stats.pending_revisions,
    if stats.pending_revisions == 1 { "" } else { "s" },
  );

  for department in departments {
    out.push_str(&format!("\nDepartment: {}\n", department.name));

    let dept_courses: Vec<&Course> = courses
      .iter()
      .filter(|c| c.department_id == department.id)
      .collect();
    if dept_courses.is_empty() {
      out.push_str("  (no courses yet)\n");
      continue;
    }

    for course in dept_courses {
      out.push_str(&format!("  Course: {}\n", course.name));

      let course_topics: Vec<&Topic> =
        topics.iter().filter(|t| t.course_id == course.id).collect();
      if course_topics.is_empty() {
        out.push_str("    (no topics yet)\n");
        continue;
      }

      for topic in course_topics {
        let status = classify(topic, now, schedule);
        out.push_str(&format!("    - {}: {}\n", topic.name, status_phrase(status)));
      }
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn fixtures() -> (Vec<Department>, Vec<Course>, Vec<Topic>, DateTime<Utc>) {
    let now = Utc::now();
    let departments = vec![
      Department {
        id: 1,
        name: "Science".to_string(),
        created_at: now,
      },
      Department {
        id: 2,
        name: "Languages".to_string(),
        created_at: now,
      },
    ];
    let courses = vec![
      Course {
        id: 10,
        department_id: 1,
        name: "Chemistry".to_string(),
        created_at: now,
      },
      Course {
        id: 11,
        department_id: 2,
        name: "Korean".to_string(),
        created_at: now,
      },
    ];
    let topics = vec![
      Topic {
        id: 100,
        course_id: 10,
        name: "Bonding".to_string(),
        completed: true,
        completed_at: Some(now - Duration::days(30)),
        revision_count: 1,
        last_revision_at: Some(now - Duration::days(9)),
        created_at: now,
      },
      Topic {
        id: 101,
        course_id: 10,
        name: "Stoichiometry".to_string(),
        completed: false,
        completed_at: None,
        revision_count: 0,
        last_revision_at: None,
        created_at: now,
      },
      Topic {
        id: 102,
        course_id: 11,
        name: "Hangul".to_string(),
        completed: true,
        completed_at: Some(now - Duration::days(200)),
        revision_count: 6,
        last_revision_at: Some(now - Duration::days(10)),
        created_at: now,
      },
    ];
    (departments, courses, topics, now)
  }

  #[test]
  fn test_context_contains_overview_line() {
    let (departments, courses, topics, now) = fixtures();
    let context = build_study_context(
      &departments,
      &courses,
      &topics,
      now,
      &RevisionSchedule::default(),
    );

    assert!(context.starts_with("Study overview: 3 topics across 2 courses"));
    assert!(context.contains("2 completed (67%)"));
    assert!(context.contains("1 revision pending"));
  }

  #[test]
  fn test_context_groups_by_hierarchy() {
    let (departments, courses, topics, now) = fixtures();
    let context = build_study_context(
      &departments,
      &courses,
      &topics,
      now,
      &RevisionSchedule::default(),
    );

    let science = context.find("Department: Science").unwrap();
    let chemistry = context.find("  Course: Chemistry").unwrap();
    let languages = context.find("Department: Languages").unwrap();
    assert!(science < chemistry);
    assert!(chemistry < languages);
  }

  #[test]
  fn test_context_status_phrases_match_classification() {
    let (departments, courses, topics, now) = fixtures();
    let context = build_study_context(
      &departments,
      &courses,
      &topics,
      now,
      &RevisionSchedule::default(),
    );

    // count 1, last revised 9 days ago, schedule[1] = 7 -> overdue by 2 days
    assert!(context.contains("- Bonding: overdue by 2 days"));
    assert!(context.contains("- Stoichiometry: not completed yet"));
    // count 6 is past the schedule length of 4
    assert!(context.contains("- Hangul: fully revised"));
  }

  #[test]
  fn test_empty_course_and_department_markers() {
    let now = Utc::now();
    let departments = vec![Department {
      id: 1,
      name: "Science".to_string(),
      created_at: now,
    }];
    let context =
      build_study_context(&departments, &[], &[], now, &RevisionSchedule::default());
    assert!(context.contains("(no courses yet)"));
  }

  #[test]
  fn test_status_phrase_singular_day() {
    let phrase = status_phrase(RevisionStatus::Scheduled {
      urgency: Urgency::Overdue,
      days_until_due: -1,
    });
    assert_eq!(phrase, "overdue by 1 day");
  }

  #[test]
  fn test_status_phrase_due_exactly_now() {
    let phrase = status_phrase(RevisionStatus::Scheduled {
      urgency: Urgency::Overdue,
      days_until_due: 0,
    });
    assert_eq!(phrase, "revision due now");
  }

  #[test]
  fn test_status_phrase_never_revised() {
    assert_eq!(
      status_phrase(RevisionStatus::NeverRevised),
      "completed, first revision due now"
    );
  }
}
