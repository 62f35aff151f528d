//! Revision queue: every topic due right now, most overdue first.

use askama::Template;
use axum::{extract::State, response::Html};
use chrono::Utc;

use crate::db::{self, LogOnError};
use crate::revision::{classify, RevisionStatus};
use crate::state::AppState;

use super::{error_page, status_badge};

#[derive(Template)]
#[template(path = "revision.html")]
pub struct RevisionTemplate {
  pub due: Vec<DueTopicRow>,
}

pub struct DueTopicRow {
  pub topic_id: i64,
  pub name: String,
  pub course_name: String,
  pub badge: String,
}

pub async fn revision_queue(State(state): State<AppState>) -> Html<String> {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page."),
  };

  let topics = db::get_all_topics(&conn).log_warn_default("Failed to load topics");
  let courses = db::get_all_courses(&conn).log_warn_default("Failed to load courses");
  let now = Utc::now();

  let mut due: Vec<(i64, DueTopicRow)> = topics
    .iter()
    .filter_map(|t| {
      let status = classify(t, now, &state.schedule);
      if !status.is_due() {
        return None;
      }
      // Never-revised topics have no interval to be late against; surface
      // them ahead of everything that does.
      let sort_key = match status {
        RevisionStatus::Scheduled { days_until_due, .. } => days_until_due,
        _ => i64::MIN,
      };
      let course_name = courses
        .iter()
        .find(|c| c.id == t.course_id)
        .map(|c| c.name.clone())
        .unwrap_or_default();
      Some((
        sort_key,
        DueTopicRow {
          topic_id: t.id,
          name: t.name.clone(),
          course_name,
          badge: status_badge(status),
        },
      ))
    })
    .collect();

  due.sort_by_key(|(key, _)| *key);

  let template = RevisionTemplate {
    due: due.into_iter().map(|(_, row)| row).collect(),
  };
  Html(template.render().unwrap_or_default())
}
