pub mod chat;
pub mod courses;
pub mod departments;
pub mod revision;
pub mod topics;

use askama::Template;
use axum::{
  extract::State,
  response::Html,
  routing::{get, post},
  Router,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::db::{self, LogOnError};
use crate::revision::{aggregate, classify, RevisionStatus, Urgency};
use crate::state::AppState;

/// Short badge text for a topic's revision status, shared by every list view.
pub(crate) fn status_badge(status: RevisionStatus) -> String {
  match status {
    RevisionStatus::NotApplicable => "not completed".to_string(),
    RevisionStatus::NeverRevised => "due now".to_string(),
    RevisionStatus::FullyRevised => "fully revised".to_string(),
    RevisionStatus::Scheduled {
      urgency,
      days_until_due,
    } => match urgency {
      Urgency::Overdue if days_until_due == 0 => "due now".to_string(),
      Urgency::Overdue => format!("overdue by {}d", -days_until_due),
      Urgency::DueToday => "due today".to_string(),
      Urgency::Upcoming => format!("in {} days", days_until_due),
    },
  }
}

pub(crate) fn error_page(message: &str) -> Html<String> {
  Html(format!("<h1>Database Error</h1><p>{}</p>", message))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub total_topics: i64,
  pub completed_topics: i64,
  pub completion_percentage: i64,
  pub pending_revisions: i64,
  pub overdue: i64,
  pub due_today: i64,
  pub never_revised: i64,
  pub due_rows: Vec<DueRow>,
}

pub struct DueRow {
  pub topic_id: i64,
  pub name: String,
  pub course_name: String,
  pub badge: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page."),
  };

  let topics = db::get_all_topics(&conn).log_warn_default("Failed to load topics");
  let courses = db::get_all_courses(&conn).log_warn_default("Failed to load courses");

  let now = Utc::now();
  let stats = aggregate(&topics, now, &state.schedule);

  let course_name = |course_id: i64| {
    courses
      .iter()
      .find(|c| c.id == course_id)
      .map(|c| c.name.clone())
      .unwrap_or_default()
  };

  let due_rows = topics
    .iter()
    .filter(|t| classify(t, now, &state.schedule).is_due())
    .map(|t| DueRow {
      topic_id: t.id,
      name: t.name.clone(),
      course_name: course_name(t.course_id),
      badge: status_badge(classify(t, now, &state.schedule)),
    })
    .collect();

  let template = IndexTemplate {
    total_topics: stats.total,
    completed_topics: stats.completed,
    completion_percentage: stats.completion_percentage(),
    pending_revisions: stats.pending_revisions,
    overdue: stats.overdue,
    due_today: stats.due_today,
    never_revised: stats.never_revised,
    due_rows,
  };

  Html(template.render().unwrap_or_default())
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route(
      "/departments",
      get(departments::list_page).post(departments::create),
    )
    .route("/departments/{id}", get(courses::department_page))
    .route("/departments/{id}/delete", post(departments::delete))
    .route("/departments/{id}/courses", post(courses::create))
    .route("/courses/{id}", get(topics::course_page))
    .route("/courses/{id}/delete", post(courses::delete))
    .route("/courses/{id}/topics", post(topics::create))
    .route("/topics/{id}/delete", post(topics::delete))
    .route("/topics/{id}/toggle", post(topics::toggle))
    .route("/topics/{id}/revise", post(topics::revise))
    .route("/revision", get(revision::revision_queue))
    .route("/chat", get(chat::chat_page).post(chat::ask_assistant))
    .nest_service("/static", ServeDir::new("static"))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::chat::gateway::GatewayConfig;
  use crate::revision::RevisionSchedule;
  use axum::http::StatusCode;
  use axum_test::TestServer;
  use serde_json::json;
  use tempfile::TempDir;

  fn test_server() -> (TestServer, TempDir) {
    let temp = TempDir::new().unwrap();
    let pool = db::init_db(&temp.path().join("test.db")).unwrap();
    let state = AppState::new(
      pool,
      RevisionSchedule::default(),
      GatewayConfig::default(),
    );
    (TestServer::new(router(state)).unwrap(), temp)
  }

  #[tokio::test]
  async fn test_dashboard_renders_empty() {
    let (server, _temp) = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("0%"));
  }

  #[tokio::test]
  async fn test_create_and_list_department() {
    let (server, _temp) = test_server();

    let response = server
      .post("/departments")
      .form(&json!({"name": "Computer Science"}))
      .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let response = server.get("/departments").await;
    response.assert_status_ok();
    assert!(response.text().contains("Computer Science"));
  }

  #[tokio::test]
  async fn test_invalid_department_name_shows_error() {
    let (server, _temp) = test_server();

    let response = server.post("/departments").form(&json!({"name": "   "})).await;
    response.assert_status_ok();
    assert!(response.text().contains("Name cannot be empty"));
  }

  #[tokio::test]
  async fn test_full_hierarchy_and_revision_flow() {
    let (server, _temp) = test_server();

    server
      .post("/departments")
      .form(&json!({"name": "Science"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);
    server
      .post("/departments/1/courses")
      .form(&json!({"name": "Chemistry"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);
    server
      .post("/courses/1/topics")
      .form(&json!({"name": "Bonding"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);

    // Not completed yet: recording a revision is rejected with a notice
    let response = server.post("/topics/1/revise").await;
    response.assert_status_ok();
    assert!(response.text().contains("marked complete"));

    // Complete it, then revise
    server.post("/topics/1/toggle").await.assert_status(StatusCode::SEE_OTHER);
    server.post("/topics/1/revise").await.assert_status(StatusCode::SEE_OTHER);

    // Freshly revised: schedule[1] = 7 days out
    let response = server.get("/courses/1").await;
    response.assert_status_ok();
    assert!(response.text().contains("in 7 days"));
  }

  #[tokio::test]
  async fn test_dashboard_counts_completed_topic_as_due() {
    let (server, _temp) = test_server();

    server
      .post("/departments")
      .form(&json!({"name": "Science"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);
    server
      .post("/departments/1/courses")
      .form(&json!({"name": "Chemistry"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);
    server
      .post("/courses/1/topics")
      .form(&json!({"name": "Bonding"}))
      .await
      .assert_status(StatusCode::SEE_OTHER);
    server.post("/topics/1/toggle").await.assert_status(StatusCode::SEE_OTHER);

    // Completed but never revised shows up in the due list
    let response = server.get("/").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Bonding"));
    assert!(text.contains("due now"));
  }

  #[tokio::test]
  async fn test_revision_queue_empty_message() {
    let (server, _temp) = test_server();
    let response = server.get("/revision").await;
    response.assert_status_ok();
    assert!(response.text().contains("Nothing to revise"));
  }
}
