//! Topic handlers: course page with revision badges, create, delete, and the
//! two scheduler mutations (toggle completion, record revision).

use askama::Template;
use axum::{
  extract::{Path, State},
  response::{Html, IntoResponse, Redirect},
  Form,
};
use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::{self, LogOnError};
use crate::domain::Topic;
use crate::revision::{self, RevisionSchedule};
use crate::state::AppState;
use crate::validation::validate_name;

use super::{error_page, status_badge};

#[derive(Template)]
#[template(path = "course.html")]
pub struct CourseTemplate {
  pub course_id: i64,
  pub course_name: String,
  pub department_id: i64,
  pub topics: Vec<TopicRow>,
  pub completed_count: i64,
  pub total_count: i64,
  pub completion_percentage: i64,
  pub error: Option<String>,
}

pub struct TopicRow {
  pub id: i64,
  pub name: String,
  pub completed: bool,
  pub badge: String,
  pub can_revise: bool,
}

#[derive(Deserialize)]
pub struct TopicForm {
  pub name: String,
}

fn render_course(
  conn: &Connection,
  course_id: i64,
  schedule: &RevisionSchedule,
  error: Option<String>,
) -> axum::response::Response {
  let Some(course) = db::get_course_by_id(conn, course_id)
    .log_warn("Failed to load course")
    .flatten()
  else {
    return Redirect::to("/departments").into_response();
  };

  let topics = db::get_topics_by_course(conn, course_id).log_warn_default("Failed to load topics");
  let now = Utc::now();
  let stats = revision::aggregate(&topics, now, schedule);

  let rows = topics
    .iter()
    .map(|t| TopicRow {
      id: t.id,
      name: t.name.clone(),
      completed: t.completed,
      badge: status_badge(revision::classify(t, now, schedule)),
      can_revise: t.completed,
    })
    .collect();

  let template = CourseTemplate {
    course_id: course.id,
    course_name: course.name,
    department_id: course.department_id,
    topics: rows,
    completed_count: stats.completed,
    total_count: stats.total,
    completion_percentage: stats.completion_percentage(),
    error,
  };
  Html(template.render().unwrap_or_default()).into_response()
}

pub async fn course_page(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };
  render_course(&conn, id, &state.schedule, None)
}

pub async fn create(
  State(state): State<AppState>,
  Path(course_id): Path<i64>,
  Form(form): Form<TopicForm>,
) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  match validate_name(&form.name) {
    Ok(name) => {
      let _ = db::insert_topic(&conn, &Topic::new(course_id, name))
        .log_warn("Failed to insert topic");
      Redirect::to(&format!("/courses/{}", course_id)).into_response()
    }
    Err(e) => render_course(&conn, course_id, &state.schedule, Some(e.to_string())),
  }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  let course_id = db::get_topic_by_id(&conn, id)
    .log_warn("Failed to load topic")
    .flatten()
    .map(|t| t.course_id);

  let _ = db::delete_topic(&conn, id).log_warn("Failed to delete topic");

  match course_id {
    Some(course) => Redirect::to(&format!("/courses/{}", course)).into_response(),
    None => Redirect::to("/departments").into_response(),
  }
}

/// Flip completion state. Un-completing keeps the revision history.
pub async fn toggle(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  let Some(topic) = db::get_topic_by_id(&conn, id)
    .log_warn("Failed to load topic")
    .flatten()
  else {
    return Redirect::to("/departments").into_response();
  };

  let update = revision::toggle_completion(&topic, Utc::now());
  let _ = db::apply_completion(&conn, id, &update).log_warn("Failed to persist completion");

  Redirect::to(&format!("/courses/{}", topic.course_id)).into_response()
}

/// Record a revision. Rejected for incomplete topics with an inline notice
/// instead of a server error.
pub async fn revise(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  let Some(topic) = db::get_topic_by_id(&conn, id)
    .log_warn("Failed to load topic")
    .flatten()
  else {
    return Redirect::to("/departments").into_response();
  };

  match revision::record_revision(&topic, Utc::now()) {
    Ok(update) => {
      let _ = db::apply_revision(&conn, id, &update).log_warn("Failed to persist revision");
      Redirect::to(&format!("/courses/{}", topic.course_id)).into_response()
    }
    Err(e) => render_course(&conn, topic.course_id, &state.schedule, Some(e.to_string())),
  }
}
