//! Course handlers: one department's course list, create, delete.

use askama::Template;
use axum::{
  extract::{Path, State},
  response::{Html, IntoResponse, Redirect},
  Form,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::{self, LogOnError};
use crate::domain::Course;
use crate::state::AppState;
use crate::validation::validate_name;

use super::error_page;

#[derive(Template)]
#[template(path = "department.html")]
pub struct DepartmentTemplate {
  pub department_id: i64,
  pub department_name: String,
  pub courses: Vec<CourseRow>,
  pub error: Option<String>,
}

pub struct CourseRow {
  pub id: i64,
  pub name: String,
  pub topic_count: i64,
}

#[derive(Deserialize)]
pub struct CourseForm {
  pub name: String,
}

fn render_department(
  conn: &Connection,
  department_id: i64,
  error: Option<String>,
) -> axum::response::Response {
  let Some(department) = db::get_department_by_id(conn, department_id)
    .log_warn("Failed to load department")
    .flatten()
  else {
    return Redirect::to("/departments").into_response();
  };

  let courses = db::get_courses_by_department(conn, department_id)
    .log_warn_default("Failed to load courses")
    .into_iter()
    .map(|c| CourseRow {
      topic_count: db::count_topics(conn, c.id).log_warn_default("Failed to count topics"),
      id: c.id,
      name: c.name,
    })
    .collect();

  let template = DepartmentTemplate {
    department_id: department.id,
    department_name: department.name,
    courses,
    error,
  };
  Html(template.render().unwrap_or_default()).into_response()
}

pub async fn department_page(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };
  render_department(&conn, id, None)
}

pub async fn create(
  State(state): State<AppState>,
  Path(department_id): Path<i64>,
  Form(form): Form<CourseForm>,
) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  match validate_name(&form.name) {
    Ok(name) => {
      let _ = db::insert_course(&conn, &Course::new(department_id, name))
        .log_warn("Failed to insert course");
      Redirect::to(&format!("/departments/{}", department_id)).into_response()
    }
    Err(e) => render_department(&conn, department_id, Some(e.to_string())),
  }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  // Resolve the parent before the row disappears so we can land back on it
  let department_id = db::get_course_by_id(&conn, id)
    .log_warn("Failed to load course")
    .flatten()
    .map(|c| c.department_id);

  let _ = db::delete_course(&conn, id).log_warn("Failed to delete course");

  match department_id {
    Some(dept) => Redirect::to(&format!("/departments/{}", dept)).into_response(),
    None => Redirect::to("/departments").into_response(),
  }
}
