//! Department list handlers.

use askama::Template;
use axum::{
  extract::{Path, State},
  response::{Html, IntoResponse, Redirect},
  Form,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::{self, LogOnError};
use crate::domain::Department;
use crate::state::AppState;
use crate::validation::validate_name;

use super::error_page;

#[derive(Template)]
#[template(path = "departments.html")]
pub struct DepartmentsTemplate {
  pub departments: Vec<DepartmentRow>,
  pub error: Option<String>,
}

pub struct DepartmentRow {
  pub id: i64,
  pub name: String,
  pub course_count: i64,
}

#[derive(Deserialize)]
pub struct DepartmentForm {
  pub name: String,
}

fn render_list(conn: &Connection, error: Option<String>) -> Html<String> {
  let departments = db::get_all_departments(conn)
    .log_warn_default("Failed to load departments")
    .into_iter()
    .map(|d| DepartmentRow {
      course_count: db::count_courses(conn, d.id).log_warn_default("Failed to count courses"),
      id: d.id,
      name: d.name,
    })
    .collect();

  let template = DepartmentsTemplate { departments, error };
  Html(template.render().unwrap_or_default())
}

pub async fn list_page(State(state): State<AppState>) -> Html<String> {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page."),
  };
  render_list(&conn, None)
}

pub async fn create(
  State(state): State<AppState>,
  Form(form): Form<DepartmentForm>,
) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  match validate_name(&form.name) {
    Ok(name) => {
      let _ = db::insert_department(&conn, &Department::new(name))
        .log_warn("Failed to insert department");
      Redirect::to("/departments").into_response()
    }
    Err(e) => render_list(&conn, Some(e.to_string())).into_response(),
  }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
  let conn = match db::try_lock(&state.db) {
    Ok(conn) => conn,
    Err(_) => return error_page("Please refresh the page.").into_response(),
  };

  let _ = db::delete_department(&conn, id).log_warn("Failed to delete department");
  Redirect::to("/departments").into_response()
}
