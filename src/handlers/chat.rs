//! Study assistant chat handlers.

use askama::Template;
use axum::{
  extract::State,
  response::{Html, IntoResponse},
  Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::chat;
use crate::db::{self, LogOnError};
use crate::state::AppState;

use super::error_page;

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate {
  pub question: Option<String>,
  pub answer: Option<String>,
  pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatForm {
  pub question: String,
}

pub async fn chat_page() -> Html<String> {
  let template = ChatTemplate {
    question: None,
    answer: None,
    error: None,
  };
  Html(template.render().unwrap_or_default())
}

pub async fn ask_assistant(
  State(state): State<AppState>,
  Form(form): Form<ChatForm>,
) -> impl IntoResponse {
  let question = form.question.trim().to_string();
  if question.is_empty() {
    let template = ChatTemplate {
      question: None,
      answer: None,
      error: Some("Ask a question first".to_string()),
    };
    return Html(template.render().unwrap_or_default()).into_response();
  }

  // Snapshot the study data and release the lock before going to the network
  let context = {
    let conn = match db::try_lock(&state.db) {
      Ok(conn) => conn,
      Err(_) => return error_page("Please refresh the page.").into_response(),
    };

    let departments = db::get_all_departments(&conn).log_warn_default("Failed to load departments");
    let courses = db::get_all_courses(&conn).log_warn_default("Failed to load courses");
    let topics = db::get_all_topics(&conn).log_warn_default("Failed to load topics");

    chat::build_study_context(&departments, &courses, &topics, Utc::now(), &state.schedule)
  };

  let template = match chat::ask(&state.gateway, &context, &question).await {
    Ok(answer) => ChatTemplate {
      question: Some(question),
      answer: Some(answer),
      error: None,
    },
    Err(e) => {
      tracing::warn!("Gateway call failed: {}", e);
      ChatTemplate {
        question: Some(question),
        answer: None,
        error: Some("The study assistant is unavailable right now. Try again later.".to_string()),
      }
    }
  };

  Html(template.render().unwrap_or_default()).into_response()
}
