//! HTTP client for the external LLM gateway.
//!
//! The gateway speaks a minimal generate-style API: POST a model name and a
//! prompt, get back `{"response": "..."}`. Answer quality is the gateway's
//! problem; this module only ships the study context across and pulls the
//! text out.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Reusable HTTP client singleton (created once, reused for all requests)
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn http_client() -> &'static Client {
  HTTP_CLIENT.get_or_init(|| {
    Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
      .build()
      .expect("Failed to create HTTP client")
  })
}

/// Where and how to reach the LLM gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  pub url: String,
  pub model: String,
  pub api_key: Option<String>,
}

impl GatewayConfig {
  pub const DEFAULT_URL: &'static str = "http://localhost:11434/api/generate";
  pub const DEFAULT_MODEL: &'static str = "llama3.2";
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      url: Self::DEFAULT_URL.to_string(),
      model: Self::DEFAULT_MODEL.to_string(),
      api_key: None,
    }
  }
}

#[derive(Serialize)]
struct GatewayRequest<'a> {
  model: &'a str,
  prompt: String,
  stream: bool,
}

#[derive(Deserialize)]
struct GatewayResponse {
  response: String,
}

#[derive(Debug)]
pub enum GatewayError {
  Request(String),
  BadStatus(u16),
  EmptyResponse,
}

impl std::fmt::Display for GatewayError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Request(e) => write!(f, "Gateway request failed: {}", e),
      Self::BadStatus(code) => write!(f, "Gateway returned status {}", code),
      Self::EmptyResponse => write!(f, "Gateway returned an empty response"),
    }
  }
}

impl std::error::Error for GatewayError {}

/// Fold the study context and the user's question into a single prompt.
fn build_prompt(context: &str, question: &str) -> String {
  format!(
    "You are a study assistant. Answer using the student's study data below.\n\
     If the data does not cover the question, say so.\n\n\
     {}\n\nQuestion: {}",
    context, question
  )
}

/// Ask the gateway a question grounded in the given study context.
pub async fn ask(
  config: &GatewayConfig,
  context: &str,
  question: &str,
) -> Result<String, GatewayError> {
  let mut request = http_client().post(&config.url).json(&GatewayRequest {
    model: &config.model,
    prompt: build_prompt(context, question),
    stream: false,
  });

  if let Some(key) = &config.api_key {
    request = request.bearer_auth(key);
  }

  let response = request
    .send()
    .await
    .map_err(|e| GatewayError::Request(e.to_string()))?;

  let status = response.status();
  if !status.is_success() {
    return Err(GatewayError::BadStatus(status.as_u16()));
  }

  let body: GatewayResponse = response
    .json()
    .await
    .map_err(|e| GatewayError::Request(e.to_string()))?;

  let answer = body.response.trim().to_string();
  if answer.is_empty() {
    return Err(GatewayError::EmptyResponse);
  }
  Ok(answer)
}
