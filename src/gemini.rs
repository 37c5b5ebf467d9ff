//! Minimal Gemini client for structured question generation.
//!
//! We only call `models/{model}:generateContent` with a response schema and JSON mime type.
//! Calls are instrumented and log model name, latency and token usage (not contents).
//!
//! NOTE: the API key travels in the `x-goog-api-key` header and is never logged.

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::{AppConfig, Sampling};
use crate::error::ModelError;
use crate::schema::{response_schema, validate_set, QuestionSet};
use crate::util::trunc_for_log;

pub type ModelFuture<'a> = Pin<Box<dyn Future<Output = Result<QuestionSet, ModelError>> + Send + 'a>>;

/// Anything that can turn a prompt into a validated question set with one credential.
/// The generation loop only talks to this trait, so tests can swap in a scripted model.
pub trait QuestionModel: Send + Sync {
  fn generate<'a>(&'a self, api_key: &'a str, prompt: &'a str) -> ModelFuture<'a>;

  /// Name used in logs and health output.
  fn name(&self) -> &str;
}

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub base_url: String,
  pub model: String,
  pub sampling: Sampling,
}

impl Gemini {
  pub fn from_config(cfg: &AppConfig) -> Result<Self, ModelError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| ModelError::Transport(e.to_string()))?;
    Ok(Self {
      client,
      base_url: cfg.base_url.trim_end_matches('/').to_string(),
      model: cfg.model.clone(),
      sampling: cfg.sampling,
    })
  }

  fn request_body(&self, prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
      contents: vec![Content {
        role: "user".into(),
        parts: vec![Part { text: prompt.into() }],
      }],
      generation_config: GenerationConfig {
        temperature: self.sampling.temperature,
        top_p: self.sampling.top_p,
        response_mime_type: "application/json".into(),
        response_schema: response_schema(),
      },
    }
  }

  /// One structured-output call: request, decode, validate.
  #[instrument(level = "info", skip(self, api_key, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn generate_content(&self, api_key: &str, prompt: &str) -> Result<QuestionSet, ModelError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let start = std::time::Instant::now();

    let res = self.client.post(&url)
      .header(USER_AGENT, "math-tutor/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", api_key)
      .json(&self.request_body(prompt))
      .send().await
      .map_err(|e| ModelError::Transport(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(classify_failure(status.as_u16(), &body));
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| ModelError::Parse(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(elapsed = ?start.elapsed(), prompt_tokens = ?usage.prompt_token_count, candidates_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }

    let text = body.first_text().ok_or(ModelError::EmptyResponse)?;
    debug!(preview = %trunc_for_log(&text, 120), "Gemini structured output received");
    parse_question_set(&text)
  }
}

impl QuestionModel for Gemini {
  fn generate<'a>(&'a self, api_key: &'a str, prompt: &'a str) -> ModelFuture<'a> {
    Box::pin(self.generate_content(api_key, prompt))
  }

  fn name(&self) -> &str {
    &self.model
  }
}

/// Decode the model's JSON text and run the schema checks.
pub fn parse_question_set(text: &str) -> Result<QuestionSet, ModelError> {
  let set: QuestionSet = serde_json::from_str(strip_code_fence(text))
    .map_err(|e| ModelError::Parse(e.to_string()))?;
  validate_set(&set)?;
  Ok(set)
}

/// Some models still wrap JSON in a Markdown fence despite the mime type.
fn strip_code_fence(text: &str) -> &str {
  let t = text.trim();
  match t.strip_prefix("```") {
    Some(rest) => {
      let rest = rest.trim_start_matches("json");
      rest.strip_suffix("```").unwrap_or(rest).trim()
    }
    None => t,
  }
}

/// Map a non-success upstream response to an attempt error.
fn classify_failure(status: u16, body: &str) -> ModelError {
  let message = extract_gemini_error(body).unwrap_or_else(|| trunc_for_log(body, 200));
  let names_key = message.to_ascii_lowercase().contains("api key")
    || body.contains("API_KEY_INVALID");
  if status == 401 || status == 403 || (status == 400 && names_key) {
    ModelError::CredentialRejected { status, message }
  } else {
    ModelError::Status { status, message }
  }
}

// --- Gemini DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
  #[serde(default)]
  role: String,
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
  #[serde(default)]
  text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  temperature: f32,
  top_p: f32,
  response_mime_type: String,
  response_schema: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
  #[serde(default)]
  usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
  fn first_text(&self) -> Option<String> {
    let parts = &self.candidates.first()?.content.as_ref()?.parts;
    let text: String = parts.iter().map(|p| p.text.as_str()).collect();
    if text.trim().is_empty() { None } else { Some(text) }
  }
}

#[derive(Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<Content>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
