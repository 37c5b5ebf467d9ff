//! HTTP client for the generation endpoint, used by the quiz front-end.

use std::time::Duration;

use reqwest::header::USER_AGENT;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::protocol::{ErrorOut, GenerateIn, GenerateOut};

pub const GENERIC_FAILURE: &str = "Something went wrong while generating questions.";
const UNREACHABLE: &str = "Unable to reach the question generator";

#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered with an `{error}` body.
  #[error("server error (HTTP {status}): {message}")]
  Server { status: u16, message: String },
  #[error("request failed: {0}")]
  Transport(String),
  #[error("unexpected response: {0}")]
  Decode(String),
}

impl ClientError {
  /// Short message suitable for a learner; never raw internals.
  pub fn user_message(&self) -> String {
    match self {
      ClientError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
      ClientError::Server { .. } => UNREACHABLE.to_string(),
      ClientError::Transport(_) => UNREACHABLE.to_string(),
      ClientError::Decode(_) => GENERIC_FAILURE.to_string(),
    }
  }
}

#[derive(Clone)]
pub struct QuestionClient {
  client: reqwest::Client,
  base_url: String,
}

impl QuestionClient {
  pub fn new(base_url: &str) -> Result<Self, ClientError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(90))
      .build()
      .map_err(|e| ClientError::Transport(e.to_string()))?;
    Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
  }

  #[instrument(level = "info", skip(self), fields(topic = %req.topic, grade = %req.grade))]
  pub async fn generate(&self, req: &GenerateIn) -> Result<GenerateOut, ClientError> {
    let url = format!("{}/api/generate-questions", self.base_url);
    let res = self.client.post(&url)
      .header(USER_AGENT, "math-tutor-quiz/0.1")
      .json(req)
      .send().await
      .map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| ClientError::Transport(e.to_string()))?;
    if !status.is_success() {
      let message = serde_json::from_str::<ErrorOut>(&body).map(|e| e.error).unwrap_or_default();
      warn!(status = status.as_u16(), %message, "Generation request failed");
      return Err(ClientError::Server { status: status.as_u16(), message });
    }

    let out: GenerateOut = serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
    info!(count = out.questions.len(), source = ?out.source, "Questions received");
    Ok(out)
  }
}
