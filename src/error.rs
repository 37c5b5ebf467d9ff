//! Error taxonomy for question generation.
//!
//! `ModelError` describes one failed upstream attempt; `GenerateError` is what the
//! route reports. Response bodies carry a short fixed message, never upstream text.

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::protocol::ErrorOut;
use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum ModelError {
  #[error("transport error: {0}")]
  Transport(String),
  /// 401/403, or a 400 that names the API key. Not worth retrying with other keys.
  #[error("credential rejected (HTTP {status}): {message}")]
  CredentialRejected { status: u16, message: String },
  #[error("upstream HTTP {status}: {message}")]
  Status { status: u16, message: String },
  #[error("model returned no content")]
  EmptyResponse,
  #[error("JSON parse error: {0}")]
  Parse(String),
  #[error("schema validation failed: {0}")]
  Schema(#[from] SchemaError),
}

impl ModelError {
  pub fn is_credential_rejection(&self) -> bool {
    matches!(self, ModelError::CredentialRejected { .. })
  }
}

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("invalid request: {0}")]
  InvalidRequest(String),
  #[error("no API credentials configured")]
  MissingCredentials,
  #[error("API credential rejected: {0}")]
  CredentialRejected(ModelError),
  #[error("all {attempts} credential attempts failed; last error: {last}")]
  Exhausted { attempts: usize, last: ModelError },
}

impl GenerateError {
  pub fn status(&self) -> StatusCode {
    match self {
      GenerateError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      GenerateError::MissingCredentials
      | GenerateError::CredentialRejected(_)
      | GenerateError::Exhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Message safe to show a learner.
  pub fn public_message(&self) -> &'static str {
    match self {
      GenerateError::InvalidRequest(_) => "Please choose a valid grade and topic.",
      GenerateError::MissingCredentials | GenerateError::CredentialRejected(_) => {
        "The question generator is not configured."
      }
      GenerateError::Exhausted { .. } => "Failed to generate questions",
    }
  }
}

impl IntoResponse for GenerateError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorOut { error: self.public_message().to_string() })).into_response()
  }
}
