//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{rejection::JsonRejection, State}, Json, response::IntoResponse};
use tracing::{info, instrument, warn};

use crate::error::GenerateError;
use crate::generate::generate_questions;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut {
    ok: true,
    credentials: state.config.api_keys.len(),
    offline_fallback: state.config.offline_fallback,
  })
}

#[instrument(level = "info")]
pub async fn http_catalog() -> impl IntoResponse {
  Json(catalog_out())
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_generate_questions(
  State(state): State<Arc<AppState>>,
  body: Result<Json<GenerateIn>, JsonRejection>,
) -> Result<Json<GenerateOut>, GenerateError> {
  let Json(req) = body.map_err(|rejection| {
    warn!(target: "questions", error = %rejection.body_text(), "Rejected malformed generate request");
    GenerateError::InvalidRequest(rejection.body_text())
  })?;

  let out = generate_questions(&state, &req).await?;
  info!(target: "questions", topic = %req.topic, grade = %req.grade, count = out.questions.len(), source = ?out.source, "HTTP questions served");
  Ok(Json(GenerateOut { questions: out.questions, source: out.source }))
}
