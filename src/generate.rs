//! Question generation: request validation, the credential fallback loop and the
//! offline fallback policy. HTTP handlers are thin wrappers around `generate_questions`.

use tracing::{error, info, instrument, warn};

use crate::catalog::{self, Grade, Topic, MIXED};
use crate::domain::{Question, QuestionSource};
use crate::error::{GenerateError, ModelError};
use crate::gemini::QuestionModel;
use crate::offline_bank::offline_questions;
use crate::prompt::build_prompt;
use crate::protocol::GenerateIn;
use crate::schema::QuestionSet;
use crate::state::AppState;

/// A question set ready to send, with its origin tag when it did not come from the model.
#[derive(Debug, Clone)]
pub struct Generated {
  pub questions: Vec<Question>,
  pub source: Option<QuestionSource>,
}

/// Resolve and validate `(topic, grade)` against the catalog.
pub fn resolve_request(req: &GenerateIn) -> Result<(&'static Grade, &'static Topic), GenerateError> {
  let grade = catalog::grade(req.grade.trim())
    .ok_or_else(|| GenerateError::InvalidRequest(format!("unknown grade {:?}", req.grade)))?;
  let topic = catalog::topic_for(grade, req.topic.trim())
    .ok_or_else(|| GenerateError::InvalidRequest(format!("topic {:?} is not offered for grade {}", req.topic, grade.value)))?;
  Ok((grade, topic))
}

/// Try each credential in order; first valid set wins.
/// A rejected credential stops the loop, other failures move on to the next key.
#[instrument(level = "info", skip_all, fields(model = %model.name(), credentials = api_keys.len()))]
pub async fn attempt_with_fallback(
  model: &dyn QuestionModel,
  api_keys: &[String],
  prompt: &str,
) -> Result<QuestionSet, GenerateError> {
  if api_keys.is_empty() {
    return Err(GenerateError::MissingCredentials);
  }

  let mut last: Option<ModelError> = None;
  for (idx, key) in api_keys.iter().enumerate() {
    let attempt = idx + 1;
    match model.generate(key, prompt).await {
      Ok(set) => {
        info!(target: "questions", attempt, "Model attempt succeeded");
        return Ok(set);
      }
      Err(e) if e.is_credential_rejection() => {
        error!(target: "questions", attempt, error = %e, "Credential rejected; not trying further keys");
        return Err(GenerateError::CredentialRejected(e));
      }
      Err(e) => {
        warn!(target: "questions", attempt, remaining = api_keys.len() - attempt, error = %e, "Model attempt failed");
        last = Some(e);
      }
    }
  }

  Err(GenerateError::Exhausted {
    attempts: api_keys.len(),
    last: last.unwrap_or(ModelError::EmptyResponse),
  })
}

/// Pin every question's `type` to the requested topic, except for mixed sets.
fn normalize_types(questions: &mut [Question], topic: &Topic) {
  if topic.value == MIXED { return; }
  for q in questions.iter_mut().filter(|q| q.kind != topic.value) {
    q.kind = topic.value.to_string();
  }
}

#[instrument(level = "info", skip(state), fields(topic = %req.topic, grade = %req.grade))]
pub async fn generate_questions(state: &AppState, req: &GenerateIn) -> Result<Generated, GenerateError> {
  let (grade, topic) = resolve_request(req)?;
  let prompt = build_prompt(topic, grade);
  let level = grade.level();

  match attempt_with_fallback(state.model.as_ref(), &state.config.api_keys, &prompt).await {
    Ok(set) => {
      let mut questions = set.questions;
      normalize_types(&mut questions, topic);
      info!(target: "questions", topic = topic.value, grade = grade.value, level = level.as_str(), count = questions.len(), "Generated question set");
      Ok(Generated { questions, source: None })
    }
    Err(GenerateError::MissingCredentials) => Err(GenerateError::MissingCredentials),
    Err(err) if state.config.offline_fallback => {
      let source = match &err {
        GenerateError::CredentialRejected(_) => QuestionSource::OfflineError,
        _ => QuestionSource::Offline,
      };
      warn!(target: "questions", topic = topic.value, grade = grade.value, ?source, error = %err, "Serving offline question bank");
      Ok(Generated {
        questions: offline_questions(topic.value, grade, &state.config.extra_bank),
        source: Some(source),
      })
    }
    Err(err) => {
      error!(target: "questions", topic = topic.value, grade = grade.value, error = %err, "Question generation failed");
      Err(err)
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use std::collections::HashMap;
  use std::sync::{Arc, Mutex};

  use crate::config::AppConfig;
  use crate::gemini::ModelFuture;
  use crate::schema::tests::sample_set;

  #[derive(Clone, Copy)]
  pub(crate) enum Behavior {
    Succeed,
    FailNetwork,
    Reject,
    BadSchema,
  }

  /// Model double that answers per credential and records the keys it saw.
  pub(crate) struct ScriptedModel {
    pub behaviors: HashMap<String, Behavior>,
    pub calls: Mutex<Vec<String>>,
    pub kind: String,
  }

  impl ScriptedModel {
    pub(crate) fn new(script: &[(&str, Behavior)]) -> Self {
      Self {
        behaviors: script.iter().map(|(k, b)| (k.to_string(), *b)).collect(),
        calls: Mutex::new(Vec::new()),
        kind: "addition".into(),
      }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
      self.calls.lock().unwrap().clone()
    }
  }

  impl QuestionModel for ScriptedModel {
    fn generate<'a>(&'a self, api_key: &'a str, _prompt: &'a str) -> ModelFuture<'a> {
      self.calls.lock().unwrap().push(api_key.to_string());
      let behavior = self.behaviors.get(api_key).copied().unwrap_or(Behavior::FailNetwork);
      let kind = self.kind.clone();
      Box::pin(async move {
        match behavior {
          Behavior::Succeed => Ok(sample_set(&kind)),
          Behavior::FailNetwork => Err(ModelError::Transport("connection reset".into())),
          Behavior::Reject => Err(ModelError::CredentialRejected { status: 403, message: "denied".into() }),
          Behavior::BadSchema => {
            let mut set = sample_set(&kind);
            set.questions[0].correct_answer = "missing".into();
            match crate::schema::validate_set(&set) {
              Ok(()) => Ok(set),
              Err(e) => Err(ModelError::Schema(e)),
            }
          }
        }
      })
    }

    fn name(&self) -> &str {
      "scripted"
    }
  }

  pub(crate) fn state_with(keys: &[&str], fallback: bool, model: Arc<ScriptedModel>) -> AppState {
    let config = AppConfig {
      api_keys: keys.iter().map(|k| k.to_string()).collect(),
      offline_fallback: fallback,
      ..AppConfig::default()
    };
    AppState::with_model(config, model)
  }

  fn req(topic: &str, grade: &str) -> GenerateIn {
    GenerateIn { topic: topic.into(), grade: grade.into() }
  }

  #[test]
  fn rejects_unknown_grade_and_topic() {
    assert!(matches!(resolve_request(&req("addition", "7")), Err(GenerateError::InvalidRequest(_))));
    assert!(matches!(resolve_request(&req("g3-roman", "1")), Err(GenerateError::InvalidRequest(_))));
    let (g, t) = resolve_request(&req("g3-roman", "3")).unwrap();
    assert_eq!((g.value, t.value), ("3", "g3-roman"));
  }

  #[tokio::test]
  async fn first_success_short_circuits() {
    let model = ScriptedModel::new(&[("a", Behavior::Succeed), ("b", Behavior::Succeed)]);
    let keys = vec!["a".to_string(), "b".to_string()];
    let set = attempt_with_fallback(&model, &keys, "p").await.unwrap();
    assert_eq!(set.questions.len(), 10);
    assert_eq!(model.calls(), ["a"]);
  }

  #[tokio::test]
  async fn failures_fall_through_to_next_key() {
    let model = ScriptedModel::new(&[
      ("a", Behavior::FailNetwork),
      ("b", Behavior::BadSchema),
      ("c", Behavior::Succeed),
    ]);
    let keys: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    assert!(attempt_with_fallback(&model, &keys, "p").await.is_ok());
    assert_eq!(model.calls(), ["a", "b", "c"]);
  }

  #[tokio::test]
  async fn rejected_key_stops_the_loop() {
    let model = ScriptedModel::new(&[("a", Behavior::Reject), ("b", Behavior::Succeed)]);
    let keys = vec!["a".to_string(), "b".to_string()];
    let err = attempt_with_fallback(&model, &keys, "p").await.unwrap_err();
    assert!(matches!(err, GenerateError::CredentialRejected(_)));
    assert_eq!(model.calls(), ["a"]);
  }

  #[tokio::test]
  async fn no_keys_is_a_configuration_error() {
    let model = ScriptedModel::new(&[]);
    let err = attempt_with_fallback(&model, &[], "p").await.unwrap_err();
    assert!(matches!(err, GenerateError::MissingCredentials));
    assert!(model.calls().is_empty());
  }

  #[tokio::test]
  async fn generated_set_is_tagged_with_topic() {
    let mut model = ScriptedModel::new(&[("k", Behavior::Succeed)]);
    model.kind = "something-else".into();
    let state = state_with(&["k"], true, Arc::new(model));
    let out = generate_questions(&state, &req("addition", "2")).await.unwrap();
    assert_eq!(out.questions.len(), 10);
    assert!(out.questions.iter().all(|q| q.kind == "addition"));
    assert!(out.source.is_none());
  }

  #[tokio::test]
  async fn exhaustion_serves_offline_bank() {
    let model = Arc::new(ScriptedModel::new(&[("a", Behavior::FailNetwork), ("b", Behavior::FailNetwork)]));
    let state = state_with(&["a", "b"], true, model.clone());
    let out = generate_questions(&state, &req("g6-sets", "6")).await.unwrap();
    assert_eq!(out.source, Some(QuestionSource::Offline));
    assert_eq!(out.questions.len(), 10);
    assert!(out.questions.iter().all(|q| q.correct_matches() == 1 && q.options.len() == 4));
    assert_eq!(model.calls(), ["a", "b"]);
  }

  #[tokio::test]
  async fn rejection_serves_offline_error_tag() {
    let model = Arc::new(ScriptedModel::new(&[("a", Behavior::Reject)]));
    let state = state_with(&["a"], true, model);
    let out = generate_questions(&state, &req("addition", "2")).await.unwrap();
    assert_eq!(out.source, Some(QuestionSource::OfflineError));
  }

  #[tokio::test]
  async fn exhaustion_without_fallback_is_an_error() {
    let model = Arc::new(ScriptedModel::new(&[("a", Behavior::FailNetwork)]));
    let state = state_with(&["a"], false, model);
    let err = generate_questions(&state, &req("addition", "2")).await.unwrap_err();
    assert!(matches!(err, GenerateError::Exhausted { attempts: 1, .. }));
  }

  #[tokio::test]
  async fn missing_keys_fail_even_with_fallback() {
    let model = Arc::new(ScriptedModel::new(&[]));
    let state = state_with(&[], true, model);
    let err = generate_questions(&state, &req("addition", "2")).await.unwrap_err();
    assert!(matches!(err, GenerateError::MissingCredentials));
  }
}
