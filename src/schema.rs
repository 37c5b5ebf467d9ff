//! Question-set schema: the JSON schema handed to the model and the checks applied to
//! whatever comes back. The model is asked for structured output, but its answer is
//! validated again here before anything reaches a learner.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::{Question, OPTIONS_PER_QUESTION, QUESTIONS_PER_SET};

/// Top-level object the model must return.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionSet {
  pub questions: Vec<Question>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
  #[error("expected {expected} questions, got {got}")]
  QuestionCount { expected: usize, got: usize },
  #[error("question {id}: expected {expected} options, got {got}")]
  OptionCount { id: String, expected: usize, got: usize },
  #[error("question {id}: correctAnswer must be one of the options (found {matches} matches)")]
  CorrectAnswer { id: String, matches: usize },
  #[error("question {id}: empty {field}")]
  Empty { id: String, field: &'static str },
  #[error("duplicate question id {0}")]
  DuplicateId(String),
}

/// Check a full set: exactly ten questions, unique ids, each question well formed.
pub fn validate_set(set: &QuestionSet) -> Result<(), SchemaError> {
  if set.questions.len() != QUESTIONS_PER_SET {
    return Err(SchemaError::QuestionCount { expected: QUESTIONS_PER_SET, got: set.questions.len() });
  }
  let mut ids = HashSet::new();
  for q in &set.questions {
    validate_question(q)?;
    if !ids.insert(q.id.as_str()) {
      return Err(SchemaError::DuplicateId(q.id.clone()));
    }
  }
  Ok(())
}

/// Check one question: four non-empty options, exactly one equal to `correctAnswer`.
pub fn validate_question(q: &Question) -> Result<(), SchemaError> {
  let empty = |field| SchemaError::Empty { id: q.id.clone(), field };
  if q.id.trim().is_empty() { return Err(empty("id")); }
  if q.question.trim().is_empty() { return Err(empty("question")); }
  if q.kind.trim().is_empty() { return Err(empty("type")); }
  if q.options.len() != OPTIONS_PER_QUESTION {
    return Err(SchemaError::OptionCount { id: q.id.clone(), expected: OPTIONS_PER_QUESTION, got: q.options.len() });
  }
  if q.options.iter().any(|o| o.trim().is_empty()) { return Err(empty("option")); }
  let matches = q.correct_matches();
  if matches != 1 {
    return Err(SchemaError::CorrectAnswer { id: q.id.clone(), matches });
  }
  Ok(())
}

/// Response schema in the OpenAPI subset accepted by Gemini's `responseSchema`.
pub fn response_schema() -> Value {
  json!({
    "type": "OBJECT",
    "description": "Ten grade-aligned multiple choice math questions",
    "properties": {
      "questions": {
        "type": "ARRAY",
        "minItems": QUESTIONS_PER_SET,
        "maxItems": QUESTIONS_PER_SET,
        "items": {
          "type": "OBJECT",
          "properties": {
            "id": { "type": "STRING" },
            "question": { "type": "STRING" },
            "options": {
              "type": "ARRAY",
              "items": { "type": "STRING" },
              "minItems": OPTIONS_PER_QUESTION,
              "maxItems": OPTIONS_PER_QUESTION
            },
            "correctAnswer": { "type": "STRING" },
            "type": { "type": "STRING" },
            "explanation": { "type": "STRING" }
          },
          "required": ["id", "question", "options", "correctAnswer", "type"],
          "propertyOrdering": ["id", "question", "options", "correctAnswer", "type", "explanation"]
        }
      }
    },
    "required": ["questions"]
  })
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn sample_set(kind: &str) -> QuestionSet {
    let questions = (1..=QUESTIONS_PER_SET)
      .map(|i| Question {
        id: format!("q{i}"),
        question: format!("What is {i} + 1?"),
        options: vec![
          (i + 1).to_string(),
          (i + 2).to_string(),
          (i + 3).to_string(),
          (i + 4).to_string(),
        ],
        correct_answer: (i + 1).to_string(),
        kind: kind.to_string(),
        explanation: Some(format!("{i} and one more is {}.", i + 1)),
      })
      .collect();
    QuestionSet { questions }
  }

  #[test]
  fn accepts_well_formed_set() {
    assert_eq!(validate_set(&sample_set("addition")), Ok(()));
  }

  #[test]
  fn rejects_wrong_count() {
    let mut set = sample_set("addition");
    set.questions.pop();
    assert_eq!(validate_set(&set), Err(SchemaError::QuestionCount { expected: 10, got: 9 }));
  }

  #[test]
  fn rejects_answer_outside_options() {
    let mut set = sample_set("addition");
    set.questions[3].correct_answer = "99".into();
    assert!(matches!(validate_set(&set), Err(SchemaError::CorrectAnswer { matches: 0, .. })));
  }

  #[test]
  fn rejects_answer_listed_twice() {
    let mut set = sample_set("addition");
    let answer = set.questions[0].correct_answer.clone();
    set.questions[0].options[2] = answer;
    assert!(matches!(validate_set(&set), Err(SchemaError::CorrectAnswer { matches: 2, .. })));
  }

  #[test]
  fn rejects_three_options() {
    let mut set = sample_set("addition");
    set.questions[5].options.truncate(3);
    assert!(matches!(validate_set(&set), Err(SchemaError::OptionCount { got: 3, .. })));
  }

  #[test]
  fn rejects_duplicate_ids() {
    let mut set = sample_set("addition");
    set.questions[1].id = "q1".into();
    assert_eq!(validate_set(&set), Err(SchemaError::DuplicateId("q1".into())));
  }

  #[test]
  fn parses_model_payload() {
    let raw = r#"{"questions":[{"id":"q1","question":"Is 4 even?","options":["Yes","No","Maybe","Never"],"correctAnswer":"Yes","type":"even-odd"}]}"#;
    let set: QuestionSet = serde_json::from_str(raw).unwrap();
    assert_eq!(set.questions[0].kind, "even-odd");
    assert_eq!(set.questions[0].explanation, None);
    assert_eq!(validate_question(&set.questions[0]), Ok(()));
  }
}
