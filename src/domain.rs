//! Domain models: questions, difficulty levels and the origin tag of a question set.

use serde::{Deserialize, Serialize};

/// Number of questions in every generated set.
pub const QUESTIONS_PER_SET: usize = 10;
/// Number of answer options on every question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One multiple-choice question as exchanged with the model and the client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: String,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  /// Topic id the question exercises (`addition`, `g2-odd-even`, ...).
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

impl Question {
  /// How many options equal the correct answer. Valid questions have exactly one.
  pub fn correct_matches(&self) -> usize {
    self.options.iter().filter(|o| **o == self.correct_answer).count()
  }

  pub fn is_correct(&self, choice: &str) -> bool {
    choice == self.correct_answer
  }
}

/// Difficulty level derived from the grade.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
  Easy,
  // Has guidance text, but no grade routes to it.
  Medium,
  Hard,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Level::Easy => "easy",
      Level::Medium => "medium",
      Level::Hard => "hard",
    }
  }

  pub fn guidance(self) -> &'static str {
    match self {
      Level::Easy => "Keep numbers small, use single-step problems, and avoid borrowing/carrying unless gentle.",
      Level::Medium => "Use a mix of single- and two-step problems with occasional tens-to-hundreds transitions and friendly borrow/carry.",
      Level::Hard => "Challenge students with multi-step thinking while staying age appropriate.",
    }
  }

  /// Capitalised label shown next to the grade picker.
  pub fn label(self) -> &'static str {
    match self {
      Level::Easy => "Easy",
      Level::Medium => "Medium",
      Level::Hard => "Hard",
    }
  }
}

/// Where a served question set came from when it was not generated by the model.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QuestionSource {
  /// Every credential attempt failed.
  #[serde(rename = "offline")]
  Offline,
  /// A credential was rejected by the upstream.
  #[serde(rename = "offline-error")]
  OfflineError,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_uses_wire_field_names() {
    let q = Question {
      id: "q1".into(),
      question: "2 + 2?".into(),
      options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
      correct_answer: "4".into(),
      kind: "addition".into(),
      explanation: None,
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["correctAnswer"], "4");
    assert_eq!(v["type"], "addition");
    assert!(v.get("explanation").is_none());
    assert_eq!(q.correct_matches(), 1);
  }

  #[test]
  fn source_tags_serialize_as_strings() {
    assert_eq!(serde_json::to_value(QuestionSource::Offline).unwrap(), "offline");
    assert_eq!(serde_json::to_value(QuestionSource::OfflineError).unwrap(), "offline-error");
  }
}
