//! Runtime configuration: environment variables plus an optional TOML file.
//!
//! Environment (all optional):
//!   PORT                               : u16 (default 3000)
//!   GOOGLE_GENERATIVE_AI_API_KEY       : primary credential
//!   GOOGLE_GENERATIVE_AI_API_KEY_2..9  : extra credentials, tried in order
//!   GOOGLE_GENERATIVE_AI_API_KEYS      : comma-separated credentials, tried last
//!   GEMINI_BASE_URL                    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL                       : default "gemini-2.5-flash"
//!   GEMINI_TIMEOUT_SECS                : default 30
//!   OFFLINE_FALLBACK                   : "false"/"0"/"off" disables the offline bank
//!   TUTOR_CONFIG_PATH                  : TOML file, see `TutorFileConfig`
//!
//! Quiz client (`math-tutor-quiz`):
//!   MATH_TUTOR_URL      : server base URL (default "http://127.0.0.1:3000")
//!   MATH_TUTOR_PROFILE  : name file (default ".math-tutor/profile.json")
//!   MATH_TUTOR_SPEECH   : text-to-speech command, e.g. "espeak"; unset disables speech

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Question;
use crate::schema::validate_question;

pub const PRIMARY_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";
pub const KEY_LIST_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEYS";

/// Sampling parameters sent with every generation request.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sampling {
  pub temperature: f32,
  pub top_p: f32,
}

impl Default for Sampling {
  fn default() -> Self {
    Self { temperature: 0.34, top_p: 0.92 }
  }
}

/// Offline bank entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct BankQuestionCfg {
  pub topic: String,
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: String,
  #[serde(default)] pub explanation: Option<String>,
}

/// Schema of the file at TUTOR_CONFIG_PATH.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct TutorFileConfig {
  #[serde(default)]
  pub sampling: Sampling,
  #[serde(default)]
  pub offline_questions: Vec<BankQuestionCfg>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
  pub port: u16,
  /// Credentials in the order they are tried. Never logged.
  pub api_keys: Vec<String>,
  pub base_url: String,
  pub model: String,
  pub timeout_secs: u64,
  pub offline_fallback: bool,
  pub sampling: Sampling,
  /// Validated extra offline-bank questions from the config file.
  pub extra_bank: Vec<Question>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: 3000,
      api_keys: Vec::new(),
      base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
      model: "gemini-2.5-flash".into(),
      timeout_secs: 30,
      offline_fallback: true,
      sampling: Sampling::default(),
      extra_bank: Vec::new(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Self {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  /// Build the config from an arbitrary variable lookup.
  pub fn from_lookup<F>(get: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();
    let file = get("TUTOR_CONFIG_PATH")
      .and_then(|path| load_file_config(&path))
      .unwrap_or_default();

    Self {
      port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
      api_keys: collect_api_keys(&get),
      base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
      model: get("GEMINI_MODEL").unwrap_or(defaults.model),
      timeout_secs: get("GEMINI_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(defaults.timeout_secs),
      offline_fallback: get("OFFLINE_FALLBACK").map(|v| parse_flag(&v)).unwrap_or(defaults.offline_fallback),
      sampling: file.sampling,
      extra_bank: bank_from_cfg(&file.offline_questions),
    }
  }
}

/// Settings for the terminal quiz client.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
  pub base_url: String,
  pub profile_path: String,
  pub speech_command: Option<String>,
}

impl ClientConfig {
  pub fn from_env() -> Self {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  pub fn from_lookup<F>(get: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_blank = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    Self {
      base_url: non_blank("MATH_TUTOR_URL").unwrap_or_else(|| "http://127.0.0.1:3000".into()),
      profile_path: non_blank("MATH_TUTOR_PROFILE").unwrap_or_else(|| ".math-tutor/profile.json".into()),
      speech_command: non_blank("MATH_TUTOR_SPEECH"),
    }
  }
}

/// Ordered, de-duplicated, non-blank credentials.
fn collect_api_keys<F>(get: &F) -> Vec<String>
where
  F: Fn(&str) -> Option<String>,
{
  let mut raw: Vec<String> = Vec::new();
  raw.extend(get(PRIMARY_KEY_VAR));
  for i in 2..=9 {
    raw.extend(get(&format!("{PRIMARY_KEY_VAR}_{i}")));
  }
  if let Some(list) = get(KEY_LIST_VAR) {
    raw.extend(list.split(',').map(str::to_string));
  }

  let mut keys: Vec<String> = Vec::new();
  for k in raw.into_iter().map(|k| k.trim().to_string()) {
    if !k.is_empty() && !keys.contains(&k) {
      keys.push(k);
    }
  }
  keys
}

fn parse_flag(v: &str) -> bool {
  !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no")
}

fn bank_from_cfg(entries: &[BankQuestionCfg]) -> Vec<Question> {
  let mut out = Vec::new();
  for (i, cfg) in entries.iter().enumerate() {
    let q = Question {
      id: format!("cfg{}", i + 1),
      question: cfg.question.clone(),
      options: cfg.options.clone(),
      correct_answer: cfg.correct_answer.clone(),
      kind: cfg.topic.clone(),
      explanation: cfg.explanation.clone(),
    };
    match validate_question(&q) {
      Ok(()) => out.push(q),
      Err(e) => error!(target: "questions", index = i, topic = %cfg.topic, error = %e, "Skipping offline bank entry"),
    }
  }
  out
}

/// Read the TOML file. On any IO/parse error, logs and returns None.
pub fn load_file_config(path: &str) -> Option<TutorFileConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => parse_file_config(&s, path),
    Err(e) => {
      error!(target: "math_tutor", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

fn parse_file_config(s: &str, path: &str) -> Option<TutorFileConfig> {
  match toml::from_str::<TutorFileConfig>(s) {
    Ok(cfg) => {
      info!(target: "math_tutor", %path, bank_entries = cfg.offline_questions.len(), "Loaded tutor config (TOML)");
      if !(0.0..=2.0).contains(&cfg.sampling.temperature) {
        warn!(target: "math_tutor", temperature = cfg.sampling.temperature, "Temperature outside 0..=2");
      }
      Some(cfg)
    }
    Err(e) => {
      error!(target: "math_tutor", %path, error = %e, "Failed to parse TOML config");
      None
    }
  }
}
