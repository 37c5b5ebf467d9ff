//! Application state: immutable after startup, shared by handlers behind an `Arc`.
//!
//! This module owns:
//!   - the runtime configuration (credentials, fallback policy, extra bank entries)
//!   - the question model used for generation (Gemini in production)

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::error::ModelError;
use crate::gemini::{Gemini, QuestionModel};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub model: Arc<dyn QuestionModel>,
}

impl AppState {
    /// Build state with the Gemini client.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: AppConfig) -> Result<Self, ModelError> {
        let gemini = Gemini::from_config(&config)?;
        Ok(Self::with_model(config, Arc::new(gemini)))
    }

    /// Build state around any model implementation.
    pub fn with_model(config: AppConfig, model: Arc<dyn QuestionModel>) -> Self {
        if config.api_keys.is_empty() {
            error!(target: "math_tutor", "No API credentials set (GOOGLE_GENERATIVE_AI_API_KEY). Generation requests will fail.");
        } else {
            info!(
                target: "math_tutor",
                model = %model.name(),
                credentials = config.api_keys.len(),
                offline_fallback = config.offline_fallback,
                extra_bank = config.extra_bank.len(),
                "Question model ready."
            );
        }
        Self { config, model }
    }
}
