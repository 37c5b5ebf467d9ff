//! Math Robo Tutor: multiple-choice practice questions for nursery through grade 6.
//!
//! The server side (`routes`, `generate`, `gemini`, `offline_bank`) answers
//! `POST /api/generate-questions`; the `quiz` and `client` modules drive a learner
//! through a generated set.

pub mod catalog;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod gemini;
pub mod generate;
pub mod offline_bank;
pub mod profile;
pub mod prompt;
pub mod protocol;
pub mod quiz;
pub mod routes;
pub mod schema;
pub mod state;
pub mod telemetry;
pub mod util;
