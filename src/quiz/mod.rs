//! Quiz front-end: session bookkeeping, answer feedback and the screen state machine.

pub mod app;
pub mod feedback;
pub mod session;

pub use app::{AnswerOutcome, CompletionSummary, Phase, TutorApp};
pub use feedback::{FeedbackPlayer, TerminalFeedback, Tone, Utterance};
pub use session::{LifetimeTotals, QuizSession, Response};
