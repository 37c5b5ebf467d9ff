//! The tutor's front-end state machine.
//!
//! `TutorApp` owns everything the quiz screen needs: the signed-in name, the grade/topic
//! selection, the current `QuizSession` and lifetime totals. Drivers (the terminal client,
//! tests) call its actions and render from its accessors; network and timers stay outside.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::catalog::{self, Grade, Topic, CORE_SKILLS, MIXED_TOPIC};
use crate::client::{ClientError, GENERIC_FAILURE};
use crate::domain::{Question, QuestionSource};
use crate::profile::NameStore;
use crate::protocol::{GenerateIn, GenerateOut};
use crate::quiz::feedback::{Tone, Utterance};
use crate::quiz::session::{
    LifetimeTotals, QuizSession, Response, CORRECT_ADVANCE, INCORRECT_ADVANCE, PROMOTION_RATIO,
};
use crate::schema::{validate_set, QuestionSet};

pub const NAME_REQUIRED: &str = "Please enter your name to start.";
pub const GRADE_REQUIRED: &str = "Please select a grade level first.";
pub const TOPIC_REQUIRED: &str = "Please pick a topic for this grade.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    NamePrompt,
    Configuring,
    Loading,
    Presenting(usize),
    Feedback(usize),
    Completed,
    Farewell,
}

/// Result of the first answer to a question.
#[derive(Clone, Debug)]
pub struct AnswerOutcome {
    pub response: Response,
    pub tone: Tone,
    pub advance_after: Duration,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct AnswerLine {
    pub question: String,
    pub correct_answer: String,
    pub choice: Option<String>,
    pub is_correct: bool,
}

#[derive(Clone, Debug)]
pub struct CompletionSummary {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnswerLine>,
    pub lifetime: LifetimeTotals,
}

/// Feedback line shown under an answered question.
pub fn feedback_message(question: &Question, response: &Response) -> String {
    let mut msg = if response.is_correct {
        "Nice job! That is the correct answer.".to_string()
    } else {
        format!("Good try. Correct answer: {}.", question.correct_answer)
    };
    if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        msg.push(' ');
        msg.push_str(explanation);
    }
    msg
}

pub struct TutorApp<S: NameStore> {
    store: S,
    student_name: String,
    name_locked: bool,
    name_error: Option<String>,
    phase: Phase,
    resume_phase: Phase,
    resume_selection: (Option<&'static Grade>, Option<&'static Topic>),
    grade: Option<&'static Grade>,
    topic: Option<&'static Topic>,
    session: QuizSession,
    lifetime: LifetimeTotals,
    error: Option<String>,
    source: Option<QuestionSource>,
}

impl<S: NameStore> TutorApp<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            student_name: String::new(),
            name_locked: false,
            name_error: None,
            phase: Phase::Idle,
            resume_phase: Phase::Configuring,
            resume_selection: (None, None),
            grade: None,
            topic: None,
            session: QuizSession::default(),
            lifetime: LifetimeTotals::default(),
            error: None,
            source: None,
        }
    }

    // --- Identity ---

    /// Read the stored name; skip the name prompt when one exists.
    pub fn load(&mut self) {
        match self.store.load() {
            Ok(Some(name)) => {
                self.student_name = name;
                self.name_locked = true;
                self.phase = Phase::Configuring;
            }
            Ok(None) => self.phase = Phase::NamePrompt,
            Err(e) => {
                warn!(target: "math_tutor", error = %e, "Could not read stored name");
                self.phase = Phase::NamePrompt;
            }
        }
    }

    /// Update the name being typed. Ignored once a name is saved.
    pub fn set_name(&mut self, input: &str) {
        if !self.name_locked {
            self.student_name = input.to_string();
        }
    }

    pub fn save_name(&mut self) -> bool {
        let trimmed = self.student_name.trim().to_string();
        if trimmed.is_empty() {
            self.name_error = Some(NAME_REQUIRED.to_string());
            self.phase = Phase::NamePrompt;
            return false;
        }
        if let Err(e) = self.store.save(&trimmed) {
            warn!(target: "math_tutor", error = %e, "Could not persist student name");
        }
        info!(target: "math_tutor", "Student signed in");
        self.student_name = trimmed;
        self.name_locked = true;
        self.name_error = None;
        if matches!(self.phase, Phase::NamePrompt | Phase::Idle) {
            self.phase = Phase::Configuring;
        }
        true
    }

    /// "Not now": close the prompt without a name.
    pub fn dismiss_name_prompt(&mut self) {
        if self.phase == Phase::NamePrompt {
            self.phase = Phase::Configuring;
        }
    }

    /// Reopen the name prompt from the selection screen when nobody is signed in.
    pub fn open_name_prompt(&mut self) {
        if !self.name_locked && self.phase == Phase::Configuring {
            self.phase = Phase::NamePrompt;
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(target: "math_tutor", error = %e, "Could not clear stored name");
        }
        self.student_name.clear();
        self.name_locked = false;
        self.name_error = None;
        self.session = QuizSession::default();
        self.lifetime = LifetimeTotals::default();
        self.source = None;
        self.error = None;
        self.phase = Phase::Farewell;
        info!(target: "math_tutor", "Student logged out");
    }

    pub fn back_from_farewell(&mut self) {
        if self.phase == Phase::Farewell {
            self.phase = Phase::NamePrompt;
        }
    }

    // --- Selection ---

    /// Pick a grade; the topic resets to the grade's first topic.
    pub fn select_grade(&mut self, value: &str) -> bool {
        let Some(grade) = catalog::grade(value) else { return false };
        self.grade = Some(grade);
        self.topic = grade.first_topic();
        self.error = None;
        true
    }

    pub fn select_topic(&mut self, value: &str) -> bool {
        let Some(topic) = self.grade.and_then(|g| catalog::topic_for(g, value)) else { return false };
        self.topic = Some(topic);
        self.error = None;
        true
    }

    /// Selectable topics for the current grade: its own list, then `mixed` and the core skills.
    pub fn available_topics(&self) -> Vec<&'static Topic> {
        match self.grade {
            Some(g) => g
                .topics
                .iter()
                .chain(std::iter::once(&MIXED_TOPIC))
                .chain(CORE_SKILLS.iter())
                .collect(),
            None => Vec::new(),
        }
    }

    /// "Easy"/"Hard" for the selected grade, "Easy" before a grade is chosen.
    pub fn difficulty_label(&self) -> &'static str {
        self.grade.map(|g| g.level().label()).unwrap_or("Easy")
    }

    /// Leave the completion screen for the selection menus, keeping the finished session.
    pub fn reconfigure(&mut self) {
        if self.phase == Phase::Completed {
            self.phase = Phase::Configuring;
        }
    }

    // --- Generation ---

    /// Validate the selection and enter `Loading`. Returns the request to send, or None
    /// with `error`/`name_error` explaining why not.
    pub fn begin_generate(&mut self) -> Option<GenerateIn> {
        self.generate_with(self.grade, self.topic)
    }

    /// Request a set for `grade`/`topic`, remembering the current selection so a failed
    /// request can put it back.
    fn generate_with(&mut self, grade: Option<&'static Grade>, topic: Option<&'static Topic>) -> Option<GenerateIn> {
        if self.phase == Phase::Loading {
            return None;
        }
        if self.student_name.trim().is_empty() {
            self.name_error = Some(NAME_REQUIRED.to_string());
            self.phase = Phase::NamePrompt;
            return None;
        }
        let Some(grade) = grade else {
            self.error = Some(GRADE_REQUIRED.to_string());
            return None;
        };
        let Some(topic) = topic else {
            self.error = Some(TOPIC_REQUIRED.to_string());
            return None;
        };

        self.error = None;
        self.resume_phase = self.phase;
        self.resume_selection = (self.grade, self.topic);
        self.grade = Some(grade);
        self.topic = Some(topic);
        self.phase = Phase::Loading;
        debug!(target: "math_tutor", grade = grade.value, topic = topic.value, "Requesting questions");
        Some(GenerateIn { topic: topic.value.to_string(), grade: grade.value.to_string() })
    }

    /// Apply the generation result. Only a complete, valid set starts a quiz; anything else
    /// restores the screen and selection from before the request and keeps the previous quiz.
    pub fn finish_generate<R: Rng + ?Sized>(&mut self, result: Result<GenerateOut, ClientError>, rng: &mut R) {
        if self.phase != Phase::Loading {
            return;
        }
        let out = match result {
            Ok(out) => out,
            Err(e) => {
                warn!(target: "math_tutor", error = %e, "Question generation failed");
                self.restore_after_failure(e.user_message());
                return;
            }
        };
        let set = QuestionSet { questions: out.questions };
        if let Err(e) = validate_set(&set) {
            warn!(target: "math_tutor", error = %e, "Server sent an invalid question set");
            self.restore_after_failure(GENERIC_FAILURE.to_string());
            return;
        }

        self.session = QuizSession::shuffled(&set.questions, rng);
        self.source = out.source;
        self.error = None;
        self.phase = Phase::Presenting(0);
        info!(target: "math_tutor", session = %self.session.id, count = self.session.len(), source = ?self.source, "Quiz started");
    }

    fn restore_after_failure(&mut self, message: String) {
        self.error = Some(message);
        self.phase = self.resume_phase;
        (self.grade, self.topic) = self.resume_selection;
    }

    // --- Quiz ---

    /// Answer the current question. Only the first answer counts.
    pub fn select_answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        let Phase::Presenting(index) = self.phase else { return None };
        let question = self.session.current_question()?.clone();
        let response = self.session.record(&question.id, choice)?;
        self.lifetime.record(response.is_correct);
        self.phase = Phase::Feedback(index);
        Some(AnswerOutcome {
            tone: Tone::for_answer(response.is_correct),
            advance_after: if response.is_correct { CORRECT_ADVANCE } else { INCORRECT_ADVANCE },
            message: feedback_message(&question, &response),
            response,
        })
    }

    /// Auto-advance after feedback: next question, or the completion summary.
    pub fn advance(&mut self) -> Phase {
        if let Phase::Feedback(_) = self.phase {
            self.phase = if self.session.advance() {
                Phase::Presenting(self.session.current_index())
            } else {
                Phase::Completed
            };
        }
        self.phase
    }

    /// Text of the current question for read-aloud.
    pub fn speak_current(&self) -> Option<Utterance> {
        match self.phase {
            Phase::Presenting(_) | Phase::Feedback(_) => {
                self.session.current_question().map(|q| Utterance::new(q.question.clone()))
            }
            _ => None,
        }
    }

    pub fn summary(&self) -> CompletionSummary {
        let answers = self
            .session
            .questions()
            .iter()
            .map(|q| {
                let resp = self.session.response(&q.id);
                AnswerLine {
                    question: q.question.clone(),
                    correct_answer: q.correct_answer.clone(),
                    choice: resp.map(|r| r.choice.clone()),
                    is_correct: resp.map(|r| r.is_correct).unwrap_or(false),
                }
            })
            .collect();
        CompletionSummary {
            score: self.session.score(),
            total: self.session.len(),
            answers,
            lifetime: self.lifetime,
        }
    }

    /// "Start again": same topic, or the next grade and its first topic when the score
    /// ratio reached the threshold. The top grade stays where it is.
    pub fn start_again(&mut self) -> Option<GenerateIn> {
        if self.phase != Phase::Completed {
            return None;
        }
        let (mut grade, mut topic) = (self.grade, self.topic);
        if self.session.ratio() >= PROMOTION_RATIO {
            let current = self.grade.map(|g| g.value);
            if let Some(next) = current.and_then(catalog::next_grade).filter(|n| Some(n.value) != current) {
                info!(target: "math_tutor", grade = next.value, "Promoted to next grade");
                grade = Some(next);
                topic = next.first_topic();
            }
        }
        self.generate_with(grade, topic)
    }

    /// "Practice next topic": the following topic of the same grade, wrapping.
    pub fn practice_next_topic(&mut self) -> Option<GenerateIn> {
        if self.phase != Phase::Completed {
            return None;
        }
        let topic = match self.grade {
            Some(grade) => {
                let current = self.topic.map(|t| t.value).unwrap_or_default();
                grade.next_topic(current).or(self.topic)
            }
            None => self.topic,
        };
        self.generate_with(self.grade, topic)
    }

    // --- Accessors ---

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn name_locked(&self) -> bool {
        self.name_locked
    }

    pub fn name_error(&self) -> Option<&str> {
        self.name_error.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn grade(&self) -> Option<&'static Grade> {
        self.grade
    }

    pub fn topic(&self) -> Option<&'static Topic> {
        self.topic
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn lifetime(&self) -> LifetimeTotals {
        self.lifetime
    }

    /// Set when the last quiz came from the offline bank.
    pub fn source(&self) -> Option<QuestionSource> {
        self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline_bank::placeholder_question;
    use crate::profile::MemoryNameStore;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn ten(kind: &str) -> GenerateOut {
        GenerateOut {
            questions: (1..=10).map(|n| placeholder_question(n, kind)).collect(),
            source: None,
        }
    }

    fn signed_in() -> TutorApp<MemoryNameStore> {
        let mut app = TutorApp::new(MemoryNameStore { name: Some("Ada".into()) });
        app.load();
        app
    }

    /// Signed in, grade 2 addition, quiz running.
    fn running() -> TutorApp<MemoryNameStore> {
        let mut app = signed_in();
        assert!(app.select_grade("2"));
        assert!(app.select_topic("addition"));
        let req = app.begin_generate().unwrap();
        assert_eq!(req, GenerateIn { topic: "addition".into(), grade: "2".into() });
        app.finish_generate(Ok(ten("addition")), &mut rng());
        app
    }

    fn answer_current(app: &mut TutorApp<MemoryNameStore>, correct: bool) -> AnswerOutcome {
        let q = app.session().current_question().unwrap().clone();
        let choice = if correct {
            q.correct_answer.clone()
        } else {
            q.options.iter().find(|o| **o != q.correct_answer).unwrap().clone()
        };
        app.select_answer(&choice).unwrap()
    }

    #[test]
    fn stored_name_skips_prompt() {
        let app = signed_in();
        assert_eq!(app.phase(), Phase::Configuring);
        assert!(app.name_locked());
        assert_eq!(app.student_name(), "Ada");
    }

    #[test]
    fn missing_name_opens_prompt_and_rejects_blank() {
        let mut app = TutorApp::new(MemoryNameStore::default());
        app.load();
        assert_eq!(app.phase(), Phase::NamePrompt);

        app.set_name("   ");
        assert!(!app.save_name());
        assert_eq!(app.name_error(), Some(NAME_REQUIRED));

        app.set_name("  Grace ");
        assert!(app.save_name());
        assert_eq!(app.phase(), Phase::Configuring);
        assert_eq!(app.store().name.as_deref(), Some("Grace"));
        assert!(app.name_error().is_none());
    }

    #[test]
    fn grade_change_resets_topic() {
        let mut app = signed_in();
        app.select_grade("1");
        assert_eq!(app.topic().unwrap().value, "g1-numbers-100");
        app.select_topic("g1-time");
        app.select_grade("4");
        assert_eq!(app.topic().unwrap().value, "g4-numbers-1m");
        assert_eq!(app.difficulty_label(), "Hard");
        assert!(!app.select_topic("g1-time"));
        assert!(!app.select_grade("13"));
    }

    #[test]
    fn generate_requires_name_then_grade() {
        let mut app = TutorApp::new(MemoryNameStore::default());
        app.load();
        app.dismiss_name_prompt();
        assert!(app.begin_generate().is_none());
        assert_eq!(app.phase(), Phase::NamePrompt);
        assert_eq!(app.name_error(), Some(NAME_REQUIRED));

        app.dismiss_name_prompt();
        assert_eq!(app.phase(), Phase::Configuring);
        app.open_name_prompt();
        assert_eq!(app.phase(), Phase::NamePrompt);

        let mut app = signed_in();
        app.open_name_prompt();
        assert_eq!(app.phase(), Phase::Configuring);
        assert!(app.begin_generate().is_none());
        assert_eq!(app.error(), Some(GRADE_REQUIRED));
        assert_eq!(app.phase(), Phase::Configuring);
    }

    #[test]
    fn server_failure_with_name_shows_generation_message() {
        let mut app = signed_in();
        app.select_grade("2");
        app.begin_generate().unwrap();
        let err = ClientError::Server { status: 500, message: "The question generator is not configured.".into() };
        app.finish_generate(Err(err), &mut rng());
        assert_eq!(app.phase(), Phase::Configuring);
        assert_eq!(app.error(), Some("The question generator is not configured."));
        assert!(app.name_error().is_none());
        assert!(app.session().is_empty());
    }

    #[test]
    fn failure_keeps_previous_quiz() {
        let mut app = running();
        for _ in 0..10 {
            answer_current(&mut app, true);
            app.advance();
        }
        assert_eq!(app.phase(), Phase::Completed);
        let before = app.session().id;

        let req = app.practice_next_topic().unwrap();
        assert_ne!(req.topic, "addition");
        app.finish_generate(Err(ClientError::Transport("refused".into())), &mut rng());
        assert_eq!(app.phase(), Phase::Completed);
        assert_eq!(app.session().id, before);
        assert_eq!(app.session().score(), 10);
        assert!(app.error().is_some());
        assert_eq!(app.topic().unwrap().value, "addition");

        app.start_again().unwrap();
        assert_eq!(app.grade().unwrap().value, "3");
        app.finish_generate(Err(ClientError::Transport("refused".into())), &mut rng());
        assert_eq!(app.grade().unwrap().value, "2");
        assert_eq!(app.topic().unwrap().value, "addition");
    }

    #[test]
    fn invalid_set_is_never_presented() {
        let mut app = running();
        for _ in 0..10 {
            answer_current(&mut app, true);
            app.advance();
        }
        let before = app.session().id;

        app.start_again().unwrap();
        let mut short = ten("g3-numbers-10000");
        short.questions.truncate(3);
        short.questions[0].correct_answer = "not-an-option".into();
        app.finish_generate(Ok(short), &mut rng());

        assert_eq!(app.phase(), Phase::Completed);
        assert_eq!(app.session().id, before);
        assert_eq!(app.error(), Some(GENERIC_FAILURE));
        assert_eq!(app.grade().unwrap().value, "2");

        app.start_again().unwrap();
        let mut bad_answer = ten("g3-numbers-10000");
        bad_answer.questions[4].correct_answer = "0".into();
        app.finish_generate(Ok(bad_answer), &mut rng());
        assert_eq!(app.phase(), Phase::Completed);
        assert_eq!(app.session().id, before);
    }

    #[test]
    fn correct_answer_scores_once_and_advances_quickly() {
        let mut app = running();
        assert_eq!(app.phase(), Phase::Presenting(0));
        let outcome = answer_current(&mut app, true);
        assert!(outcome.response.is_correct);
        assert_eq!(outcome.advance_after, CORRECT_ADVANCE);
        assert_eq!(outcome.tone.frequency_hz, 880.0);
        assert_eq!(app.session().score(), 1);
        assert_eq!(app.lifetime(), LifetimeTotals { correct: 1, attempts: 1 });
        assert_eq!(app.phase(), Phase::Feedback(0));

        // A second click on the same question changes nothing.
        let q = app.session().current_question().unwrap().clone();
        assert!(app.select_answer(&q.options[0]).is_none());
        assert_eq!(app.lifetime(), LifetimeTotals { correct: 1, attempts: 1 });

        assert_eq!(app.advance(), Phase::Presenting(1));
    }

    #[test]
    fn wrong_answer_waits_longer_and_reveals_answer() {
        let mut app = running();
        let q = app.session().current_question().unwrap().clone();
        let outcome = answer_current(&mut app, false);
        assert!(!outcome.response.is_correct);
        assert_eq!(outcome.advance_after, INCORRECT_ADVANCE);
        assert_eq!(outcome.tone.frequency_hz, 220.0);
        assert!(outcome.message.starts_with(&format!("Good try. Correct answer: {}.", q.correct_answer)));
        assert_eq!(app.session().score(), 0);
        assert_eq!(app.lifetime(), LifetimeTotals { correct: 0, attempts: 1 });
    }

    #[test]
    fn summary_lists_every_answer() {
        let mut app = running();
        for i in 0..10 {
            answer_current(&mut app, i % 2 == 0);
            app.advance();
        }
        let summary = app.summary();
        assert_eq!((summary.score, summary.total), (5, 10));
        assert_eq!(summary.answers.len(), 10);
        assert!(summary.answers.iter().all(|a| a.choice.is_some()));
        assert_eq!(summary.lifetime.attempts, 10);
    }

    #[test]
    fn high_score_restart_promotes_grade() {
        let mut app = running();
        for i in 0..10 {
            answer_current(&mut app, i < 8);
            app.advance();
        }
        let req = app.start_again().unwrap();
        assert_eq!(req, GenerateIn { topic: "g3-numbers-10000".into(), grade: "3".into() });
        assert_eq!(app.phase(), Phase::Loading);
    }

    #[test]
    fn high_score_restart_at_top_grade_keeps_topic() {
        let mut app = signed_in();
        app.select_grade("6");
        assert!(app.select_topic("g6-rational"));
        app.begin_generate().unwrap();
        app.finish_generate(Ok(ten("g6-rational")), &mut rng());
        for _ in 0..10 {
            answer_current(&mut app, true);
            app.advance();
        }
        let req = app.start_again().unwrap();
        assert_eq!(req, GenerateIn { topic: "g6-rational".into(), grade: "6".into() });
    }

    #[test]
    fn low_score_restart_keeps_grade() {
        let mut app = running();
        for i in 0..10 {
            answer_current(&mut app, i < 7);
            app.advance();
        }
        let req = app.start_again().unwrap();
        assert_eq!(req, GenerateIn { topic: "addition".into(), grade: "2".into() });
    }

    #[test]
    fn promotion_from_kindergarten_reaches_grade_one() {
        let mut app = signed_in();
        app.select_grade("kg");
        app.begin_generate().unwrap();
        app.finish_generate(Ok(ten("kg-count-20")), &mut rng());
        for _ in 0..10 {
            answer_current(&mut app, true);
            app.advance();
        }
        let req = app.start_again().unwrap();
        assert_eq!(req, GenerateIn { topic: "g1-numbers-100".into(), grade: "1".into() });
    }

    #[test]
    fn next_topic_cycles_within_grade() {
        let mut app = signed_in();
        app.select_grade("nursery");
        app.select_topic("nursery-size");
        app.begin_generate().unwrap();
        app.finish_generate(Ok(ten("nursery-size")), &mut rng());
        for _ in 0..10 {
            answer_current(&mut app, false);
            app.advance();
        }
        let req = app.practice_next_topic().unwrap();
        assert_eq!(req, GenerateIn { topic: "nursery-counting-10".into(), grade: "nursery".into() });
    }

    #[test]
    fn logout_clears_identity_and_session() {
        let mut app = running();
        answer_current(&mut app, true);
        app.logout();
        assert_eq!(app.phase(), Phase::Farewell);
        assert!(app.store().name.is_none());
        assert!(app.student_name().is_empty());
        assert!(app.session().is_empty());
        assert_eq!(app.lifetime(), LifetimeTotals::default());

        app.back_from_farewell();
        assert_eq!(app.phase(), Phase::NamePrompt);
    }

    #[test]
    fn offline_source_is_exposed() {
        let mut app = signed_in();
        app.select_grade("6");
        app.begin_generate().unwrap();
        let mut out = ten("g6-integers");
        out.source = Some(QuestionSource::Offline);
        app.finish_generate(Ok(out), &mut rng());
        assert_eq!(app.source(), Some(QuestionSource::Offline));
        assert!(app.speak_current().is_some());
    }

    #[test]
    fn loading_blocks_a_second_request() {
        let mut app = signed_in();
        app.select_grade("3");
        assert!(app.begin_generate().is_some());
        assert!(app.begin_generate().is_none());
    }
}
