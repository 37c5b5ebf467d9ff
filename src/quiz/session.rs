//! One quiz run: the shuffled question list, the learner's answers and the running score.

use std::collections::HashMap;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::domain::Question;

/// Pause before moving on after a correct answer.
pub const CORRECT_ADVANCE: Duration = Duration::from_millis(1100);
/// Longer pause after a miss, so the learner can read the correction.
pub const INCORRECT_ADVANCE: Duration = Duration::from_millis(1700);

/// Ratio at or above which "Start again" moves up a grade.
pub const PROMOTION_RATIO: f64 = 0.8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub choice: String,
    pub is_correct: bool,
}

/// Copy of `q` with its options in uniformly random order (Fisher–Yates).
pub fn shuffle_options<R: Rng + ?Sized>(q: &Question, rng: &mut R) -> Question {
    let mut out = q.clone();
    out.options.shuffle(rng);
    out
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: Uuid,
    questions: Vec<Question>,
    current: usize,
    responses: HashMap<String, Response>,
    score: usize,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            current: 0,
            responses: HashMap::new(),
            score: 0,
        }
    }

    /// New session with every question's options shuffled.
    pub fn shuffled<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Self {
        Self::new(questions.iter().map(|q| shuffle_options(q, rng)).collect())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn response(&self, question_id: &str) -> Option<&Response> {
        self.responses.get(question_id)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    /// Share of questions answered correctly, 0.0 for an empty session.
    pub fn ratio(&self) -> f64 {
        if self.questions.is_empty() {
            0.0
        } else {
            self.score as f64 / self.questions.len() as f64
        }
    }

    /// Record the first answer for a question. Later answers, and unknown ids, return None
    /// and leave the session unchanged.
    pub fn record(&mut self, question_id: &str, choice: &str) -> Option<Response> {
        if self.responses.contains_key(question_id) {
            return None;
        }
        let question = self.questions.iter().find(|q| q.id == question_id)?;
        let response = Response {
            choice: choice.to_string(),
            is_correct: question.is_correct(choice),
        };
        if response.is_correct {
            self.score += 1;
        }
        self.responses.insert(question_id.to_string(), response.clone());
        Some(response)
    }

    /// Move to the next question. Returns false when the last one was already current.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }
}

/// Counters that survive regeneration for as long as the learner stays signed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifetimeTotals {
    pub correct: usize,
    pub attempts: usize,
}

impl LifetimeTotals {
    pub fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Rounded percentage, 0 before any attempt.
    pub fn percent(&self) -> usize {
        if self.attempts == 0 {
            0
        } else {
            ((self.correct as f64 / self.attempts as f64) * 100.0).round() as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline_bank::placeholder_question;
    use rand::{rngs::StdRng, SeedableRng};

    fn questions() -> Vec<Question> {
        (1..=10).map(|n| placeholder_question(n, "addition")).collect()
    }

    #[test]
    fn shuffle_keeps_options_and_answer() {
        let mut rng = StdRng::seed_from_u64(7);
        for q in questions() {
            for _ in 0..20 {
                let s = shuffle_options(&q, &mut rng);
                let mut before = q.options.clone();
                let mut after = s.options.clone();
                before.sort();
                after.sort();
                assert_eq!(before, after);
                assert_eq!(s.correct_matches(), 1);
                assert_eq!(s.correct_answer, q.correct_answer);
            }
        }
    }

    #[test]
    fn shuffle_moves_the_answer_around() {
        let mut rng = StdRng::seed_from_u64(42);
        let q = placeholder_question(1, "addition");
        let positions: std::collections::HashSet<usize> = (0..200)
            .map(|_| {
                let s = shuffle_options(&q, &mut rng);
                s.options.iter().position(|o| *o == s.correct_answer).unwrap()
            })
            .collect();
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn second_answer_is_a_no_op() {
        let mut session = QuizSession::new(questions());
        let q = session.current_question().unwrap().clone();
        let wrong = q.options.iter().find(|o| **o != q.correct_answer).unwrap().clone();

        let first = session.record(&q.id, &q.correct_answer).unwrap();
        assert!(first.is_correct);
        assert_eq!(session.score(), 1);

        assert!(session.record(&q.id, &wrong).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.answered(), 1);
        assert_eq!(session.response(&q.id), Some(&first));
    }

    #[test]
    fn unknown_question_is_ignored() {
        let mut session = QuizSession::new(questions());
        assert!(session.record("q99", "1").is_none());
        assert_eq!(session.answered(), 0);
    }

    #[test]
    fn advance_stops_at_last_question() {
        let mut session = QuizSession::new(questions());
        for expected in 1..10 {
            assert!(session.advance());
            assert_eq!(session.current_index(), expected);
        }
        assert!(!session.advance());
        assert_eq!(session.current_index(), 9);
    }

    #[test]
    fn lifetime_percent_rounds() {
        let mut totals = LifetimeTotals::default();
        assert_eq!(totals.percent(), 0);
        totals.record(true);
        totals.record(false);
        totals.record(true);
        assert_eq!(totals, LifetimeTotals { correct: 2, attempts: 3 });
        assert_eq!(totals.percent(), 67);
    }
}
