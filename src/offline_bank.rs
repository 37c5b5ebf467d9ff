//! Built-in offline question bank, served when no model attempt succeeds.
//!
//! Pure data plus a lookup: the retry policy lives in `generate`, this module only
//! answers "which questions do we have for this topic". Short sets are padded with
//! placeholder arithmetic so learners always get a full set.

use crate::catalog::{Grade, CORE_SKILLS, MIXED};
use crate::domain::{Question, QUESTIONS_PER_SET};

/// One hand-authored entry. `options` must contain `answer` exactly once.
#[derive(Clone, Copy, Debug)]
pub struct BankEntry {
  pub topic: &'static str,
  pub question: &'static str,
  pub options: [&'static str; 4],
  pub answer: &'static str,
  pub explanation: &'static str,
}

const fn e(
  topic: &'static str,
  question: &'static str,
  options: [&'static str; 4],
  answer: &'static str,
  explanation: &'static str,
) -> BankEntry {
  BankEntry { topic, question, options, answer, explanation }
}

pub static BANK: &[BankEntry] = &[
  e("addition", "What is 23 + 14?", ["37", "36", "47", "27"], "37", "3 ones plus 4 ones is 7 ones; 2 tens plus 1 ten is 3 tens."),
  e("addition", "What is 45 + 28?", ["73", "63", "72", "83"], "73", "5 + 8 = 13, so carry 1 ten: 4 + 2 + 1 = 7 tens."),
  e("addition", "What is 36 + 36?", ["72", "62", "66", "76"], "72", "6 + 6 = 12, carry 1; 3 + 3 + 1 = 7."),
  e("addition", "Sam has 19 stickers and gets 12 more. How many now?", ["31", "21", "30", "32"], "31", "19 + 12 = 31."),
  e("addition", "What is 50 + 40?", ["90", "80", "100", "94"], "90", "5 tens plus 4 tens is 9 tens."),
  e("borrowing", "What is 42 - 17?", ["25", "35", "24", "29"], "25", "Borrow a ten: 12 - 7 = 5 and 3 - 1 = 2."),
  e("borrowing", "What is 60 - 28?", ["32", "42", "38", "22"], "32", "Borrow a ten: 10 - 8 = 2 and 5 - 2 = 3."),
  e("borrowing", "What is 73 - 46?", ["27", "37", "33", "26"], "27", "13 - 6 = 7 and 6 - 4 = 2."),
  e("multiply", "What is 12 × 3?", ["36", "33", "15", "32"], "36", "10 × 3 = 30 and 2 × 3 = 6."),
  e("multiply", "What is 24 × 2?", ["48", "44", "26", "42"], "48", "20 × 2 = 40 and 4 × 2 = 8."),
  e("multiply", "What is 15 × 4?", ["60", "45", "54", "19"], "60", "15 × 4 is 15 + 15 + 15 + 15."),
  e("even-odd", "Which number is even?", ["14", "9", "21", "7"], "14", "Even numbers end in 0, 2, 4, 6 or 8."),
  e("even-odd", "Which number is odd?", ["13", "8", "20", "6"], "13", "Odd numbers end in 1, 3, 5, 7 or 9."),
  e("even-odd", "Is 36 even or odd?", ["Even", "Odd", "Both", "Neither"], "Even", "36 ends in 6, so it is even."),
  e("comparison", "Which sign makes 47 _ 74 true?", ["<", ">", "=", "+"], "<", "47 has fewer tens than 74."),
  e("comparison", "Which number is greater than 58?", ["61", "49", "55", "58"], "61", "61 has 6 tens, more than 5 tens."),
  e("comparison", "Which is smaller: 302 or 230?", ["230", "302", "They are equal", "Cannot tell"], "230", "2 hundreds is less than 3 hundreds."),
  e("order", "Which list is in ascending order?", ["12, 21, 35, 53", "53, 35, 21, 12", "21, 12, 35, 53", "12, 35, 21, 53"], "12, 21, 35, 53", "Ascending means smallest to largest."),
  e("dodging-table", "Skip count by 5: 15, 20, 25, __?", ["30", "26", "35", "40"], "30", "Add 5 each time."),
  e("dodging-table", "Skip count by 2: 8, 10, 12, __?", ["14", "13", "16", "15"], "14", "Add 2 each time."),
  e("inwords", "How do you write 215 in words?", ["Two hundred fifteen", "Two hundred fifty", "Twenty-one five", "Two hundred one five"], "Two hundred fifteen", "2 hundreds, 1 ten and 5 ones."),
  e("write-time", "The short hand is on 3 and the long hand is on 12. What time is it?", ["3:00", "12:15", "12:03", "3:30"], "3:00", "Long hand on 12 means o'clock."),
  e("fractions", "A pizza is cut into 4 equal parts. One part is what fraction?", ["1/4", "1/2", "4/1", "3/4"], "1/4", "One out of four equal parts."),
  e("circle-number", "Which is the largest number: 48, 84, 44, 80?", ["84", "48", "44", "80"], "84", "84 has the most tens and ones."),
  e("mental-maths", "What is 9 + 6?", ["15", "14", "16", "13"], "15", "9 + 1 = 10, then 5 more is 15."),
  e("fill-blanks", "Fill in the blank: 40, 50, __, 70", ["60", "55", "65", "80"], "60", "The pattern adds 10."),
  e("nursery-counting-10", "How many stars? ★ ★ ★", ["3", "2", "4", "5"], "3", "Count each star once: 1, 2, 3."),
  e("nursery-counting-10", "What number comes after 6?", ["7", "5", "8", "6"], "7", "Counting on: 6, 7."),
  e("kg-count-20", "What number comes after 14?", ["15", "13", "16", "41"], "15", "Counting on: 14, 15."),
  e("g1-add-sub-20", "What is 8 + 7?", ["15", "14", "16", "17"], "15", "8 + 2 = 10, then 5 more."),
  e("g1-add-sub-20", "What is 16 - 9?", ["7", "8", "6", "9"], "7", "9 + 7 = 16."),
  e("g2-odd-even", "Which number is odd?", ["27", "40", "18", "32"], "27", "27 ends in 7."),
  e("g2-multiply-tables", "What is 5 × 4?", ["20", "9", "25", "15"], "20", "Four fives make twenty."),
  e("g3-roman", "What number is XIV?", ["14", "16", "9", "114"], "14", "X is 10 and IV is 4."),
  e("g4-prime-composite", "Which number is prime?", ["13", "15", "21", "9"], "13", "13 has only two factors: 1 and 13."),
  e("g5-percentages", "What is 10% of 50?", ["5", "10", "0.5", "50"], "5", "10% means one tenth."),
  e("g6-integers", "What is -3 + 8?", ["5", "-5", "11", "-11"], "5", "Start at -3 and move 8 to the right."),
];

impl BankEntry {
  fn to_question(self, id: usize) -> Question {
    Question {
      id: format!("q{id}"),
      question: self.question.to_string(),
      options: self.options.iter().map(|s| s.to_string()).collect(),
      correct_answer: self.answer.to_string(),
      kind: self.topic.to_string(),
      explanation: Some(self.explanation.to_string()),
    }
  }
}

/// Generic arithmetic stand-in used to pad short sets. `n` starts at 1.
pub fn placeholder_question(n: usize, kind: &str) -> Question {
  let a = n + 2;
  let b = 2 * n + 1;
  let sum = a + b;
  Question {
    id: format!("q{n}"),
    question: format!("What is {a} + {b}?"),
    options: vec![
      (sum + 1).to_string(),
      sum.to_string(),
      (sum - 1).to_string(),
      (sum + 2).to_string(),
    ],
    correct_answer: sum.to_string(),
    kind: kind.to_string(),
    explanation: Some(format!("{a} plus {b} makes {sum}.")),
  }
}

/// Topics whose entries may serve a request: the topic itself, or for `mixed` every
/// grade topic and core skill (falling back to any entry when none match).
fn matches_topic(entry_topic: &str, topic: &str, grade: &Grade) -> bool {
  if topic == MIXED {
    grade.topics.iter().chain(CORE_SKILLS.iter()).any(|t| t.value == entry_topic)
  } else {
    entry_topic == topic
  }
}

/// Exactly ten questions for the topic: bank entries first (built-in, then `extra`),
/// padded with placeholders. Ids are renumbered `q1`..`q10`.
pub fn offline_questions(topic: &str, grade: &Grade, extra: &[Question]) -> Vec<Question> {
  let mut out: Vec<Question> = BANK
    .iter()
    .filter(|b| matches_topic(b.topic, topic, grade))
    .map(|b| b.to_question(0))
    .chain(extra.iter().filter(|q| matches_topic(&q.kind, topic, grade)).cloned())
    .take(QUESTIONS_PER_SET)
    .collect();

  if out.is_empty() && topic == MIXED {
    out = BANK.iter().take(QUESTIONS_PER_SET).map(|b| b.to_question(0)).collect();
  }

  for n in out.len() + 1..=QUESTIONS_PER_SET {
    out.push(placeholder_question(n, topic));
  }
  for (i, q) in out.iter_mut().enumerate() {
    q.id = format!("q{}", i + 1);
  }
  out
}
