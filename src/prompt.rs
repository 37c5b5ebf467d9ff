//! Prompt construction for question generation.

use crate::catalog::{Grade, Topic, CORE_SKILLS, MIXED};
use crate::domain::Level;
use crate::util::fill_template;

const PROMPT_TEMPLATE: &str = r#"You are a math teacher. Create {article} {level} set of {level_label} questions that keep students engaged and confident.
Topic title: {topic_title}
Topic details: {topic_description}
Difficulty guidance: {guidance}

Return exactly ten unique multiple-choice questions. Each question must be simple, supporting the chosen grade's reading and math skills. Number them implicitly with IDs "q1" through "q10".

The output must be only JSON using the schema below. Do not include any Markdown, explanations, or extra text. Provide four answer options per question, with exactly one correct answer that matches the "correctAnswer" field.
{
  "questions": [
    {
      "id": "q1",
      "question": "Question text with clear context.",
      "options": ["A", "B", "C", "D"],
      "correctAnswer": "A",
      "type": "{topic}",
      "explanation": "Optional short explanation on why the answer is correct."
    }
  ]
}

For the {type_rule}. Ensure exactly one correct answer per question, keep options concise, avoid repeating the correct answer text across multiple options, and do not always place the correct answer as the first option.
"#;

/// Topic ids a `mixed` set rotates through for this grade.
pub fn mixed_rotation(grade: &Grade) -> Vec<&'static str> {
  grade.topics.iter().map(|t| t.value).collect()
}

fn type_rule(topic: &Topic, grade: &Grade) -> String {
  if topic.value == MIXED {
    let slugs = mixed_rotation(grade);
    let slugs = if slugs.is_empty() {
      CORE_SKILLS.iter().map(|t| t.value).collect::<Vec<_>>()
    } else {
      slugs
    };
    format!(
      "mixed topic, rotate through the slug names of the supported topics ({}) so the type field reflects the skill being tested",
      slugs.join(", ")
    )
  } else {
    format!("type field, keep the value \"{}\" so we know the chosen topic", topic.value)
  }
}

/// Build the generation instruction for a validated `(topic, grade)` pair.
pub fn build_prompt(topic: &Topic, grade: &Grade) -> String {
  let level: Level = grade.level();
  let article = if level == Level::Easy { "an" } else { "a" };
  let level_label = format!("{} grade {}", level.as_str(), grade.value.to_uppercase());
  let rule = type_rule(topic, grade);
  fill_template(
    PROMPT_TEMPLATE,
    &[
      ("article", article),
      ("level_label", &level_label),
      ("level", level.as_str()),
      ("topic_title", topic.label),
      ("topic_description", topic.description),
      ("guidance", level.guidance()),
      ("type_rule", &rule),
      ("topic", topic.value),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{grade, topic_for};

  fn prompt_for(topic: &str, g: &str) -> String {
    let g = grade(g).unwrap();
    build_prompt(topic_for(g, topic).unwrap(), g)
  }

  #[test]
  fn lower_grades_get_easy_guidance() {
    let p = prompt_for("addition", "2");
    assert!(p.contains("Create an easy set of easy grade 2 questions"));
    assert!(p.contains(Level::Easy.guidance()));
    assert!(p.contains("keep the value \"addition\""));
    assert!(p.contains("Topic title: 2-digit addition"));
  }

  #[test]
  fn upper_grades_get_hard_guidance() {
    let p = prompt_for("g5-stats", "5");
    assert!(p.contains("Create a hard set of hard grade 5 questions"));
    assert!(p.contains(Level::Hard.guidance()));
    assert!(!p.contains(Level::Easy.guidance()));
  }

  #[test]
  fn mixed_rotates_through_grade_topics() {
    let p = prompt_for(MIXED, "kg1");
    assert!(p.contains("rotate through the slug names"));
    assert!(p.contains("kg1-count-20"));
    assert!(p.contains("kg1-add-sub"));
    assert!(p.contains("grade KG1"));
  }

  #[test]
  fn schema_example_keeps_literal_braces() {
    let p = prompt_for("comparison", "1");
    assert!(p.contains("\"questions\": ["));
    assert!(p.contains("\"type\": \"comparison\""));
  }
}
