//! Public HTTP protocol structs (serde ready), shared by the server and the quiz client.

use serde::{Deserialize, Serialize};

use crate::catalog::{Grade, Topic, CORE_SKILLS, GRADES, MIXED_TOPIC};
use crate::domain::{Level, Question, QuestionSource};

/// Body of `POST /api/generate-questions`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateIn {
    pub topic: String,
    pub grade: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateOut {
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<QuestionSource>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthOut {
    pub ok: bool,
    pub credentials: usize,
    pub offline_fallback: bool,
}

//
// Catalog
//

#[derive(Debug, Serialize)]
pub struct CatalogOut {
    pub grades: Vec<GradeOut>,
    #[serde(rename = "coreSkills")]
    pub core_skills: &'static [Topic],
    pub mixed: &'static Topic,
}

#[derive(Debug, Serialize)]
pub struct GradeOut {
    pub value: &'static str,
    pub label: &'static str,
    pub difficulty: Level,
    pub topics: &'static [Topic],
}

fn grade_out(g: &'static Grade) -> GradeOut {
    GradeOut { value: g.value, label: g.label, difficulty: g.level(), topics: g.topics }
}

pub fn catalog_out() -> CatalogOut {
    CatalogOut {
        grades: GRADES.iter().map(grade_out).collect(),
        core_skills: CORE_SKILLS,
        mixed: &MIXED_TOPIC,
    }
}
