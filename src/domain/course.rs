//! MOOC API response models.
//!
//! Every field is defaulted and unknown fields are ignored; the platform adds
//! and drops fields without notice.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoocResponse {
    pub code: i64,
    pub result: Option<MocTermResult>,
}

impl MoocResponse {
    pub fn term(&self) -> Option<&MocTermDto> {
        self.result.as_ref().and_then(|r| r.moc_term_dto.as_ref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MocTermResult {
    pub moc_term_dto: Option<MocTermDto>,
}

/// One course term with its chapters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MocTermDto {
    pub id: i64,
    pub course_id: i64,
    pub course_name: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Chapter {
    pub id: i64,
    pub name: Option<String>,
    pub homeworks: Vec<Homework>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Homework {
    pub id: i64,
    pub name: Option<String>,
    pub term_id: i64,
    pub chapter_id: i64,
    pub release_time: i64,
    pub test: Option<HomeworkTest>,
}

/// Test metadata attached to a homework; `deadline` is epoch milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeworkTest {
    pub id: i64,
    pub name: Option<String>,
    pub deadline: i64,
    #[serde(rename = "type")]
    pub kind: i32,
    pub total_score: Option<f64>,
    pub user_score: Option<f64>,
    pub evaluate_start: Option<i64>,
    pub evaluate_end: Option<i64>,
}
