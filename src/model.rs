use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One student's score for one course/term. (studentId, gradeId) is the
/// identity; re-upserting the same pair overwrites the prior value. The
/// score is an exact decimal end to end; serde round-trips it as a string
/// so the stored item never degrades to a binary float.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub student_id: String,
    pub grade_id: String,
    pub course: String,
    pub term: String,
    pub score: Decimal,
}

impl GradeRecord {
    /// Response shape for grade listings: `{course, semester, score}` with
    /// the score as a display float. The only place precision loss is
    /// allowed is this presentation boundary.
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "course": self.course,
            "semester": self.term,
            "score": self.score.to_f64().unwrap_or_default(),
        })
    }
}

/// Permitted query window for one gradeId. At most one per key; every write
/// fully replaces the prior record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub grade_id: String,
    pub start_time: String,
    pub end_time: String,
    pub updated_at: String,
}

fn unfilled() -> String {
    "unfilled".to_string()
}

/// Read-only student profile. Absent fields come back as the "unfilled"
/// sentinel rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub student_id: String,
    #[serde(default = "unfilled")]
    pub name: String,
    #[serde(default = "unfilled")]
    pub class_name: String,
    #[serde(default = "unfilled")]
    pub gender: String,
}
