use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::GradeError;
use crate::keys;
use crate::model::GradeRecord;
use crate::store::{Key, RecordStore, StoreError, Table};

fn required(value: &str, field: &'static str) -> Result<String, GradeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GradeError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Exact-decimal score in [0, 100], or None when the text is not a number.
/// Exponent forms like "9.5e1" are accepted, matching the float coercion of
/// the upstream clients.
pub(crate) fn parse_score(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let score = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    if score < Decimal::ZERO || score > Decimal::from(100) {
        return None;
    }
    Some(score)
}

/// Score coercion for the single-entry path: numeric JSON values and
/// numeric-looking strings are both accepted. An absent or blank score is a
/// missing field, like the other three; InvalidScore is reserved for values
/// that are present but not a number in range.
fn coerce_score(value: &Value) -> Result<Decimal, GradeError> {
    let text = match value {
        Value::Null => return Err(GradeError::MissingField("score")),
        Value::String(s) if s.trim().is_empty() => {
            return Err(GradeError::MissingField("score"))
        }
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(GradeError::InvalidScore),
    };
    parse_score(&text).ok_or(GradeError::InvalidScore)
}

fn decode_record(item: Value) -> Result<GradeRecord, GradeError> {
    serde_json::from_value(item)
        .map_err(StoreError::Corrupt)
        .map_err(GradeError::from)
}

/// Validates and persists one grade record. The gradeId carries course+term
/// only on this path (the bulk importer embeds the studentId as well); one
/// unconditional put, so identical input always lands on identical state.
pub fn upsert_grade(
    store: &dyn RecordStore,
    student_id: &str,
    course: &str,
    score: &Value,
    term: &str,
) -> Result<GradeRecord, GradeError> {
    let student_id = required(student_id, "studentId")?;
    let course = required(course, "courseName")?;
    let term = required(term, "semester")?;
    let score = coerce_score(score)?;

    let record = GradeRecord {
        grade_id: keys::derive_grade_id_for_single(&course, &term),
        student_id,
        course,
        term,
        score,
    };
    let item = serde_json::to_value(&record).map_err(StoreError::Corrupt)?;
    store.put(Table::Grades, item)?;
    Ok(record)
}

/// All grades under one student's partition key. Unknown students get an
/// empty list, not an error.
pub fn query_grades_for_student(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<Vec<GradeRecord>, GradeError> {
    let student_id = required(student_id, "studentId")?;
    store
        .query(Table::Grades, &student_id)?
        .into_iter()
        .map(decode_record)
        .collect()
}

/// Full-table view for the teacher overview.
pub fn scan_grades(store: &dyn RecordStore) -> Result<Vec<GradeRecord>, GradeError> {
    store
        .scan(Table::Grades)?
        .into_iter()
        .map(decode_record)
        .collect()
}

/// Removes one record and returns it for audit. The gradeId arrives
/// transport-encoded and is decoded exactly once before the lookup; a key
/// that decodes to nothing in the table is a NotFound, never a silent no-op.
pub fn delete_grade(
    store: &dyn RecordStore,
    student_id: &str,
    encoded_grade_id: &str,
) -> Result<GradeRecord, GradeError> {
    let student_id = required(student_id, "studentId")?;
    let encoded = required(encoded_grade_id, "gradeId")?;
    let grade_id = keys::decode_grade_id(&encoded)?;
    tracing::info!(%student_id, %grade_id, "deleting grade");

    let key = Key::composite(student_id.clone(), grade_id.clone());
    match store.delete(Table::Grades, &key)? {
        Some(item) => decode_record(item),
        None => Err(GradeError::NotFound(format!(
            "grade {student_id}/{grade_id}"
        ))),
    }
}
