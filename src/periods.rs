use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::GradeError;
use crate::model::PeriodRecord;
use crate::store::{Key, RecordStore, StoreError, Table};

/// Separator between the course-id and term components of a period key,
/// e.g. `C101_2025F`.
const KEY_SEPARATOR: char = '_';

/// ISO-8601, offset-aware. A supplied offset is honored as written; only
/// offset-less timestamps (the `YYYY-MM-DDTHH:MM[:SS]` forms) are read as
/// UTC.
fn parse_timestamp(text: &str, field: &'static str) -> Result<DateTime<FixedOffset>, GradeError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(GradeError::TimeFormat { field })
}

fn validated_key(grade_id: &str) -> Result<String, GradeError> {
    let trimmed = grade_id.trim();
    if trimmed.is_empty() {
        return Err(GradeError::EmptyKey);
    }
    if !trimmed.contains(KEY_SEPARATOR) {
        return Err(GradeError::KeyFormat);
    }
    Ok(trimmed.to_string())
}

/// Validates and fully replaces the query window for one gradeId. The
/// original timestamp strings are stored verbatim; `updatedAt` is stamped
/// with the current UTC instant on every write.
pub fn set_period(
    store: &dyn RecordStore,
    grade_id: &str,
    start_time: &str,
    end_time: &str,
) -> Result<PeriodRecord, GradeError> {
    let grade_id = validated_key(grade_id)?;
    let start_time = start_time.trim();
    let end_time = end_time.trim();
    if start_time.is_empty() {
        return Err(GradeError::MissingField("startTime"));
    }
    if end_time.is_empty() {
        return Err(GradeError::MissingField("endTime"));
    }

    let start = parse_timestamp(start_time, "startTime")?;
    let end = parse_timestamp(end_time, "endTime")?;
    if start >= end {
        return Err(GradeError::RangeOrder);
    }

    let record = PeriodRecord {
        grade_id: grade_id.clone(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        updated_at: Utc::now().to_rfc3339(),
    };
    let item = serde_json::to_value(&record).map_err(StoreError::Corrupt)?;
    store.put(Table::Periods, item)?;
    tracing::info!(%grade_id, start_time, end_time, "period window set");
    Ok(record)
}

/// Point lookup of a period record; no validation beyond key presence.
pub fn get_period(store: &dyn RecordStore, grade_id: &str) -> Result<PeriodRecord, GradeError> {
    let trimmed = grade_id.trim();
    if trimmed.is_empty() {
        return Err(GradeError::EmptyKey);
    }
    match store.get(Table::Periods, &Key::partition(trimmed))? {
        Some(item) => decode_record(item),
        None => Err(GradeError::NotFound(format!("period {trimmed}"))),
    }
}

fn decode_record(item: Value) -> Result<PeriodRecord, GradeError> {
    serde_json::from_value(item)
        .map_err(StoreError::Corrupt)
        .map_err(GradeError::from)
}
