use crate::error::GradeError;
use crate::model::StudentInfo;
use crate::store::{Key, RecordStore, StoreError, Table};

/// Point read of a student profile. The identity string comes from an
/// external auth layer and is used as a lookup key only; absent profile
/// fields fall back to the "unfilled" sentinel during decoding.
pub fn get_student_info(
    store: &dyn RecordStore,
    student_id: &str,
) -> Result<StudentInfo, GradeError> {
    let trimmed = student_id.trim();
    if trimmed.is_empty() {
        return Err(GradeError::MissingField("studentId"));
    }
    match store.get(Table::Students, &Key::partition(trimmed))? {
        Some(item) => serde_json::from_value(item)
            .map_err(StoreError::Corrupt)
            .map_err(GradeError::from),
        None => Err(GradeError::NotFound(format!("student {trimmed}"))),
    }
}
