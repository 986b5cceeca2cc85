use crate::error::GradeError;
use crate::keys;
use crate::model::GradeRecord;
use crate::store::{Item, RecordStore, StoreError, Table};

const REQUIRED_COLUMNS: [&str; 4] = ["studentId", "course", "term", "score"];

/// Parses a headered CSV payload and upserts one grade record per data row.
///
/// Rows are numbered from 2 (the header is row 1) in every error; a ragged
/// row (field count differing from the header) is reported as incomplete
/// under its own row number. Import is
/// fail-fast, discard-all: every row is validated and staged before a single
/// batched write, so a bad row anywhere leaves the store untouched. Duplicate
/// (studentId, gradeId) rows within one file: the last one wins silently.
/// Returns the number of data rows imported; a header-only file imports 0.
pub fn import_grades_csv(store: &dyn RecordStore, raw_text: &str) -> Result<usize, GradeError> {
    let mut reader = csv::Reader::from_reader(raw_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| GradeError::Schema(format!("csv header is unreadable: {e}")))?
        .clone();
    let positions = column_positions(&headers)?;

    let mut staged: Vec<Item> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 2;
        // A ragged row is that row's problem, not a schema problem.
        let record = record.map_err(|e| match e.kind() {
            csv::ErrorKind::UnequalLengths { .. } => GradeError::RowIncomplete { row },
            _ => GradeError::Schema(format!("csv row {row} is unreadable: {e}")),
        })?;
        let field = |col: usize| record.get(col).unwrap_or("").trim();

        let student_id = field(positions[0]);
        let course = field(positions[1]);
        let term = field(positions[2]);
        if student_id.is_empty() || course.is_empty() || term.is_empty() {
            return Err(GradeError::RowIncomplete { row });
        }

        let score = crate::grades::parse_score(field(positions[3]))
            .ok_or(GradeError::RowScore { row })?;

        let grade = GradeRecord {
            grade_id: keys::derive_grade_id_for_bulk(course, term, student_id),
            student_id: student_id.to_string(),
            course: course.to_string(),
            term: term.to_string(),
            score,
        };
        staged.push(serde_json::to_value(&grade).map_err(StoreError::Corrupt)?);
    }

    let count = staged.len();
    store.batch_put(Table::Grades, staged)?;
    tracing::info!(count, "bulk grade import committed");
    Ok(count)
}

/// Column index of each required header, in REQUIRED_COLUMNS order. Extra
/// columns are ignored; header order is free.
fn column_positions(headers: &csv::StringRecord) -> Result<[usize; 4], GradeError> {
    let mut positions = [0usize; 4];
    let mut missing = Vec::new();
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h.trim() == *name) {
            Some(col) => positions[slot] = col,
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(GradeError::Schema(format!(
            "csv is missing required columns: {}",
            missing.join(", ")
        )));
    }
    Ok(positions)
}
