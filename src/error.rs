use thiserror::Error;

use crate::store::StoreError;

/// Validation and lookup failures for the grade core. Every variant maps to a
/// stable wire code; row-scoped variants carry the 1-indexed CSV row (data
/// rows start at 2, after the header) so the caller can point at the input.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("{0}")]
    Schema(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("row {row}: studentId, course and term must not be empty")]
    RowIncomplete { row: usize },

    #[error("score must be a number between 0 and 100")]
    InvalidScore,

    #[error("row {row}: score must be a number between 0 and 100")]
    RowScore { row: usize },

    #[error("gradeId must not be empty")]
    EmptyKey,

    #[error("gradeId must look like <courseId>_<term>")]
    KeyFormat,

    #[error("{field} is not a valid ISO-8601 timestamp")]
    TimeFormat { field: &'static str },

    #[error("startTime must be strictly before endTime")]
    RangeOrder,

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GradeError {
    pub fn code(&self) -> &'static str {
        match self {
            GradeError::Schema(_) => "schema_error",
            GradeError::MissingField(_) => "missing_field",
            GradeError::RowIncomplete { .. } => "row_incomplete",
            GradeError::InvalidScore => "invalid_score",
            GradeError::RowScore { .. } => "row_score",
            GradeError::EmptyKey => "empty_key",
            GradeError::KeyFormat => "key_format",
            GradeError::TimeFormat { .. } => "time_format",
            GradeError::RangeOrder => "range_order",
            GradeError::NotFound(_) => "not_found",
            GradeError::Store(_) => "store_error",
        }
    }

    /// CSV row behind a row-scoped failure, for the error details payload.
    pub fn row(&self) -> Option<usize> {
        match self {
            GradeError::RowIncomplete { row } | GradeError::RowScore { row } => Some(*row),
            _ => None,
        }
    }
}
