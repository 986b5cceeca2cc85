use crate::error::GradeError;

/// Grade keys join percent-encoded components with '+', so a literal '+'
/// (or '%') inside a course or term can never be read as the separator.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Key for the bulk-import path: the studentId is embedded so multiple
/// students' rows for the same course+term stay distinct under one
/// partition key.
pub fn derive_grade_id_for_bulk(course: &str, term: &str, student_id: &str) -> String {
    format!(
        "{}+{}+{}",
        encode_component(course),
        encode_component(term),
        encode_component(student_id)
    )
}

/// Key for the single-entry path: course+term only. This intentionally
/// differs from the bulk layout (both call sites of the original system are
/// preserved); two students upserting the same course+term share a sort key
/// and the partition key is what keeps their records apart.
pub fn derive_grade_id_for_single(course: &str, term: &str) -> String {
    format!("{}+{}", encode_component(course), encode_component(term))
}

/// Undoes the transport layer's percent-encoding of a gradeId, exactly once.
/// '+' is a literal separator here, never an encoded space; multi-byte
/// sequences must decode to valid UTF-8 or the key cannot match anything.
pub fn decode_grade_id(encoded: &str) -> Result<String, GradeError> {
    urlencoding::decode(encoded)
        .map(|cow| cow.into_owned())
        .map_err(|_| GradeError::KeyFormat)
}
