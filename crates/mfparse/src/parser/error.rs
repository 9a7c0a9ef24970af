//! Syntax error type for message patterns.

use thiserror::Error;

/// Text reported as `found` when the pattern ended too early.
pub const END_OF_PATTERN: &str = "end of message pattern";

/// The pattern violated the message grammar.
///
/// `message` has one of the shapes `Expected <thing> but found <found>`,
/// `Unexpected <found> found`, `"other" sub-message must be specified in
/// <construct>`, or `Sub-messages nested deeper than <limit> levels`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} in {pattern}")]
pub struct SyntaxError {
    pub message: String,
    /// What the grammar required at the error position, if anything.
    pub expected: Option<String>,
    /// The identifier or character at the error position.
    pub found: String,
    /// Byte offset of the error position.
    pub offset: usize,
    /// 1-based line of the error position.
    pub line: usize,
    /// 1-based column of the error position, in characters.
    pub column: usize,
    /// The pattern with `\r\n` line endings normalized to `\n`.
    pub pattern: String,
}

impl SyntaxError {
    pub(crate) fn expected(pattern: &str, offset: usize, expected: &str, found: String) -> Self {
        let message = format!("Expected {expected} but found {found}");
        Self::new(pattern, offset, message, Some(expected.to_string()), found)
    }

    pub(crate) fn unexpected(pattern: &str, offset: usize, found: String) -> Self {
        let message = format!("Unexpected {found} found");
        Self::new(pattern, offset, message, None, found)
    }

    pub(crate) fn missing_other(
        pattern: &str,
        offset: usize,
        construct: &str,
        found: String,
    ) -> Self {
        let message = format!("\"other\" sub-message must be specified in {construct}");
        Self::new(pattern, offset, message, None, found)
    }

    pub(crate) fn too_deep(pattern: &str, offset: usize, limit: usize, found: String) -> Self {
        let message = format!("Sub-messages nested deeper than {limit} levels");
        Self::new(pattern, offset, message, None, found)
    }

    fn new(
        pattern: &str,
        offset: usize,
        message: String,
        expected: Option<String>,
        found: String,
    ) -> Self {
        let (line, column) = calculate_position(pattern, offset);
        Self {
            message,
            expected,
            found,
            offset,
            line,
            column,
            pattern: pattern.replace("\r\n", "\n"),
        }
    }

    /// Whether the error was raised because the pattern ended too early.
    pub fn is_end_of_pattern(&self) -> bool {
        self.found == END_OF_PATTERN
    }
}

/// Calculate line and column from the original input and a byte offset.
fn calculate_position(pattern: &str, offset: usize) -> (usize, usize) {
    let consumed = pattern.get(..offset).unwrap_or(pattern);
    let line = consumed.matches('\n').count() + 1;
    let last_line = match consumed.rfind('\n') {
        Some(pos) => &consumed[pos + 1..],
        None => consumed,
    };
    let column = last_line.trim_end_matches('\r').chars().count() + 1;
    (line, column)
}
