use std::fmt;

use thiserror::Error;

use crate::model::{DEFAULT_HINT, Question, QuestionBank, QuestionError, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Fatal outcomes of loading a question table. Both surface to the user as
/// a load-error screen; they are distinct so the message can say whether
/// the file was empty or merely unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("the question table is empty or contains only a header")]
    EmptySource,

    #[error("the question table parsed to zero usable records")]
    NoValidRecords,
}

//
// ─── ROW DIAGNOSTICS ───────────────────────────────────────────────────────────
//

/// Why a data row was skipped. Row-level problems are never fatal; they are
/// reported as diagnostics and the load continues.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkipReason {
    /// Field count differs from the header's.
    FieldCountMismatch { expected: usize, found: usize },
    /// The header itself declares fewer columns than a record needs.
    MissingRequiredFields { found: usize },
    /// Fields were present but failed record validation.
    Invalid(QuestionError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FieldCountMismatch { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            SkipReason::MissingRequiredFields { found } => {
                write!(f, "only {found} fields, a record needs {REQUIRED_FIELDS}")
            }
            SkipReason::Invalid(err) => write!(f, "{err}"),
        }
    }
}

/// One skipped data row, with its 1-based source line number (comment and
/// blank lines count, so the number matches what an editor shows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: SkipReason,
}

//
// ─── PARSED TABLE ──────────────────────────────────────────────────────────────
//

/// Result of parsing the raw table text.
///
/// `columns` holds the lower-cased, trimmed header names. They are parsed
/// for inspection only: field access is positional, so reordering columns
/// in the source silently changes meaning. Kept for compatibility with the
/// data files already in circulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedLine>,
}

impl ParsedTable {
    /// Consume the parse result into an immutable bank.
    #[must_use]
    pub fn into_bank(self) -> QuestionBank {
        QuestionBank::new(self.questions)
    }
}

/// Positional column contract: topic, question, |-joined options, answer,
/// explanation, then an optional hint.
const COL_TOPIC: usize = 0;
const COL_QUESTION: usize = 1;
const COL_OPTIONS: usize = 2;
const COL_ANSWER: usize = 3;
const COL_EXPLANATION: usize = 4;
const COL_HINT: usize = 5;

const REQUIRED_FIELDS: usize = COL_EXPLANATION + 1;

//
// ─── PARSER ────────────────────────────────────────────────────────────────────
//

/// Parse raw comma-separated text into validated questions.
///
/// Blank lines and lines starting with `#` are ignored. The first remaining
/// line is the header; every later line is a record. Records whose field
/// count does not match the header, or whose fields fail validation, are
/// skipped with a diagnostic. Result order preserves input order.
///
/// # Errors
///
/// Returns `ParseError::EmptySource` when no data lines remain after
/// filtering, and `ParseError::NoValidRecords` when every data line was
/// skipped.
pub fn parse_question_table(raw: &str) -> Result<ParsedTable, ParseError> {
    let mut lines = raw.lines().enumerate().filter_map(|(idx, line)| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            Some((idx + 1, line))
        }
    });

    let Some((_, header)) = lines.next() else {
        return Err(ParseError::EmptySource);
    };
    let columns: Vec<String> = header
        .split(',')
        .map(|name| name.trim().to_lowercase())
        .collect();
    let expected = columns.len();

    let mut questions = Vec::new();
    let mut skipped = Vec::new();
    let mut saw_data = false;

    for (line_number, line) in lines {
        saw_data = true;

        let raw_fields: Vec<&str> = line.split(',').collect();
        if raw_fields.len() != expected {
            skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason: SkipReason::FieldCountMismatch {
                    expected,
                    found: raw_fields.len(),
                },
            });
            continue;
        }
        if raw_fields.len() < REQUIRED_FIELDS {
            skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason: SkipReason::MissingRequiredFields {
                    found: raw_fields.len(),
                },
            });
            continue;
        }

        let fields: Vec<&str> = raw_fields.iter().map(|f| unquote(f.trim())).collect();
        let options: Vec<String> = fields[COL_OPTIONS].split('|').map(str::to_string).collect();
        let hint = match fields.get(COL_HINT) {
            Some(h) if !h.is_empty() => (*h).to_string(),
            _ => DEFAULT_HINT.to_string(),
        };

        match Question::new(
            QuestionId::new(u32::try_from(line_number).unwrap_or(u32::MAX)),
            fields[COL_TOPIC],
            fields[COL_QUESTION],
            options,
            fields[COL_ANSWER],
            fields[COL_EXPLANATION],
            hint,
        ) {
            Ok(question) => questions.push(question),
            Err(err) => skipped.push(SkippedLine {
                line_number,
                content: line.to_string(),
                reason: SkipReason::Invalid(err),
            }),
        }
    }

    if !saw_data {
        return Err(ParseError::EmptySource);
    }
    if questions.is_empty() {
        return Err(ParseError::NoValidRecords);
    }

    Ok(ParsedTable {
        columns,
        questions,
        skipped,
    })
}

/// Strip one leading and one trailing double quote, if present.
fn unquote(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
