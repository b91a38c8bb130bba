use std::io;
use std::num::ParseFloatError;

use thiserror::Error;

/// A fatal problem with the structure of an XDI file. No [`XDIFile`](crate::XDIFile)
/// is produced when one of these occurs.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Not an XDI file: the first line must start with `XDI/<version>`, found {0:?}")]
    NotXDI(String),
    #[error("Missing data section: no `#----` line was found before the end of the file")]
    MissingDataSection,
    #[error("Malformed header line {line}: expected `key: value`, found {content:?}")]
    MalformedDirective { line: usize, content: String },
    #[error("Invalid column index {index:?} on line {line}: expected a positive integer")]
    InvalidColumnIndex { line: usize, index: String },
    #[error("Column {index} on line {line} exceeds the maximum of {max} columns")]
    TooManyColumns { line: usize, index: usize, max: usize },
    #[error("No data columns were declared and no data rows were found")]
    NoColumns,
    #[error("Expected {expected} columns on line {line}, found {found}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Non-numeric value {token:?} at line {line}, column {column}: {source}")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("Encountered an IO error: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
}

impl FormatError {
    /// The 1-based line of the input where the error was found, if it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::NotXDI(_) => Some(1),
            Self::MalformedDirective { line, .. }
            | Self::InvalidColumnIndex { line, .. }
            | Self::TooManyColumns { line, .. }
            | Self::ColumnCountMismatch { line, .. }
            | Self::InvalidNumber { line, .. } => Some(*line),
            Self::MissingDataSection | Self::NoColumns | Self::IOError(_) => None,
        }
    }
}

/// A recoverable problem found while reading the header. Parsing continues and
/// the warning is kept on the resulting [`XDIFile`](crate::XDIFile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldWarning {
    #[error("Line {line}: d-spacing {value:?} is not a number, leaving it unset")]
    InvalidDSpacing { line: usize, value: String },
    #[error("Line {line}: {key} should be {expected}, found {value:?}")]
    InvalidFieldValue {
        line: usize,
        key: String,
        value: String,
        expected: String,
    },
    #[error("Line {line}: {value:?} is not an element symbol")]
    UnknownElement { line: usize, value: String },
    #[error("Line {line}: {value:?} is not an absorption edge name")]
    UnknownEdge { line: usize, value: String },
    #[error("Line {line}: {key} was already set, replacing the earlier value")]
    DuplicateKey { line: usize, key: String },
    #[error("Line {line}: {key:?} is not a valid field name, skipping it")]
    InvalidFieldName { line: usize, key: String },
    #[error("Line {line}: {count} column labels beyond the last data column were ignored")]
    UnusedLabels { line: usize, count: usize },
}

impl FieldWarning {
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidDSpacing { line, .. }
            | Self::InvalidFieldValue { line, .. }
            | Self::UnknownElement { line, .. }
            | Self::UnknownEdge { line, .. }
            | Self::DuplicateKey { line, .. }
            | Self::InvalidFieldName { line, .. }
            | Self::UnusedLabels { line, .. } => *line,
        }
    }
}
