//! Error types produced while formatting reports or driving a canvas.

use thiserror::Error;

/// Error returned when a number format specification cannot be parsed or
/// applied to a floating-point value.
///
/// # Examples
///
/// ```
/// use sectionx::{FormatSpecError, NumberFormat};
///
/// let error = NumberFormat::parse(".3d").expect_err("integer codes are rejected");
/// assert_eq!(error, FormatSpecError::UnknownType('d'));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormatSpecError {
    /// Returned when the presentation type is not valid for floats.
    #[error("unknown format code '{0}' for a floating-point value")]
    UnknownType(char),
    /// Returned when characters remain after a complete specification.
    #[error("invalid format specifier '{0}'")]
    Invalid(String),
    /// Returned when a precision marker is not followed by digits.
    #[error("format specifier missing precision")]
    MissingPrecision,
    /// Returned when both grouping separators are requested.
    #[error("cannot specify both ',' and '_'")]
    ConflictingGrouping,
    /// Returned when a grouping separator is combined with a type that forbids it.
    #[error("cannot specify '{grouping}' with '{code}'")]
    GroupingNotAllowed {
        /// The requested separator.
        grouping: char,
        /// The presentation type that rejects it.
        code: char,
    },
    /// Returned when the width or precision does not fit in memory sensibly.
    #[error("too many decimal digits in format string")]
    TooLarge,
}

/// Error returned when writing a results report fails.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Returned when the caller-supplied number format is malformed.
    #[error("invalid number format: {0}")]
    Format(#[from] FormatSpecError),
    /// Returned when a group is gated on a value that is present but its own
    /// values were never computed.
    #[error("no value available for '{label}'")]
    MissingValue {
        /// Label of the line that could not be written.
        label: &'static str,
    },
    /// Returned when the output stream rejects a write.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by the [`HeadlessCanvas`](crate::HeadlessCanvas) backend.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CanvasError {
    /// Returned when a blocking wait starts but every close handle has been
    /// dropped, so the surface could never be dismissed.
    #[error("canvas cannot be closed: every close handle has been dropped")]
    Disconnected,
}

/// Error returned when loading serialized section properties.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the results file cannot be read.
    #[error("failed to read results: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the document is not valid section-properties JSON.
    #[error("failed to parse results: {0}")]
    Json(#[from] serde_json::Error),
}
