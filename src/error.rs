//! Error types for recognition and prototype ingestion.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised by the stroke buffer, the matcher and the session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecognizerError {
    /// The stroke already holds `capacity` points; stop appending.
    #[error("stroke is full: capacity of {capacity} points reached")]
    CapacityExceeded { capacity: usize },

    #[error("point index {index} out of range for stroke of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two strokes compared index by index have different lengths.
    #[error("cannot score strokes of different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid prototype set: {0}")]
    InvalidPrototypeSet(String),

    /// Classification was requested before any point was captured.
    #[error("no points captured")]
    EmptyStroke,

    #[error("no prototype for label {label}")]
    UnknownLabel { label: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The stroke spans more than an `i32` coordinate can hold once moved to the origin.
    #[error("stroke extent overflows the coordinate range: ({x}, {y}) from origin")]
    CoordinateOverflow { x: i64, y: i64 },
}

/// Errors raised while reading the prototype data.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("failed to read prototype data: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not hold an integer coordinate.
    #[error("line {line}: expected an integer coordinate, found {value:?}")]
    Parse {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("prototype data too short: expected {expected} coordinates, found {found}")]
    ShortInput { expected: usize, found: usize },

    #[error(transparent)]
    Prototype(#[from] RecognizerError),
}
