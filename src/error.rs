//! Error types for the Gaussian elimination solver.
//!
//! This module provides a unified error type [`SolverError`] that covers
//! all error conditions that can occur while building, solving and
//! checking a linear system, as well as loading one from text.

use thiserror::Error;

/// Result type alias using [`SolverError`].
pub type Result<T> = std::result::Result<T, SolverError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum SolverError {
    // ============ Algebra Errors ============
    /// Sizes of the participating vectors or matrices disagree
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Two equations with a different number of variables were combined
    #[error("Number of variables must be equal in both equations ({left} vs {right})")]
    ArityMismatch { left: usize, right: usize },

    /// Coefficient index past the end of an equation
    #[error("Coefficient index {index} out of range for equation with {len} variables")]
    IndexOutOfRange { index: usize, len: usize },

    // ============ Solving Errors ============
    /// No usable pivot was found, the system has no unique solution
    #[error("Linear system is undefined: zero pivot in row {row} (column {column})")]
    SingularSystem { row: usize, column: usize },

    /// Solve was called on a system that is no longer in its initial state
    #[error("Linear system has already been reduced; build a new one to solve again")]
    AlreadySolved,

    // ============ Input Errors ============
    /// Malformed system description
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a system description file
    #[error("Failed to read system file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ Output Errors ============
    /// Error writing the report
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl SolverError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            found,
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::OutputError {
            message: message.into(),
        }
    }
}
