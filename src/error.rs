//! Error types shared across the crate.
//!
//! Every fallible operation returns [`Result`]. Errors are never retried
//! internally; they propagate synchronously to the caller of the operation
//! that produced them, and a failed parse or pack constructs no value.

use thiserror::Error;

/// All error conditions produced by the decimal and stream subsystems.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed numeric literal or format-descriptor text.
    ///
    /// Local to a single parse call and always recoverable by the caller.
    #[error("invalid format: {0}")]
    Format(String),

    /// A value left the 34-digit / −6176..+6111 exponent envelope, or a
    /// narrowing conversion did not fit the target type exactly.
    #[error("decimal overflow")]
    Overflow,

    /// Unexpected character while tokenizing JSON text.
    ///
    /// Carries the line and column of the offending character, not the
    /// cursor position after it.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-based line of the offending character.
        line: u64,
        /// 1-based column of the offending character.
        column: u64,
        /// What was wrong at that position.
        message: String,
    },

    /// Input ended in the middle of a token or an open container.
    ///
    /// Distinct from [`Error::Syntax`]: it means "need more input", not
    /// "bad input".
    #[error("unexpected end of input")]
    EndOfStream,

    /// API misuse: a value accessor against the wrong token kind, or a
    /// writer call out of grammar order.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The operation requires a capability the source does not have,
    /// e.g. snapshot/restore on a non-seekable stream.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Error from the underlying byte stream.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Construct a [`Error::Syntax`] at the given position.
    pub(crate) fn syntax(line: u64, column: u64, message: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
