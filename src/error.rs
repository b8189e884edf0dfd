//! Error Types
//!
//! Every failure a query can hit on its way through the pipeline is one of the
//! [`DbError`] kinds. They are terminal for the current query: nothing in the
//! core retries, the caller has to submit a new line.
//!
//! Startup failures are kept apart in [`InitError`]. They are reported once,
//! before the first query is read, and abort initialization.

use thiserror::Error;

/// Errors produced while handling a single query.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DbError {
    /// The tokenizer met a character outside `[A-Za-z0-9_]` and whitespace
    #[error("invalid symbol")]
    InvalidSymbol,

    /// Empty input or an unrecognized command name
    #[error("invalid command")]
    InvalidCommand,

    /// Wrong argument count for the matched command
    #[error("invalid arguments")]
    InvalidArguments,

    /// The execution context was cancelled before the operation started
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for query handling.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while building the database from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitError {
    /// The configured engine name is not one we can build
    #[error("unknown engine type: {0}")]
    UnknownEngine(String),

    /// The configured log level could not be parsed
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    /// A command-line flag was missing its value
    #[error("{0} requires a value")]
    MissingValue(String),

    /// A command-line flag we do not know about
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}
