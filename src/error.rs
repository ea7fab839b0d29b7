//! All error types for the pocodec crate.
//!
//! These are returned from every fallible operation: registering paths,
//! opening files, and lexing catalog text.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed catalog text. `line` is 1-based.
    #[error("{origin}:{line}: {message}")]
    Lex {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("{origin}:{line}: unreadable line: {source}")]
    Read {
        origin: String,
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Creates a new lexing error for the given source and line.
    pub fn lex_error(origin: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Error::Lex {
            origin: origin.into(),
            line,
            message: message.into(),
        }
    }

    /// Returns the 1-based line number for errors tied to a position in the input.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lex { line, .. } | Error::Read { line, .. } => Some(*line),
            _ => None,
        }
    }
}
