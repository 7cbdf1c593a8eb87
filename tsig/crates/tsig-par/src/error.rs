//! Parser error types.
//!
//! Grounded on `tsig-lex`'s `error.rs` (itself grounded on the teacher's
//! `report_error` call shape), returning `Result` instead of calling into
//! a `Handler`. Spec §7: every failure is fatal, carrying the buffer
//! name, line/column, a human description of the expected production,
//! and the actual token's kind name.
//!
//! Uses `thiserror` for the `Display`/`Error` impls, same as
//! `tsig_util::error` and `tsig_lex::error`.

use thiserror::Error;
use tsig_lex::LexError;
use tsig_util::pos::Range;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer raised a fatal error while the parser was pulling a
    /// token; `range` is wherever the lexer's own error occurred.
    #[error("{buffer_name}:{}: {message}", range.start)]
    Lex { buffer_name: String, range: Range, message: String },
    /// A production didn't find the token kind it needed.
    #[error("{buffer_name}:{}: expected {expected}, but got {actual}", range.start)]
    UnexpectedToken {
        buffer_name: String,
        range: Range,
        expected: String,
        actual: &'static str,
    },
}

impl ParseError {
    pub fn range(&self) -> Range {
        match self {
            ParseError::Lex { range, .. } => *range,
            ParseError::UnexpectedToken { range, .. } => *range,
        }
    }

    pub fn with_buffer_name(self, name: &str) -> Self {
        match self {
            ParseError::Lex { range, message, .. } => ParseError::Lex {
                buffer_name: name.to_string(),
                range,
                message,
            },
            ParseError::UnexpectedToken { range, expected, actual, .. } => ParseError::UnexpectedToken {
                buffer_name: name.to_string(),
                range,
                expected,
                actual,
            },
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex {
            buffer_name: String::new(),
            range: err.range(),
            message: err.to_string(),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
