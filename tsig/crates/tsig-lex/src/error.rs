//! Lexical error kinds.
//!
//! Every lexical failure is fatal (spec §4.1 "Failure", §7): the lexer never
//! recovers and continues, it returns one of these from `next_token` and the
//! caller stops.

use thiserror::Error;
use tsig_util::pos::Range;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A byte sequence the lexer has no dispatch for in the current context.
    #[error("unexpected character {ch:?}")]
    UnexpectedChar { ch: char, range: Range },

    /// A quoted form (string, symbol, annotation, back-quoted identifier)
    /// reached end of input before its closing delimiter.
    #[error("unterminated {kind}")]
    UnterminatedQuoted { kind: &'static str, range: Range },

    /// A sigil (`@`, `@@`, `$`) was not followed by a legal identifier.
    #[error("{sigil} must be followed by an identifier")]
    DisallowedChar { sigil: &'static str, range: Range },
}

impl LexError {
    pub fn range(&self) -> Range {
        match self {
            LexError::UnexpectedChar { range, .. } => *range,
            LexError::UnterminatedQuoted { range, .. } => *range,
            LexError::DisallowedChar { range, .. } => *range,
        }
    }
}

pub type LexResult<T> = std::result::Result<T, LexError>;
