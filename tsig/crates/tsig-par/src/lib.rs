//! A hand-written recursive-descent parser for a structural type-signature
//! language (spec §1): given a source [`Buffer`], produces type
//! expressions, method signatures, or a whole file's top-level
//! declarations.
//!
//! Fail-fast (spec §4.7/§7): the first syntax or lexical error aborts the
//! parse with a [`ParseError`] naming the buffer, position, expected
//! production, and actual token — there is no panic-mode recovery and no
//! partial AST is returned.
//!
//! The three entry points mirror spec §6 exactly: [`parse_type`] for a
//! single type expression, [`parse_method_type`] for a single method
//! signature, and [`parse_signature`] for a whole buffer's declarations.

pub mod ast;
mod error;
mod function;
mod scope;
mod state;
mod types;

mod decl;

pub use ast::*;
pub use error::{ParseError, ParseResult};

use tsig_util::buffer::Buffer;
use tsig_util::symbol::Symbol;

use state::ParserState;

/// Drives the lexer over a single buffer and turns its token stream into
/// AST nodes. One `Parser` is good for exactly one of the three
/// productions below; the pieces live in sibling modules (`types`,
/// `function`, `decl`) as `impl<'a> Parser<'a>` blocks, all sharing this
/// struct's one field.
pub struct Parser<'a> {
    pub(crate) state: ParserState<'a>,
}

impl<'a> Parser<'a> {
    fn at(buffer: &'a Buffer, line: u32, col: u32, tvars: &[Symbol]) -> ParseResult<Self> {
        let mut state = ParserState::at(buffer, line, col)?;
        if !tvars.is_empty() {
            state.scopes.push(false);
            for sym in tvars {
                state.scopes.insert(*sym);
            }
        }
        Ok(Self { state })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(buffer: &'a Buffer) -> ParseResult<Self> {
        Self::at(buffer, 1, 1, &[])
    }

    fn finish_with_buffer_name<T>(&self, result: ParseResult<T>) -> ParseResult<T> {
        result.map_err(|e| e.with_buffer_name(self.state.buffer().name()))
    }
}

/// Parses exactly one type expression starting at `line`/`col` in
/// `buffer`, with `tvars` seeded into scope as though an enclosing
/// `method_type`'s type-parameter list had already introduced them.
pub fn parse_type(buffer: &Buffer, line: u32, col: u32, tvars: &[Symbol]) -> ParseResult<Type> {
    let mut parser = Parser::at(buffer, line, col, tvars)?;
    let ty = parser.parse_type();
    parser.finish_with_buffer_name(ty)
}

/// Parses exactly one method type starting at `line`/`col` in `buffer`,
/// with `tvars` seeded into the outer scope the method type's own
/// (possibly absent) `[...]` list nests inside.
pub fn parse_method_type(buffer: &Buffer, line: u32, col: u32, tvars: &[Symbol]) -> ParseResult<MethodType> {
    let mut parser = Parser::at(buffer, line, col, tvars)?;
    let mt = parser.parse_method_type();
    parser.finish_with_buffer_name(mt)
}

/// Parses a whole buffer as a sequence of declarations (spec §4.6),
/// running to EOF. An empty buffer, or one containing only comments,
/// yields an empty list.
pub fn parse_signature(buffer: &Buffer, line: u32, col: u32) -> ParseResult<Vec<Declaration>> {
    let mut parser = Parser::at(buffer, line, col, &[])?;
    let decls = parser.parse_declarations();
    parser.finish_with_buffer_name(decls)
}
