//! Diagnostic reporting.
//!
//! Everything the parsing core raises is fatal (spec §7: "Every failure is
//! fatal") — `tsig-lex`/`tsig-par` themselves just return `Result<T, E>` and
//! stop. This module is the ambient layer one level up, used by `tsigc` to
//! render a fatal lex/parse error as a human-readable diagnostic with a
//! source snippet and a caret.
//!
//! # Examples
//!
//! ```
//! use tsig_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
//!
//! let diag = DiagnosticBuilder::error("unexpected token `end`")
//!     .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
//!     .help("did you forget a closing `}`?")
//!     .build();
//!
//! let handler = tsig_util::diagnostic::Handler::new();
//! handler.emit_diagnostic(diag);
//! assert!(handler.has_errors());
//! ```

mod builder;
mod codes;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;

use crate::pos::Range;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with severity, range, and optional context.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub range: Range,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, range: Range) -> Self {
        Self {
            level,
            message: message.into(),
            range,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, range: Range) -> Self {
        Self::new(Level::Error, message, range)
    }

    pub fn warning(message: impl Into<String>, range: Range) -> Self {
        Self::new(Level::Warning, message, range)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

/// Collects diagnostics emitted while driving a parse. `tsigc` uses this to
/// accumulate across multiple input files in a single `check` invocation,
/// even though each individual file's parse is itself fail-fast.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a pre-built diagnostic.
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn build_error(&self, range: Range, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).range(range)
    }

    pub fn build_warning(&self, range: Range, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).range(range)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level == Level::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.borrow().iter().filter(|d| d.level == Level::Warning).count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Range;

    #[test]
    fn level_display() {
        assert_eq!(format!("{}", Level::Error), "error");
        assert_eq!(format!("{}", Level::Warning), "warning");
    }

    #[test]
    fn diagnostic_error_sets_level() {
        let diag = Diagnostic::error("test", Range::NULL);
        assert_eq!(diag.level, Level::Error);
    }

    #[test]
    fn diagnostic_builders_chain() {
        let diag = Diagnostic::error("type mismatch", Range::NULL)
            .with_note("expected `Integer`")
            .with_help("try adding a coercion");
        assert_eq!(diag.notes, vec!["expected `Integer`"]);
        assert_eq!(diag.helps, vec!["try adding a coercion"]);
    }

    #[test]
    fn handler_tracks_error_and_warning_counts() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("e", Range::NULL));
        handler.emit_diagnostic(Diagnostic::warning("w", Range::NULL));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn handler_clear_resets_state() {
        let handler = Handler::new();
        handler.emit_diagnostic(Diagnostic::error("e", Range::NULL));
        handler.clear();
        assert!(!handler.has_errors());
    }

    #[test]
    fn handler_build_error_sets_code() {
        let handler = Handler::new();
        handler
            .build_error(Range::NULL, "unexpected token")
            .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
            .emit(&handler);
        assert_eq!(handler.diagnostics()[0].code, Some(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN));
    }
}
