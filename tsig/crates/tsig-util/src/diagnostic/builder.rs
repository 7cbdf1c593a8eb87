//! Fluent construction of diagnostics, plus source snippets for rendering
//! them with a caret under the offending range.

use super::{Diagnostic, DiagnosticCode, Level};
use crate::pos::Range;

/// A single source line plus the column range to underline, for display
/// under a diagnostic message.
///
/// # Examples
///
/// ```
/// use tsig_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("class Foo", 1, 1, 6, Some("expected `end`"));
/// let rendered = snippet.format();
/// assert!(rendered.contains("class Foo"));
/// assert!(rendered.contains('^'));
/// ```
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    pub line: String,
    pub line_number: u32,
    pub start_column: u32,
    pub end_column: u32,
    pub label: Option<String>,
}

impl SourceSnippet {
    pub fn new(
        line: impl Into<String>,
        line_number: u32,
        start_column: u32,
        end_column: u32,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    /// A snippet with no highlighted range, just a caret at one column.
    pub fn point(line: impl Into<String>, line_number: u32, column: u32) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column: column,
            end_column: column,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Render as `"{line_number} | {source}\n    | {carets} {label}"`.
    pub fn format(&self) -> String {
        let width = self.line_number.to_string().len().max(3);
        let mut out = String::new();
        out.push_str(&format!("{:>width$} | {}\n", self.line_number, self.line, width = width));
        out.push_str(&format!("{:>width$} | ", "", width = width));

        let underline_start = (self.start_column as usize).saturating_sub(1);
        let underline_len = (self.end_column.saturating_sub(self.start_column)).max(1) as usize;
        out.push_str(&" ".repeat(underline_start));
        out.push_str(&"^".repeat(underline_len));

        if let Some(ref label) = self.label {
            out.push(' ');
            out.push_str(label);
        }
        out
    }
}

/// Fluent builder for a [`Diagnostic`].
///
/// ```
/// use tsig_util::diagnostic::{DiagnosticBuilder, DiagnosticCode};
/// use tsig_util::pos::Range;
///
/// let diag = DiagnosticBuilder::error("unexpected token")
///     .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
///     .range(Range::NULL)
///     .help("check the token immediately before this position")
///     .build();
/// assert_eq!(diag.message, "unexpected token");
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    range: Range,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
    helps: Vec<String>,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            range: Range::NULL,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            range: self.range,
            code: self.code,
            notes: self.notes,
            helps: self.helps,
            snippets: self.snippets,
        }
    }

    /// Build and immediately emit to a [`super::Handler`].
    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}
