//! Source buffers — the addressable input to the lexer and parser.
//!
//! A [`Buffer`] owns the raw source text, its declared [`Encoding`], and a
//! display name used in diagnostics. Line starts are precomputed once so
//! byte-offset-to-line/column lookups are `O(log n)`.

use std::sync::Arc;

use crate::error::{BufferError, BufferResult};

/// The declared encoding of a source buffer's bytes.
///
/// The lexer decodes codepoints according to this tag; non-UTF-8 buffers are
/// rejected at construction time rather than silently mis-decoded later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Encoding {
    /// Human-readable name, as it would appear in a diagnostic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Ascii => "US-ASCII",
        }
    }
}

/// An addressable source buffer.
///
/// # Examples
///
/// ```
/// use tsig_util::buffer::Buffer;
///
/// let buf = Buffer::new("sig.rbs", "class Foo\nend\n").unwrap();
/// assert_eq!(buf.name(), "sig.rbs");
/// assert_eq!(buf.line_count(), 3);
/// ```
#[derive(Clone)]
pub struct Buffer {
    name: String,
    content: Arc<str>,
    encoding: Encoding,
    line_starts: Arc<[usize]>,
}

impl Buffer {
    /// Build a buffer from already-decoded UTF-8 text.
    ///
    /// Strips a leading BOM if present, matching the source lexer's
    /// skip-BOM-before-first-token behavior.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> BufferResult<Self> {
        let mut content = content.into();
        if content.starts_with('\u{feff}') {
            content = content.trim_start_matches('\u{feff}').to_string();
        }
        let content: Arc<str> = content.into();
        let line_starts = Self::compute_line_starts(&content);
        Ok(Self {
            name: name.into(),
            content,
            encoding: Encoding::Utf8,
            line_starts,
        })
    }

    /// Build a buffer from raw bytes, validating the declared encoding.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        encoding: Encoding,
    ) -> BufferResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| BufferError::InvalidEncoding {
            encoding: encoding.as_str(),
            detail: e.to_string(),
        })?;
        let mut buffer = Self::new(name, text.to_string())?;
        buffer.encoding = encoding;
        Ok(buffer)
    }

    fn compute_line_starts(content: &str) -> Arc<[usize]> {
        let mut starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts.into()
    }

    /// The display name used in diagnostics (a file path, or `"<input>"`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full source text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The declared encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Total byte length of the content.
    #[inline]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of (1-indexed) lines in the buffer.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 0-indexed line starts.
    #[inline]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// The text of a single 1-indexed line, without its trailing newline.
    pub fn line_at(&self, line: u32) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = self.line_start(idx)?;
        let end = self.line_start(idx + 1).unwrap_or(self.content.len());
        Some(self.content[start..end].trim_end_matches(['\n', '\r']))
    }

    /// Extract a byte range of the content.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds or splits a UTF-8 codepoint.
    pub fn slice(&self, range: std::ops::Range<usize>) -> &str {
        &self.content[range]
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("encoding", &self.encoding)
            .field("line_count", &self.line_count())
            .finish()
    }
}
