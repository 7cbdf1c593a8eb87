//! Character cursor for traversing source code.
//!
//! Extends the teacher crate's `Cursor` (byte position + line/column, ASCII
//! fast path with a UTF-8 fallback) with character-offset tracking: spec §3
//! positions are a byte/char/line/column quadruple, so every position the
//! lexer hands out needs both offsets, not just bytes.

use tsig_util::pos::Position;

/// A cursor for traversing source text one codepoint at a time.
pub struct Cursor<'a> {
    source: &'a str,
    byte_offset: usize,
    char_offset: u32,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte_offset: 0,
            char_offset: 0,
            line: 1,
            column: 0,
        }
    }

    /// The current position as a spec §3 quadruple.
    pub fn position(&self) -> Position {
        Position::new(self.byte_offset, self.char_offset, self.line, self.column)
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn is_at_end(&self) -> bool {
        self.byte_offset >= self.source.len()
    }

    /// The current character, or `'\0'` at end of input.
    #[inline]
    pub fn peek(&self) -> char {
        self.char_at(0)
    }

    /// The character one past the current one, or `'\0'` at end of input.
    #[inline]
    pub fn peek2(&self) -> char {
        self.char_at(1)
    }

    /// The character two past the current one, or `'\0'` at end of input.
    #[inline]
    pub fn peek3(&self) -> char {
        self.char_at(2)
    }

    fn char_at(&self, chars_ahead: usize) -> char {
        let mut iter = self.source[self.byte_offset..].chars();
        for _ in 0..chars_ahead {
            iter.next();
        }
        iter.next().unwrap_or('\0')
    }

    /// Consumes and returns the current character, advancing byte, char,
    /// line, and column counters. On a newline, resets the column to zero
    /// (spec §4.1's "skip" mechanics).
    pub fn advance(&mut self) -> Option<char> {
        if self.is_at_end() {
            return None;
        }
        let c = self.source[self.byte_offset..].chars().next()?;
        self.byte_offset += c.len_utf8();
        self.char_offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Returns the source slice from `start` (a byte offset) to the
    /// cursor's current byte offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.byte_offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_byte_and_char_offsets_over_multibyte_input() {
        let mut cursor = Cursor::new("αb");
        assert_eq!(cursor.peek(), 'α');
        let pos0 = cursor.position();
        assert_eq!(pos0.byte_offset(), 0);
        assert_eq!(pos0.char_offset, 0);

        cursor.advance();
        let pos1 = cursor.position();
        assert_eq!(pos1.byte_offset(), 2); // 'α' is 2 bytes in UTF-8
        assert_eq!(pos1.char_offset, 1);
        assert_eq!(cursor.peek(), 'b');
    }

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance(); // 'a'
        assert_eq!(cursor.position().column, 1);
        cursor.advance(); // '\n'
        let pos = cursor.position();
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn peek_family_looks_ahead_without_consuming() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.peek(), 'a');
        assert_eq!(cursor.peek2(), 'b');
        assert_eq!(cursor.peek3(), 'c');
        assert_eq!(cursor.byte_offset(), 0);
    }

    #[test]
    fn peek_past_end_is_nul() {
        let cursor = Cursor::new("a");
        assert_eq!(cursor.peek2(), '\0');
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.byte_offset();
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.slice_from(start), "hello");
    }
}
