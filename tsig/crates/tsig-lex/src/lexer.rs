//! Unicode-aware tokenizer.
//!
//! Grounded on the teacher's per-character `lex_XXX` dispatch shape
//! (`faxc-lex/src/lexer.rs`), but changed from recover-and-continue to
//! fail-fast: every sub-lexer below returns `LexResult<TokenKind>` and the
//! first error aborts tokenization (spec §4.7 — no recovery). Implements the
//! full sub-lexer table of §4.1 and the symbol sub-lexer of §4.1.1.

use tsig_util::pos::{Position, Range};
use tsig_util::symbol::Symbol;

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::token::{keyword_kind, Token, TokenKind};

/// Tokenizes one source buffer. Single-threaded, non-reentrant over its
/// cursor (spec §4.1 contract).
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// Set after skipping whitespace when no non-whitespace character has
    /// been seen yet on the current line; observed by the `#` sub-lexer to
    /// distinguish `tLINECOMMENT` from `tCOMMENT`.
    first_token_of_line: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            first_token_of_line: true,
        }
    }

    /// Returns the next token, advancing position. Repeated calls eventually
    /// return `Eof` forever.
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_trivial_whitespace();

        let start = self.cursor.position();
        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, Range::point(start)));
        }

        let was_first_of_line = self.first_token_of_line;
        self.first_token_of_line = false;

        let c = self.cursor.peek();
        let kind = match c {
            '(' => self.one_char(TokenKind::LParen),
            ')' => self.one_char(TokenKind::RParen),
            ']' => self.one_char(TokenKind::RBracket),
            '{' => self.one_char(TokenKind::LBrace),
            '}' => self.one_char(TokenKind::RBrace),
            ',' => self.one_char(TokenKind::Comma),
            '|' => self.one_char(TokenKind::Pipe),
            '^' => self.one_char(TokenKind::Caret),
            '&' => self.one_char(TokenKind::Amp),
            '?' => self.one_char(TokenKind::Question),
            '/' => self.one_char_operator("/"),
            '~' => self.one_char_operator("~"),

            '-' => self.lex_minus()?,
            '+' => self.lex_plus()?,
            '*' => self.lex_star(),
            '.' => self.lex_dot(),
            '=' => self.lex_equals(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '!' => self.lex_bang(),
            '#' => return self.lex_comment(start, was_first_of_line),
            '[' => self.lex_lbracket(),
            ':' => self.lex_colon(start)?,
            '_' => self.lex_underscore_ident(),
            '$' => self.lex_gident(start)?,
            '@' => self.lex_aident(start)?,
            '"' => self.lex_dq_string(start)?,
            '\'' => self.lex_sq_string(start)?,
            '%' => self.lex_percent(start)?,
            '`' => self.lex_backquote(start)?,

            c if c.is_ascii_digit() => self.lex_integer(),
            c if is_ident_start(c) => self.lex_letter_ident(),

            other => {
                self.cursor.advance();
                return Err(LexError::UnexpectedChar {
                    ch: other,
                    range: Range::new(start, self.cursor.position()),
                });
            }
        };

        Ok(Token::new(kind, Range::new(start, self.cursor.position())))
    }

    // ---- whitespace -----------------------------------------------------

    fn skip_trivial_whitespace(&mut self) {
        loop {
            match self.cursor.peek() {
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                }
                '\n' => {
                    self.cursor.advance();
                    self.first_token_of_line = true;
                }
                _ => break,
            }
        }
    }

    // ---- one-character tokens -------------------------------------------

    fn one_char(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn one_char_operator(&mut self, text: &str) -> TokenKind {
        self.cursor.advance();
        TokenKind::TOperator(Symbol::intern(text))
    }

    // ---- `-` sub-lexer: `->`, `-@`, `-digit…`, bare `-` ------------------

    fn lex_minus(&mut self) -> LexResult<TokenKind> {
        self.cursor.advance(); // '-'
        match self.cursor.peek() {
            '>' => {
                self.cursor.advance();
                Ok(TokenKind::Arrow)
            }
            '@' => {
                self.cursor.advance();
                Ok(TokenKind::TOperator(Symbol::intern("-@")))
            }
            c if c.is_ascii_digit() => {
                let digit_start = self.cursor.byte_offset();
                self.consume_digits();
                let text = format!("-{}", clean_digits(self.cursor.slice_from(digit_start)));
                Ok(TokenKind::TInteger(Symbol::intern(&text)))
            }
            _ => Ok(TokenKind::TOperator(Symbol::intern("-"))),
        }
    }

    // ---- `+` sub-lexer: `+@`, `+digit…`, bare `+` ------------------------

    fn lex_plus(&mut self) -> LexResult<TokenKind> {
        self.cursor.advance(); // '+'
        match self.cursor.peek() {
            '@' => {
                self.cursor.advance();
                Ok(TokenKind::TOperator(Symbol::intern("+@")))
            }
            c if c.is_ascii_digit() => {
                let digit_start = self.cursor.byte_offset();
                self.consume_digits();
                let text = clean_digits(self.cursor.slice_from(digit_start));
                Ok(TokenKind::TInteger(Symbol::intern(&text)))
            }
            _ => Ok(TokenKind::TOperator(Symbol::intern("+"))),
        }
    }

    // ---- `*` sub-lexer: `**`, `*` ----------------------------------------

    fn lex_star(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.peek() == '*' {
            self.cursor.advance();
            TokenKind::StarStar
        } else {
            TokenKind::Star
        }
    }

    // ---- `.` sub-lexer: `...`, `..` folds to `...`, `.` ------------------

    fn lex_dot(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.peek() == '.' {
            self.cursor.advance();
            if self.cursor.peek() == '.' {
                self.cursor.advance();
            }
            TokenKind::DotDotDot
        } else {
            TokenKind::Dot
        }
    }

    // ---- `=` sub-lexer: `==`, `===`, `=~` fold to operator; `=>`; `=` ----

    fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.peek() {
            '~' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern("=~"))
            }
            '=' => {
                self.cursor.advance();
                if self.cursor.peek() == '=' {
                    self.cursor.advance();
                    TokenKind::TOperator(Symbol::intern("==="))
                } else {
                    TokenKind::TOperator(Symbol::intern("=="))
                }
            }
            '>' => {
                self.cursor.advance();
                TokenKind::FatArrow
            }
            _ => TokenKind::Eq,
        }
    }

    // ---- `<` sub-lexer: `<<`, `<=`, `<=>` fold to operator; bare `<` -----

    fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.peek() {
            '<' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern("<<"))
            }
            '=' => {
                self.cursor.advance();
                if self.cursor.peek() == '>' {
                    self.cursor.advance();
                    TokenKind::TOperator(Symbol::intern("<=>"))
                } else {
                    TokenKind::TOperator(Symbol::intern("<="))
                }
            }
            _ => TokenKind::Lt,
        }
    }

    // ---- `>` sub-lexer: `>=`, `>>` fold to operator; bare `>` ------------
    //
    // Unlike `<`, §6's closed token-kind set has no standalone `Gt`
    // punctuation — no grammar production mirrors `< super` with `>`. Bare
    // `>` therefore folds to `tOPERATOR` too, matching its use as a
    // comparison operator method name.

    fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.peek() {
            '=' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern(">="))
            }
            '>' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern(">>"))
            }
            _ => TokenKind::TOperator(Symbol::intern(">")),
        }
    }

    // ---- `!` sub-lexer: `!=`, `!~` fold to operator; bare `!` -> operator

    fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.peek() {
            '=' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern("!="))
            }
            '~' => {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern("!~"))
            }
            _ => TokenKind::TOperator(Symbol::intern("!")),
        }
    }

    // ---- `#` sub-lexer: line comment -------------------------------------

    fn lex_comment(&mut self, start: Position, was_first_of_line: bool) -> LexResult<Token> {
        self.cursor.advance(); // '#'
        if self.cursor.peek() == ' ' {
            self.cursor.advance();
        }
        let body_start = self.cursor.byte_offset();
        while !self.cursor.is_at_end() && self.cursor.peek() != '\n' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(body_start).to_string();
        let range = Range::new(start, self.cursor.position());
        let kind = if was_first_of_line {
            TokenKind::TLineComment(Symbol::intern(&text))
        } else {
            TokenKind::TComment(Symbol::intern(&text))
        };
        Ok(Token::new(kind, range))
    }

    // ---- `[` sub-lexer: `[]`, `[]=` fold to operator; bare `[` -----------

    fn lex_lbracket(&mut self) -> TokenKind {
        self.cursor.advance(); // '['
        if self.cursor.peek() == ']' {
            self.cursor.advance();
            if self.cursor.peek() == '=' {
                self.cursor.advance();
                TokenKind::TOperator(Symbol::intern("[]="))
            } else {
                TokenKind::TOperator(Symbol::intern("[]"))
            }
        } else {
            TokenKind::LBracket
        }
    }

    // ---- `:` sub-lexer: `::`, symbol sub-lexer (§4.1.1), or bare `:` -----

    fn lex_colon(&mut self, start: Position) -> LexResult<TokenKind> {
        self.cursor.advance(); // ':'
        if self.cursor.peek() == ':' {
            self.cursor.advance();
            return Ok(TokenKind::ColonColon);
        }
        if let Some(kind) = self.try_lex_symbol_body(start)? {
            return Ok(kind);
        }
        Ok(TokenKind::Colon)
    }

    /// The symbol sub-lexer (§4.1.1). Returns `Ok(None)` to signal "fall
    /// back to bare `:`" — the caller has already consumed the `:` and
    /// nothing further should be consumed in that case.
    fn try_lex_symbol_body(&mut self, start: Position) -> LexResult<Option<TokenKind>> {
        let c = self.cursor.peek();
        let c2 = self.cursor.peek2();
        let c3 = self.cursor.peek3();

        macro_rules! op {
            ($n:expr, $text:expr) => {{
                for _ in 0..$n {
                    self.cursor.advance();
                }
                return Ok(Some(TokenKind::TSymbol(Symbol::intern($text))));
            }};
        }

        match c {
            '|' | '&' | '/' | '%' | '~' | '`' | '^' => op!(1, &c.to_string()),
            '=' => {
                if c2 == '~' {
                    op!(2, "=~")
                } else if c2 == '=' {
                    if c3 == '=' {
                        op!(3, "===")
                    } else {
                        op!(2, "==")
                    }
                }
                Ok(None)
            }
            '<' => {
                if c2 == '=' {
                    if c3 == '>' {
                        op!(3, "<=>")
                    } else {
                        op!(2, "<=")
                    }
                } else if c2 == '<' {
                    op!(2, "<<")
                } else {
                    op!(1, "<")
                }
            }
            '>' => {
                if c2 == '=' {
                    op!(2, ">=")
                } else if c2 == '>' {
                    op!(2, ">>")
                } else {
                    op!(1, ">")
                }
            }
            '+' => {
                if c2 == '@' {
                    op!(2, "+@")
                } else {
                    op!(1, "+")
                }
            }
            '-' => {
                if c2 == '@' {
                    op!(2, "-@")
                } else {
                    op!(1, "-")
                }
            }
            '*' => {
                if c2 == '*' {
                    op!(2, "**")
                } else {
                    op!(1, "*")
                }
            }
            '[' => {
                if c2 == ']' {
                    if c3 == '=' {
                        op!(3, "[]=")
                    } else {
                        op!(2, "[]")
                    }
                } else {
                    Ok(None)
                }
            }
            '!' => {
                if c2 == '=' {
                    op!(2, "!=")
                } else if c2 == '~' {
                    op!(2, "!~")
                } else {
                    Ok(None)
                }
            }
            '@' => {
                let consumed = if c2 == '@' { 2 } else { 1 };
                for _ in 0..consumed {
                    self.cursor.advance();
                }
                let ident_start = self.cursor.byte_offset();
                self.consume_ident_continue();
                if self.cursor.byte_offset() == ident_start {
                    return Err(LexError::DisallowedChar {
                        sigil: if consumed == 2 { "@@" } else { "@" },
                        range: Range::new(start, self.cursor.position()),
                    });
                }
                let sigil = if consumed == 2 { "@@" } else { "@" };
                let text = format!("{sigil}{}", self.cursor.slice_from(ident_start));
                Ok(Some(TokenKind::TSymbol(Symbol::intern(&text))))
            }
            '$' => {
                self.cursor.advance();
                let ident_start = self.cursor.byte_offset();
                self.consume_ident_continue();
                if self.cursor.byte_offset() == ident_start {
                    return Err(LexError::DisallowedChar {
                        sigil: "$",
                        range: Range::new(start, self.cursor.position()),
                    });
                }
                let text = format!("${}", self.cursor.slice_from(ident_start));
                Ok(Some(TokenKind::TSymbol(Symbol::intern(&text))))
            }
            '\'' => {
                let text = self.scan_quoted('\'', "symbol", start)?;
                Ok(Some(TokenKind::TSymbol(Symbol::intern(&text))))
            }
            '"' => {
                let text = self.scan_quoted('"', "symbol", start)?;
                // Open question resolution #3: unescaping applies only to
                // double-quoted symbol payloads.
                let unescaped = unescape(&text);
                Ok(Some(TokenKind::TSymbol(Symbol::intern(&unescaped))))
            }
            c if is_ident_start(c) => {
                let ident_start = self.cursor.byte_offset();
                self.consume_ident_continue();
                if self.cursor.peek() == '?' {
                    self.cursor.advance();
                }
                let text = self.cursor.slice_from(ident_start).to_string();
                Ok(Some(TokenKind::TSymbol(Symbol::intern(&text))))
            }
            _ => Ok(None),
        }
    }

    // ---- `_` sub-lexer: upper-prefixed -> tULIDENT, else tLIDENT ---------

    fn lex_underscore_ident(&mut self) -> TokenKind {
        let start = self.cursor.byte_offset();
        self.consume_ident_continue();
        let text = self.cursor.slice_from(start);
        let first_upper = text
            .trim_start_matches('_')
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);
        let sym = Symbol::intern(text);
        if first_upper {
            TokenKind::TULIdent(sym)
        } else {
            TokenKind::TLIdent(sym)
        }
    }

    // ---- `$` sub-lexer: tGIDENT -------------------------------------------

    fn lex_gident(&mut self, start: Position) -> LexResult<TokenKind> {
        self.cursor.advance(); // '$'
        let ident_start = self.cursor.byte_offset();
        self.consume_ident_continue();
        if self.cursor.byte_offset() == ident_start {
            return Err(LexError::DisallowedChar {
                sigil: "$",
                range: Range::new(start, self.cursor.position()),
            });
        }
        let text = self.cursor.slice_from(ident_start).to_string();
        Ok(TokenKind::TGIdent(Symbol::intern(&text)))
    }

    // ---- `@` sub-lexer: tAIDENT / tA2IDENT --------------------------------

    fn lex_aident(&mut self, start: Position) -> LexResult<TokenKind> {
        self.cursor.advance(); // '@'
        let doubled = self.cursor.peek() == '@';
        if doubled {
            self.cursor.advance();
        }
        let ident_start = self.cursor.byte_offset();
        self.consume_ident_continue();
        if self.cursor.byte_offset() == ident_start {
            return Err(LexError::DisallowedChar {
                sigil: if doubled { "@@" } else { "@" },
                range: Range::new(start, self.cursor.position()),
            });
        }
        let text = self.cursor.slice_from(ident_start).to_string();
        Ok(if doubled {
            TokenKind::TA2Ident(Symbol::intern(&text))
        } else {
            TokenKind::TAIdent(Symbol::intern(&text))
        })
    }

    // ---- `"`/`'` main-token string productions ---------------------------

    fn lex_dq_string(&mut self, start: Position) -> LexResult<TokenKind> {
        let raw_start = self.cursor.byte_offset();
        self.scan_quoted('"', "double-quoted string", start)?;
        let raw = self.cursor.slice_from(raw_start).to_string();
        Ok(TokenKind::TDqString(Symbol::intern(&raw)))
    }

    fn lex_sq_string(&mut self, start: Position) -> LexResult<TokenKind> {
        let raw_start = self.cursor.byte_offset();
        self.scan_quoted('\'', "single-quoted string", start)?;
        let raw = self.cursor.slice_from(raw_start).to_string();
        Ok(TokenKind::TSqString(Symbol::intern(&raw)))
    }

    /// Scans a quoted form from the opening quote through the matching
    /// unescaped closing quote, and returns the unquoted text (escape
    /// sequences kept verbatim, e.g. `\n` stays as backslash-n). `\<quote>`
    /// is recognized so the matching quote doesn't terminate the form early;
    /// no other escape is interpreted here — the full §6 unescape table is
    /// applied downstream, when a literal's payload is extracted.
    fn scan_quoted(
        &mut self,
        quote: char,
        what: &'static str,
        start: Position,
    ) -> LexResult<String> {
        self.cursor.advance(); // opening quote
        let mut text = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedQuoted {
                    kind: what,
                    range: Range::new(start, self.cursor.position()),
                });
            }
            let c = self.cursor.peek();
            if c == quote {
                self.cursor.advance();
                break;
            }
            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(LexError::UnterminatedQuoted {
                        kind: what,
                        range: Range::new(start, self.cursor.position()),
                    });
                }
                let escaped = self.cursor.peek();
                text.push('\\');
                text.push(escaped);
                self.cursor.advance();
                continue;
            }
            text.push(c);
            self.cursor.advance();
        }
        Ok(text)
    }

    // ---- `%` sub-lexer: `%a{…}` annotation or bare `%` --------------------

    fn lex_percent(&mut self, start: Position) -> LexResult<TokenKind> {
        self.cursor.advance(); // '%'
        if self.cursor.peek() != 'a' {
            return Ok(TokenKind::TOperator(Symbol::intern("%")));
        }
        let closing = match self.cursor.peek2() {
            '{' => '}',
            '(' => ')',
            '[' => ']',
            '|' => '|',
            '<' => '>',
            _ => return Ok(TokenKind::TOperator(Symbol::intern("%"))),
        };
        self.cursor.advance(); // 'a'
        self.cursor.advance(); // opening delimiter
        let body_start = self.cursor.byte_offset();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedQuoted {
                    kind: "annotation",
                    range: Range::new(start, self.cursor.position()),
                });
            }
            if self.cursor.peek() == closing {
                break;
            }
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(body_start).to_string();
        self.cursor.advance(); // closing delimiter
        Ok(TokenKind::TAnnotation(Symbol::intern(&text)))
    }

    // ---- back-quote sub-lexer: operator or back-quoted identifier --------

    fn lex_backquote(&mut self, start: Position) -> LexResult<TokenKind> {
        self.cursor.advance(); // '`'
        let c = self.cursor.peek();
        if c == ' ' || c == ':' {
            return Ok(TokenKind::TOperator(Symbol::intern("`")));
        }
        let body_start = self.cursor.byte_offset();
        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedQuoted {
                    kind: "back-quoted identifier",
                    range: Range::new(start, self.cursor.position()),
                });
            }
            if self.cursor.peek() == '`' {
                break;
            }
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(body_start).to_string();
        self.cursor.advance(); // closing '`'
        Ok(TokenKind::TQIdent(Symbol::intern(&text)))
    }

    // ---- letter sub-lexer: tUIDENT / tLIDENT (+ keyword), tBANGIDENT, tEQIDENT

    fn lex_letter_ident(&mut self) -> TokenKind {
        let start = self.cursor.byte_offset();
        let first = self.cursor.peek();
        self.consume_ident_continue();

        let suffix = match self.cursor.peek() {
            '!' => {
                self.cursor.advance();
                Some('!')
            }
            '=' => {
                self.cursor.advance();
                Some('=')
            }
            _ => None,
        };

        let text = self.cursor.slice_from(start).to_string();
        let sym = Symbol::intern(&text);

        match suffix {
            Some('!') => TokenKind::TBangIdent(sym),
            Some('=') => TokenKind::TEqIdent(sym),
            _ => {
                if first.is_uppercase() {
                    TokenKind::TUIdent(sym)
                } else if let Some(kw) = keyword_kind(&text) {
                    kw
                } else {
                    TokenKind::TLIdent(sym)
                }
            }
        }
    }

    // ---- digit sub-lexer: integer, `_` digit-group separator -------------

    fn lex_integer(&mut self) -> TokenKind {
        let start = self.cursor.byte_offset();
        self.consume_digits();
        let text = clean_digits(self.cursor.slice_from(start));
        TokenKind::TInteger(Symbol::intern(&text))
    }

    // ---- shared character-run helpers ------------------------------------

    fn consume_ident_continue(&mut self) {
        while is_ident_continue(self.cursor.peek()) {
            self.cursor.advance();
        }
    }

    fn consume_digits(&mut self) {
        loop {
            let c = self.cursor.peek();
            if c.is_ascii_digit() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn clean_digits(text: &str) -> String {
    text.chars().filter(|c| *c != '_').collect()
}

/// The §6 string unescape table, applied to double-quoted payloads.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('e') => out.push('\u{1b}'),
            Some('f') => out.push('\u{0c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0b}'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().expect("lex error");
            if tok.is_eof() {
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn one_char_tokens() {
        assert_eq!(
            kinds("(){}],|^&?"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Pipe,
                TokenKind::Caret,
                TokenKind::Amp,
                TokenKind::Question,
            ]
        );
    }

    #[test]
    fn arrow_and_fat_arrow() {
        assert_eq!(kinds("->"), vec![TokenKind::Arrow]);
        assert_eq!(kinds("=>"), vec![TokenKind::FatArrow]);
    }

    #[test]
    fn dotdot_folds_to_dotdotdot() {
        assert_eq!(kinds(".."), vec![TokenKind::DotDotDot]);
        assert_eq!(kinds("..."), vec![TokenKind::DotDotDot]);
        assert_eq!(kinds("."), vec![TokenKind::Dot]);
    }

    #[test]
    fn keyword_lookup_rewrites_lident() {
        assert_eq!(kinds("class"), vec![TokenKind::KwClass]);
        assert_eq!(kinds("classy"), vec![TokenKind::TLIdent(Symbol::intern("classy"))]);
    }

    #[test]
    fn uident_and_ulident_classification() {
        assert_eq!(kinds("Array"), vec![TokenKind::TUIdent(Symbol::intern("Array"))]);
        assert_eq!(kinds("_Each"), vec![TokenKind::TULIdent(Symbol::intern("_Each"))]);
        assert_eq!(kinds("_foo"), vec![TokenKind::TLIdent(Symbol::intern("_foo"))]);
    }

    #[test]
    fn bang_and_eq_ident_suffixes() {
        assert_eq!(
            kinds("foo!"),
            vec![TokenKind::TBangIdent(Symbol::intern("foo!"))]
        );
        assert_eq!(
            kinds("foo="),
            vec![TokenKind::TEqIdent(Symbol::intern("foo="))]
        );
    }

    #[test]
    fn negative_and_positive_integer_literals() {
        assert_eq!(kinds("-42"), vec![TokenKind::TInteger(Symbol::intern("-42"))]);
        assert_eq!(kinds("+42"), vec![TokenKind::TInteger(Symbol::intern("42"))]);
        assert_eq!(kinds("1_000"), vec![TokenKind::TInteger(Symbol::intern("1000"))]);
    }

    #[test]
    fn unary_and_double_star_operators() {
        assert_eq!(kinds("-@"), vec![TokenKind::TOperator(Symbol::intern("-@"))]);
        assert_eq!(kinds("+@"), vec![TokenKind::TOperator(Symbol::intern("+@"))]);
        assert_eq!(kinds("**"), vec![TokenKind::StarStar]);
        assert_eq!(kinds("*"), vec![TokenKind::Star]);
    }

    #[test]
    fn comparison_family_folds_to_operator() {
        assert_eq!(kinds("=="), vec![TokenKind::TOperator(Symbol::intern("=="))]);
        assert_eq!(kinds("==="), vec![TokenKind::TOperator(Symbol::intern("==="))]);
        assert_eq!(kinds("<=>"), vec![TokenKind::TOperator(Symbol::intern("<=>"))]);
        assert_eq!(kinds("<="), vec![TokenKind::TOperator(Symbol::intern("<="))]);
        assert_eq!(kinds("<<"), vec![TokenKind::TOperator(Symbol::intern("<<"))]);
        assert_eq!(kinds("<"), vec![TokenKind::Lt]);
        assert_eq!(kinds(">="), vec![TokenKind::TOperator(Symbol::intern(">="))]);
        assert_eq!(kinds(">>"), vec![TokenKind::TOperator(Symbol::intern(">>"))]);
        assert_eq!(kinds(">"), vec![TokenKind::TOperator(Symbol::intern(">"))]);
        assert_eq!(kinds("!="), vec![TokenKind::TOperator(Symbol::intern("!="))]);
        assert_eq!(kinds("!~"), vec![TokenKind::TOperator(Symbol::intern("!~"))]);
        assert_eq!(kinds("!"), vec![TokenKind::TOperator(Symbol::intern("!"))]);
    }

    #[test]
    fn bracket_operator_folding() {
        assert_eq!(kinds("[]"), vec![TokenKind::TOperator(Symbol::intern("[]"))]);
        assert_eq!(kinds("[]="), vec![TokenKind::TOperator(Symbol::intern("[]="))]);
        assert_eq!(kinds("["), vec![TokenKind::LBracket]);
    }

    #[test]
    fn colon_colon_and_bare_colon() {
        assert_eq!(kinds("::"), vec![TokenKind::ColonColon]);
        assert_eq!(kinds(": "), vec![TokenKind::Colon]);
    }

    #[test]
    fn symbol_sub_lexer_identifier_and_predicate() {
        assert_eq!(kinds(":foo"), vec![TokenKind::TSymbol(Symbol::intern("foo"))]);
        assert_eq!(kinds(":foo?"), vec![TokenKind::TSymbol(Symbol::intern("foo?"))]);
    }

    #[test]
    fn symbol_sub_lexer_operator_families() {
        assert_eq!(kinds(":+"), vec![TokenKind::TSymbol(Symbol::intern("+"))]);
        assert_eq!(kinds(":<=>"), vec![TokenKind::TSymbol(Symbol::intern("<=>"))]);
        assert_eq!(kinds(":[]"), vec![TokenKind::TSymbol(Symbol::intern("[]"))]);
        assert_eq!(kinds(":[]="), vec![TokenKind::TSymbol(Symbol::intern("[]="))]);
    }

    #[test]
    fn symbol_sub_lexer_quoted_forms_differ_in_unescaping() {
        assert_eq!(
            kinds(r#":'a\nb'"#),
            vec![TokenKind::TSymbol(Symbol::intern(r"a\nb"))]
        );
        assert_eq!(
            kinds(r#":"a\nb""#),
            vec![TokenKind::TSymbol(Symbol::intern("a\nb"))]
        );
    }

    #[test]
    fn symbol_sub_lexer_falls_back_to_bare_colon_on_no_match() {
        assert_eq!(
            kinds(":1"),
            vec![TokenKind::Colon, TokenKind::TInteger(Symbol::intern("1"))]
        );
    }

    #[test]
    fn gident_aident_a2ident() {
        assert_eq!(kinds("$foo"), vec![TokenKind::TGIdent(Symbol::intern("foo"))]);
        assert_eq!(kinds("@foo"), vec![TokenKind::TAIdent(Symbol::intern("foo"))]);
        assert_eq!(kinds("@@foo"), vec![TokenKind::TA2Ident(Symbol::intern("foo"))]);
    }

    #[test]
    fn aident_without_name_is_an_error() {
        let mut lexer = Lexer::new("@ ");
        assert!(matches!(lexer.next_token(), Err(LexError::DisallowedChar { .. })));
    }

    #[test]
    fn double_and_single_quoted_strings_keep_quotes() {
        assert_eq!(
            kinds(r#""hi""#),
            vec![TokenKind::TDqString(Symbol::intern(r#""hi""#))]
        );
        assert_eq!(
            kinds("'hi'"),
            vec![TokenKind::TSqString(Symbol::intern("'hi'"))]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut lexer = Lexer::new("\"unterminated");
        assert!(matches!(lexer.next_token(), Err(LexError::UnterminatedQuoted { .. })));
    }

    #[test]
    fn annotation_block() {
        assert_eq!(
            kinds("%a{hello}"),
            vec![TokenKind::TAnnotation(Symbol::intern("hello"))]
        );
        assert_eq!(
            kinds("%a<angle>"),
            vec![TokenKind::TAnnotation(Symbol::intern("angle"))]
        );
    }

    #[test]
    fn bare_percent_is_operator() {
        assert_eq!(kinds("%"), vec![TokenKind::TOperator(Symbol::intern("%"))]);
    }

    #[test]
    fn backquote_identifier_and_operator() {
        assert_eq!(kinds("`foo`"), vec![TokenKind::TQIdent(Symbol::intern("foo"))]);
        assert_eq!(kinds("` "), vec![TokenKind::TOperator(Symbol::intern("`"))]);
    }

    #[test]
    fn line_comment_vs_mid_line_comment() {
        assert_eq!(
            kinds("# hello"),
            vec![TokenKind::TLineComment(Symbol::intern("hello"))]
        );
        assert_eq!(
            kinds("class # trailing"),
            vec![TokenKind::KwClass, TokenKind::TComment(Symbol::intern("trailing"))]
        );
    }

    #[test]
    fn eof_is_returned_repeatedly() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn unescape_table_covers_documented_escapes() {
        assert_eq!(unescape(r"\n\t\r"), "\n\t\r");
        assert_eq!(unescape(r#"\""#), "\"");
        assert_eq!(unescape(r"\s"), " ");
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let mut lexer = Lexer::new(";");
        assert!(matches!(lexer.next_token(), Err(LexError::UnexpectedChar { .. })));
    }

    #[test]
    fn position_tracks_line_and_column_across_lines() {
        let mut lexer = Lexer::new("a\nb");
        let t1 = lexer.next_token().unwrap();
        assert_eq!(t1.range.start.line, 1);
        let t2 = lexer.next_token().unwrap();
        assert_eq!(t2.range.start.line, 2);
    }
}
