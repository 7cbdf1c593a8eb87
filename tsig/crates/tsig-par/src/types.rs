//! Type grammar (spec §4.4): union, intersection, optional, and the simple
//! type productions, plus type-name resolution (§4.4.1) and record
//! attributes (§4.4.2).
//!
//! Grounded on `original_source/ext/rbs/parser/parser.c`'s `parse_type` /
//! `parse_intersection` / `parse_optional` / `parse_simple` /
//! `parse_type_name` / `parse_record_attributes`, reworked onto this
//! crate's pull-based `ParserState` the way the teacher's `faxc-par/src/
//! types.rs` reworks a generic type grammar onto its own `Parser`: one
//! method per precedence level, each leaving `current` on the last token
//! of what it parsed.

use indexmap::IndexMap;
use tsig_lex::{unescape, TokenKind};
use tsig_util::symbol::Symbol;

use crate::ast::*;
use crate::error::ParseResult;
use crate::Parser;

/// Which of the three name kinds a type-name position accepts. Lexically
/// the terminal token already picks a kind (`tLIDENT` ⇒ alias, `tULIDENT`
/// ⇒ interface, `tUIDENT` ⇒ class) — the mask narrows which of those are
/// *valid here*, e.g. a class's `< super` clause accepts only a class name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameKindMask {
    pub class: bool,
    pub interface: bool,
    pub alias: bool,
}

impl NameKindMask {
    pub const ALL: Self = Self { class: true, interface: true, alias: true };
    pub const CLASS_ONLY: Self = Self { class: true, interface: false, alias: false };
    pub const CLASS_OR_INTERFACE: Self = Self { class: true, interface: true, alias: false };
    pub const INTERFACE_ONLY: Self = Self { class: false, interface: true, alias: false };
    pub const ALIAS_ONLY: Self = Self { class: false, interface: false, alias: true };

    /// Human description of what this mask accepts, for a syntax error's
    /// "expected" slot.
    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.class {
            parts.push("class/module name");
        }
        if self.interface {
            parts.push("interface name");
        }
        if self.alias {
            parts.push("alias name");
        }
        parts.join(" or ")
    }
}

/// A token kind's identifier text, if it carries one: either a payload
/// `Symbol` directly, or (for keyword tokens, which may stand in for a
/// method/attribute/record-key name) the keyword's own spelling, interned.
pub(crate) fn ident_symbol(kind: &TokenKind) -> Option<Symbol> {
    use TokenKind::*;
    match kind {
        TLIdent(s) | TUIdent(s) | TULIdent(s) | TGIdent(s) | TAIdent(s) | TA2Ident(s) | TBangIdent(s)
        | TEqIdent(s) | TQIdent(s) | TOperator(s) => Some(*s),
        _ => keyword_text(kind).map(Symbol::intern),
    }
}

/// The source spelling of a keyword token, for contexts where a keyword
/// may double as an identifier (method names, record keys).
pub(crate) fn keyword_text(kind: &TokenKind) -> Option<&'static str> {
    use TokenKind::*;
    Some(match kind {
        KwBool => "bool",
        KwBot => "bot",
        KwClass => "class",
        KwInstance => "instance",
        KwInterface => "interface",
        KwNil => "nil",
        KwSelf => "self",
        KwSingleton => "singleton",
        KwTop => "top",
        KwVoid => "void",
        KwType => "type",
        KwUnchecked => "unchecked",
        KwIn => "in",
        KwOut => "out",
        KwEnd => "end",
        KwDef => "def",
        KwInclude => "include",
        KwExtend => "extend",
        KwPrepend => "prepend",
        KwAlias => "alias",
        KwModule => "module",
        KwAttrReader => "attr_reader",
        KwAttrWriter => "attr_writer",
        KwAttrAccessor => "attr_accessor",
        KwPublic => "public",
        KwPrivate => "private",
        KwTrue => "true",
        KwFalse => "false",
        KwUntyped => "untyped",
        _ => return None,
    })
}

/// Extracts a double-quoted string literal's value: strips the surrounding
/// quotes and applies the §6 unescape table.
fn dq_string_value(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    unescape(inner)
}

/// Extracts a single-quoted string literal's value: strips the surrounding
/// quotes and resolves only `\\` and `\'`, the two escapes a single-quoted
/// form recognizes (spec §6: the unescape table applies to double-quoted
/// forms only).
fn sq_string_value(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\'') | Some('\\') => {
                    out.push(chars.next().unwrap());
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

impl<'a> Parser<'a> {
    /// `union ::= intersection ('|' intersection)*`. Assumes `current` is
    /// the token immediately before the type; never advances past the
    /// type's own last token.
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let first = self.parse_intersection()?;
        if !matches!(self.state.next.kind, TokenKind::Pipe) {
            return Ok(first);
        }
        let mut types = vec![first];
        while matches!(self.state.next.kind, TokenKind::Pipe) {
            self.state.advance()?; // current = '|'
            types.push(self.parse_intersection()?);
        }
        let range = types[0].location().range().merge(types.last().unwrap().location().range());
        Ok(Type::Union { types, location: self.state.location(range) })
    }

    /// `intersection ::= optional ('&' optional)*`.
    fn parse_intersection(&mut self) -> ParseResult<Type> {
        let first = self.parse_optional()?;
        if !matches!(self.state.next.kind, TokenKind::Amp) {
            return Ok(first);
        }
        let mut types = vec![first];
        while matches!(self.state.next.kind, TokenKind::Amp) {
            self.state.advance()?; // current = '&'
            types.push(self.parse_optional()?);
        }
        let range = types[0].location().range().merge(types.last().unwrap().location().range());
        Ok(Type::Intersection { types, location: self.state.location(range) })
    }

    /// `optional ::= simple '?'?` — a postfix nullability marker.
    fn parse_optional(&mut self) -> ParseResult<Type> {
        let inner = self.parse_simple_type()?;
        if !matches!(self.state.next.kind, TokenKind::Question) {
            return Ok(inner);
        }
        self.state.advance()?; // current = '?'
        let range = inner.location().range().merge(self.state.current.range);
        Ok(Type::Optional { inner: Box::new(inner), location: self.state.location(range) })
    }

    /// The simple type productions (spec §4.4): parenthesized types, base
    /// keywords, literals, type-variable/name references, `singleton(...)`,
    /// tuples, records, and `^`-prefixed procs. Advances once on entry, so
    /// `current` becomes the type's leading token.
    fn parse_simple_type(&mut self) -> ParseResult<Type> {
        self.state.advance()?;
        let start = self.state.current.range;

        match self.state.current.kind {
            TokenKind::LParen => {
                let inner = self.parse_type()?;
                self.state.advance_assert(|k| matches!(k, TokenKind::RParen), "`)`")?;
                Ok(inner)
            }
            TokenKind::KwBool => Ok(Type::Base(BaseKind::Bool, self.state.location(start))),
            TokenKind::KwBot => Ok(Type::Base(BaseKind::Bottom, self.state.location(start))),
            TokenKind::KwClass => Ok(Type::Base(BaseKind::Class, self.state.location(start))),
            TokenKind::KwInstance => Ok(Type::Base(BaseKind::Instance, self.state.location(start))),
            TokenKind::KwNil => Ok(Type::Base(BaseKind::Nil, self.state.location(start))),
            TokenKind::KwSelf => Ok(Type::Base(BaseKind::SelfType, self.state.location(start))),
            TokenKind::KwTop => Ok(Type::Base(BaseKind::Top, self.state.location(start))),
            TokenKind::KwVoid => Ok(Type::Base(BaseKind::Void, self.state.location(start))),
            TokenKind::KwUntyped => Ok(Type::Base(BaseKind::Any, self.state.location(start))),

            TokenKind::KwTrue => Ok(Type::Literal { value: Literal::Bool(true), location: self.state.location(start) }),
            TokenKind::KwFalse => Ok(Type::Literal { value: Literal::Bool(false), location: self.state.location(start) }),
            TokenKind::TInteger(sym) => {
                Ok(Type::Literal { value: Literal::Integer(sym), location: self.state.location(start) })
            }
            TokenKind::TSymbol(sym) => {
                Ok(Type::Literal { value: Literal::Symbol(sym), location: self.state.location(start) })
            }
            TokenKind::TDqString(raw) => {
                let value = Symbol::intern(&dq_string_value(raw.as_str()));
                Ok(Type::Literal { value: Literal::String(value), location: self.state.location(start) })
            }
            TokenKind::TSqString(raw) => {
                let value = Symbol::intern(&sq_string_value(raw.as_str()));
                Ok(Type::Literal { value: Literal::String(value), location: self.state.location(start) })
            }

            TokenKind::KwSingleton => {
                self.state.advance_assert(|k| matches!(k, TokenKind::LParen), "`(`")?;
                self.state.advance()?; // current = leading token of the class name
                let name = self.parse_type_name(NameKindMask::CLASS_ONLY)?;
                self.state.advance_assert(|k| matches!(k, TokenKind::RParen), "`)`")?;
                let range = start.merge(self.state.current.range);
                Ok(Type::ClassSingleton { name, location: self.state.location(range) })
            }

            TokenKind::LBracket => {
                if matches!(self.state.next.kind, TokenKind::RBracket) {
                    self.state.advance()?; // current = ']'
                    let range = start.merge(self.state.current.range);
                    return Ok(Type::Tuple { types: Vec::new(), location: self.state.location(range) });
                }
                let types = self.parse_type_list(|k| matches!(k, TokenKind::RBracket))?;
                self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
                let range = start.merge(self.state.current.range);
                Ok(Type::Tuple { types, location: self.state.location(range) })
            }

            TokenKind::LBrace => {
                if matches!(self.state.next.kind, TokenKind::RBrace) {
                    self.state.advance()?; // current = '}'
                    let range = start.merge(self.state.current.range);
                    return Ok(Type::Record { fields: IndexMap::new(), location: self.state.location(range) });
                }
                let fields = self.parse_record_attributes()?;
                self.state.advance_assert(|k| matches!(k, TokenKind::RBrace), "`}`")?;
                let range = start.merge(self.state.current.range);
                Ok(Type::Record { fields, location: self.state.location(range) })
            }

            TokenKind::Caret => {
                let (function, block) = self.parse_function()?;
                let end = function.return_type.location().range();
                let range = start.merge(end);
                Ok(Type::Proc { function: Box::new(function), block: block.map(Box::new), location: self.state.location(range) })
            }

            TokenKind::TUIdent(sym) if self.state.scopes.member(sym) => {
                Ok(Type::Variable { name: sym, location: self.state.location(start) })
            }

            TokenKind::TUIdent(_) | TokenKind::TULIdent(_) | TokenKind::TLIdent(_) | TokenKind::ColonColon => {
                let name = self.parse_type_name(NameKindMask::ALL)?;
                let args = if matches!(self.state.next.kind, TokenKind::LBracket) {
                    self.state.advance()?; // current = '['
                    let args = self.parse_type_list(|k| matches!(k, TokenKind::RBracket))?;
                    self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
                    args
                } else {
                    Vec::new()
                };
                let range = start.merge(self.state.current.range);
                let location = self.state.location(range);
                match name.kind {
                    NameKind::Class => Ok(Type::ClassInstance { name, args, location }),
                    NameKind::Interface => Ok(Type::Interface { name, args, location }),
                    // Args are parsed above regardless of kind (so the
                    // token stream is consumed the same way for all three)
                    // but discarded for an alias reference — see the note
                    // on `Type::Alias`.
                    NameKind::Alias => Ok(Type::Alias { name, location }),
                }
            }

            _ => Err(self.state.unexpected("type", self.state.current)),
        }
    }

    /// A comma-separated list of types, stopping once `is_close` matches
    /// the peeked `next` token. A trailing comma is tolerated. Assumes
    /// `current` is the token immediately before the first type (the
    /// opening `[`/`,`).
    pub(crate) fn parse_type_list(&mut self, is_close: impl Fn(&TokenKind) -> bool) -> ParseResult<Vec<Type>> {
        let mut types = vec![self.parse_type()?];
        while matches!(self.state.next.kind, TokenKind::Comma) {
            self.state.advance()?; // current = ','
            if is_close(&self.state.next.kind) {
                break;
            }
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// Type-name resolution (spec §4.4.1): an optional leading `::`, zero
    /// or more `UIDENT ::` namespace segments, and a terminal identifier
    /// whose own case class picks a [`NameKind`] — narrowed by `mask`.
    /// Assumes `current` is already the name's own leading token (a
    /// `pCOLON2`, `tUIDENT`, `tULIDENT`, or `tLIDENT`).
    pub(crate) fn parse_type_name(&mut self, mask: NameKindMask) -> ParseResult<TypeName> {
        let mut absolute = false;
        if matches!(self.state.current.kind, TokenKind::ColonColon) {
            absolute = true;
            self.state.advance()?;
        }

        let mut path = Vec::new();
        while let TokenKind::TUIdent(sym) = self.state.current.kind {
            if !matches!(self.state.next.kind, TokenKind::ColonColon) {
                break;
            }
            path.push(sym);
            self.state.advance()?; // current = '::'
            self.state.advance()?; // current = next segment
        }

        let (name, kind) = match self.state.current.kind {
            TokenKind::TLIdent(sym) if mask.alias => (sym, NameKind::Alias),
            TokenKind::TULIdent(sym) if mask.interface => (sym, NameKind::Interface),
            TokenKind::TUIdent(sym) if mask.class => (sym, NameKind::Class),
            _ => return Err(self.state.unexpected(&mask.describe(), self.state.current)),
        };

        Ok(TypeName::new(Namespace { path, absolute }, name, kind))
    }

    /// Record attributes (spec §4.4.2): a comma-separated run of either
    /// *keyword shape* (`name: Type`, the key an identifier-or-keyword
    /// token followed directly by `:`) or *hash shape* (a literal key
    /// followed by `=>` and a Type). A key that matches neither shape is a
    /// syntax error (open-question resolution: the record-attribute
    /// fallthrough must raise explicitly, never silently accept). Assumes
    /// `current` is the opening `{`.
    fn parse_record_attributes(&mut self) -> ParseResult<IndexMap<Literal, Type>> {
        let mut fields = IndexMap::new();
        loop {
            let key = if ident_symbol(&self.state.next.kind).is_some() && matches!(self.state.next2.kind, TokenKind::Colon) {
                self.state.advance()?; // current = key token
                let sym = ident_symbol(&self.state.current.kind).expect("checked above");
                self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
                Literal::Symbol(sym)
            } else {
                match self.state.next.kind {
                    TokenKind::TSymbol(_)
                    | TokenKind::TSqString(_)
                    | TokenKind::TDqString(_)
                    | TokenKind::TInteger(_)
                    | TokenKind::KwTrue
                    | TokenKind::KwFalse => {
                        let key_type = self.parse_type()?;
                        self.state.advance_assert(|k| matches!(k, TokenKind::FatArrow), "`=>`")?;
                        match key_type {
                            Type::Literal { value, .. } => value,
                            _ => unreachable!("the match arms above only ever produce a literal type"),
                        }
                    }
                    _ => return Err(self.state.unexpected("record attribute key", self.state.next)),
                }
            };

            let ty = self.parse_type()?;
            fields.insert(key, ty);

            if matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?; // current = ','
                if matches!(self.state.next.kind, TokenKind::RBrace) {
                    break;
                }
            } else {
                break;
            }
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsig_util::buffer::Buffer;

    fn parse(src: &'static str) -> (Buffer, Type) {
        let buffer = Buffer::new("t.tsig", src).expect("buffer");
        let mut parser = Parser::new_for_test(&buffer).expect("parser");
        let ty = parser.parse_type().expect("type");
        (buffer, ty)
    }

    #[test]
    fn base_keyword_untyped_is_any() {
        let (_b, ty) = parse("untyped");
        assert!(matches!(ty, Type::Base(BaseKind::Any, _)));
    }

    #[test]
    fn union_collapses_single_element() {
        let (_b, ty) = parse("Integer");
        assert!(matches!(ty, Type::ClassInstance { .. }));
    }

    #[test]
    fn union_and_intersection_nest_by_precedence() {
        let (_b, ty) = parse("Integer | String & Symbol");
        match ty {
            Type::Union { types, .. } => {
                assert_eq!(types.len(), 2);
                assert!(matches!(types[0], Type::ClassInstance { .. }));
                assert!(matches!(types[1], Type::Intersection { .. }));
            }
            other => panic!("expected a union, got {other:?}"),
        }
    }

    #[test]
    fn optional_wraps_the_simple_type_only() {
        let (_b, ty) = parse("Integer?");
        assert!(matches!(ty, Type::Optional { .. }));
    }

    #[test]
    fn alias_reference_discards_bracketed_args() {
        let (_b, ty) = parse("list[Integer]");
        match ty {
            Type::Alias { name, .. } => assert_eq!(name.name.as_str(), "list"),
            other => panic!("expected an alias reference, got {other:?}"),
        }
    }

    #[test]
    fn tuple_type_collects_elements() {
        let (_b, ty) = parse("[Integer, String]");
        match ty {
            Type::Tuple { types, .. } => assert_eq!(types.len(), 2),
            other => panic!("expected a tuple, got {other:?}"),
        }
    }

    #[test]
    fn empty_tuple_is_allowed() {
        let (_b, ty) = parse("[]");
        assert!(matches!(ty, Type::Tuple { ref types, .. } if types.is_empty()));
    }

    #[test]
    fn record_keyword_shape() {
        let (_b, ty) = parse("{ name: String, age: Integer }");
        match ty {
            Type::Record { fields, .. } => assert_eq!(fields.len(), 2),
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn record_hash_shape_with_string_key() {
        let (_b, ty) = parse(r#"{ "age" => Integer }"#);
        match ty {
            Type::Record { fields, .. } => {
                let (key, _) = fields.get_index(0).unwrap();
                assert_eq!(*key, Literal::String(Symbol::intern("age")));
            }
            other => panic!("expected a record, got {other:?}"),
        }
    }

    #[test]
    fn record_rejects_an_unrecognized_key() {
        let buffer = Buffer::new("t.tsig", "{ 1 + 1 => Integer }").expect("buffer");
        let mut parser = Parser::new_for_test(&buffer).expect("parser");
        assert!(parser.parse_type().is_err());
    }

    #[test]
    fn type_variable_resolves_against_the_scope_stack() {
        let buffer = Buffer::new("t.tsig", "T").expect("buffer");
        let mut parser = Parser::new_for_test(&buffer).expect("parser");
        parser.state.scopes.push(false);
        parser.state.scopes.insert(Symbol::intern("T"));
        let ty = parser.parse_type().expect("type");
        assert!(matches!(ty, Type::Variable { .. }));
    }

    #[test]
    fn sq_string_only_unescapes_quote_and_backslash() {
        assert_eq!(sq_string_value(r"'a\'b'"), "a'b");
        assert_eq!(sq_string_value(r"'a\nb'"), r"a\nb");
    }

    #[test]
    fn dq_string_applies_the_full_unescape_table() {
        assert_eq!(dq_string_value("\"a\\nb\""), "a\nb");
    }
}
