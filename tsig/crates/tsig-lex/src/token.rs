//! Token kinds and the `Token` value type.
//!
//! The kind set is closed (spec §6): every production of the lexer's
//! sub-lexer table (§4.1, §4.1.1) resolves to one of these variants, plus
//! `NullType`/`Eof` as sentinels.

use std::fmt;
use tsig_util::pos::Range;
use tsig_util::symbol::Symbol;

/// A lexed token: a kind tag plus the range of source it was lexed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range,
}

impl Token {
    pub fn new(kind: TokenKind, range: Range) -> Self {
        Self { kind, range }
    }

    /// The sentinel token used to seed a parser state before its first
    /// `advance`.
    pub fn null() -> Self {
        Self::new(TokenKind::NullType, Range::NULL)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Payload string data is interned (`Symbol`) for token classes that feed
/// directly into AST identifiers — names compared repeatedly during name
/// resolution and type-variable scope lookup. Literal/comment payloads that
/// are read once are left as plain strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Sentinel used before the first token has been read.
    NullType,
    Eof,

    // Punctuation that maps directly from a single byte (§4.1 one-character
    // tokens), plus the multi-character punctuation produced by a sub-lexer
    // that is NOT folded into `Operator` (`::`, `->`, `=>`, `*`, `**`, `.`,
    // `...`).
    LParen,
    RParen,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Pipe,
    Caret,
    Amp,
    Question,
    LBracket,
    Colon,
    ColonColon,
    Arrow,
    FatArrow,
    Star,
    StarStar,
    Dot,
    DotDotDot,
    /// Bare `<`, kept distinct from the folded comparison operators because
    /// the class declaration's `< super` clause (§4.6) needs it as its own
    /// punctuation mark.
    Lt,
    Eq,

    // Keywords (§4.1 keyword table).
    KwBool,
    KwBot,
    KwClass,
    KwInstance,
    KwInterface,
    KwNil,
    KwSelf,
    KwSingleton,
    KwTop,
    KwVoid,
    KwType,
    KwUnchecked,
    KwIn,
    KwOut,
    KwEnd,
    KwDef,
    KwInclude,
    KwExtend,
    KwPrepend,
    KwAlias,
    KwModule,
    KwAttrReader,
    KwAttrWriter,
    KwAttrAccessor,
    KwPublic,
    KwPrivate,
    KwTrue,
    KwFalse,
    KwUntyped,

    // Identifier classes (§6).
    TLIdent(Symbol),
    TUIdent(Symbol),
    TULIdent(Symbol),
    TGIdent(Symbol),
    TAIdent(Symbol),
    TA2Ident(Symbol),
    TBangIdent(Symbol),
    TEqIdent(Symbol),
    /// Back-quoted identifier, e.g. `` `foo` ``.
    TQIdent(Symbol),
    /// An operator used as a method name or symbol payload (`+`, `<=>`,
    /// `[]=`, …); also what bare `!`, `/`, `~`, and folded comparison
    /// sequences resolve to.
    TOperator(Symbol),

    // Literal classes (§6).
    /// Cleaned of `_` digit-group separators; stored as text since the
    /// signature language places no bound on magnitude.
    TInteger(Symbol),
    /// `tSQSYMBOL`/`tDQSYMBOL` are folded into `tSYMBOL` by this lexer (open
    /// question resolution #3, DESIGN.md); they remain in this enum only as
    /// documented aliases that `next_token` never constructs.
    TSymbol(Symbol),
    TSqSymbol(Symbol),
    TDqSymbol(Symbol),
    TSqString(Symbol),
    TDqString(Symbol),
    TAnnotation(Symbol),

    // Comment classes (§6).
    TComment(Symbol),
    TLineComment(Symbol),
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::TComment(_) | TokenKind::TLineComment(_))
    }

    /// A short, human name for this token class, for use in syntax error
    /// messages (spec §7: "the kind name of the actual token").
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::NullType => "<null>",
            TokenKind::Eof => "end of input",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Amp => "`&`",
            TokenKind::Question => "`?`",
            TokenKind::LBracket => "`[`",
            TokenKind::Colon => "`:`",
            TokenKind::ColonColon => "`::`",
            TokenKind::Arrow => "`->`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Star => "`*`",
            TokenKind::StarStar => "`**`",
            TokenKind::Dot => "`.`",
            TokenKind::DotDotDot => "`...`",
            TokenKind::Lt => "`<`",
            TokenKind::Eq => "`=`",
            TokenKind::KwBool => "`bool`",
            TokenKind::KwBot => "`bot`",
            TokenKind::KwClass => "`class`",
            TokenKind::KwInstance => "`instance`",
            TokenKind::KwInterface => "`interface`",
            TokenKind::KwNil => "`nil`",
            TokenKind::KwSelf => "`self`",
            TokenKind::KwSingleton => "`singleton`",
            TokenKind::KwTop => "`top`",
            TokenKind::KwVoid => "`void`",
            TokenKind::KwType => "`type`",
            TokenKind::KwUnchecked => "`unchecked`",
            TokenKind::KwIn => "`in`",
            TokenKind::KwOut => "`out`",
            TokenKind::KwEnd => "`end`",
            TokenKind::KwDef => "`def`",
            TokenKind::KwInclude => "`include`",
            TokenKind::KwExtend => "`extend`",
            TokenKind::KwPrepend => "`prepend`",
            TokenKind::KwAlias => "`alias`",
            TokenKind::KwModule => "`module`",
            TokenKind::KwAttrReader => "`attr_reader`",
            TokenKind::KwAttrWriter => "`attr_writer`",
            TokenKind::KwAttrAccessor => "`attr_accessor`",
            TokenKind::KwPublic => "`public`",
            TokenKind::KwPrivate => "`private`",
            TokenKind::KwTrue => "`true`",
            TokenKind::KwFalse => "`false`",
            TokenKind::KwUntyped => "`untyped`",
            TokenKind::TLIdent(_) => "identifier",
            TokenKind::TUIdent(_) => "constant name",
            TokenKind::TULIdent(_) => "interface name",
            TokenKind::TGIdent(_) => "global variable name",
            TokenKind::TAIdent(_) => "instance variable name",
            TokenKind::TA2Ident(_) => "class variable name",
            TokenKind::TBangIdent(_) => "identifier ending in `!`",
            TokenKind::TEqIdent(_) => "identifier ending in `=`",
            TokenKind::TQIdent(_) => "back-quoted identifier",
            TokenKind::TOperator(_) => "operator",
            TokenKind::TInteger(_) => "integer literal",
            TokenKind::TSymbol(_) | TokenKind::TSqSymbol(_) | TokenKind::TDqSymbol(_) => {
                "symbol literal"
            }
            TokenKind::TSqString(_) => "single-quoted string",
            TokenKind::TDqString(_) => "double-quoted string",
            TokenKind::TAnnotation(_) => "annotation",
            TokenKind::TComment(_) => "comment",
            TokenKind::TLineComment(_) => "line comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Look up the keyword token kind for a lower-initial identifier's text, if
/// any (spec §4.1's keyword table).
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "bool" => TokenKind::KwBool,
        "bot" => TokenKind::KwBot,
        "class" => TokenKind::KwClass,
        "instance" => TokenKind::KwInstance,
        "interface" => TokenKind::KwInterface,
        "nil" => TokenKind::KwNil,
        "self" => TokenKind::KwSelf,
        "singleton" => TokenKind::KwSingleton,
        "top" => TokenKind::KwTop,
        "void" => TokenKind::KwVoid,
        "type" => TokenKind::KwType,
        "unchecked" => TokenKind::KwUnchecked,
        "in" => TokenKind::KwIn,
        "out" => TokenKind::KwOut,
        "end" => TokenKind::KwEnd,
        "def" => TokenKind::KwDef,
        "include" => TokenKind::KwInclude,
        "extend" => TokenKind::KwExtend,
        "prepend" => TokenKind::KwPrepend,
        "alias" => TokenKind::KwAlias,
        "module" => TokenKind::KwModule,
        "attr_reader" => TokenKind::KwAttrReader,
        "attr_writer" => TokenKind::KwAttrWriter,
        "attr_accessor" => TokenKind::KwAttrAccessor,
        "public" => TokenKind::KwPublic,
        "private" => TokenKind::KwPrivate,
        "true" => TokenKind::KwTrue,
        "false" => TokenKind::KwFalse,
        "untyped" => TokenKind::KwUntyped,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_kind_hits_and_misses() {
        assert_eq!(keyword_kind("class"), Some(TokenKind::KwClass));
        assert_eq!(keyword_kind("attr_accessor"), Some(TokenKind::KwAttrAccessor));
        assert_eq!(keyword_kind("not_a_keyword"), None);
    }

    #[test]
    fn null_token_is_sentinel() {
        let t = Token::null();
        assert_eq!(t.kind, TokenKind::NullType);
        assert!(t.range.is_null());
    }

    #[test]
    fn describe_is_stable_for_errors() {
        assert_eq!(TokenKind::KwEnd.describe(), "`end`");
        assert_eq!(TokenKind::Eof.describe(), "end of input");
    }
}
