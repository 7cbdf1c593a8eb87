//! Function, block, and method-type parsing (spec §4.4.3, §4.5).
//!
//! Grounded on `original_source/ext/rbs/parser/parser.c`'s
//! `parse_function_param` / `parse_required_keyword` /
//! `parse_optional_keyword` / `parse_keywords` / `parse_trailing_params` /
//! `parse_optional_params` / `parse_required_params` / `parse_params` /
//! `parse_function` / `parse_method_type`. One fix applied over the
//! source: its block-optionality check tests `next_token.type` against two
//! different constants in the same `&&` (`next_token.type == pQUESTION &&
//! next_token.type == pLBRACE`), which can never be true — this is treated
//! as a bug and corrected to `next == '?' && next2 == '{'`.

use indexmap::IndexMap;
use tsig_lex::TokenKind;
use tsig_util::symbol::Symbol;

use crate::ast::{Block, Function, FunctionParam, MethodType};
use crate::error::ParseResult;
use crate::Parser;

/// The narrower identifier check used only to disambiguate a keyword
/// parameter's name from a type (spec §4.4.3's ambiguity rules) — distinct
/// from `types::ident_symbol`'s broader set, matching the source's own
/// `is_keyword_token` allowlist.
fn param_keyword_symbol(kind: &TokenKind) -> Option<Symbol> {
    match kind {
        TokenKind::TLIdent(s) | TokenKind::TUIdent(s) | TokenKind::TULIdent(s) => Some(*s),
        TokenKind::KwSingleton => Some(Symbol::intern("singleton")),
        TokenKind::KwSelf => Some(Symbol::intern("self")),
        TokenKind::KwInstance => Some(Symbol::intern("instance")),
        TokenKind::KwVoid => Some(Symbol::intern("void")),
        _ => None,
    }
}

/// Accumulates a function's seven parameter lists while they're being
/// parsed, mirroring the source's `method_params` struct.
#[derive(Default)]
struct ParamsAcc {
    required_positionals: Vec<FunctionParam>,
    optional_positionals: Vec<FunctionParam>,
    rest_positionals: Option<FunctionParam>,
    trailing_positionals: Vec<FunctionParam>,
    required_keywords: IndexMap<Symbol, FunctionParam>,
    optional_keywords: IndexMap<Symbol, FunctionParam>,
    rest_keywords: Option<FunctionParam>,
}

impl ParamsAcc {
    fn into_function(self, return_type: crate::ast::Type) -> Function {
        Function {
            required_positionals: self.required_positionals,
            optional_positionals: self.optional_positionals,
            rest_positionals: self.rest_positionals,
            trailing_positionals: self.trailing_positionals,
            required_keywords: self.required_keywords,
            optional_keywords: self.optional_keywords,
            rest_keywords: self.rest_keywords,
            return_type: Box::new(return_type),
        }
    }
}

impl<'a> Parser<'a> {
    /// `function_param ::= type | type name`. A bare type with nothing but
    /// a comma or `)` behind it has no name; otherwise the following token
    /// is the parameter's name.
    fn parse_function_param(&mut self) -> ParseResult<FunctionParam> {
        let ty = self.parse_type()?;
        if matches!(self.state.next.kind, TokenKind::Comma | TokenKind::RParen) {
            let range = ty.location().range();
            return Ok(FunctionParam { ty, name: None, location: self.state.location(range) });
        }
        self.state.advance()?; // current = the parameter's name token
        let name = crate::types::ident_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("parameter name", self.state.current))?;
        let range = ty.location().range().merge(self.state.current.range);
        Ok(FunctionParam { ty, name: Some(name), location: self.state.location(range) })
    }

    /// `keyword ':' function_param`, shared by the required- and
    /// optional-keyword productions (identical shape in the source; they
    /// differ only in which map the caller inserts the result into).
    /// Assumes `current` is the token immediately before the keyword (a
    /// leading `?` for optional keywords, or whatever preceded a required
    /// one).
    fn parse_keyword_param(&mut self) -> ParseResult<(Symbol, FunctionParam)> {
        self.state.advance()?; // current = keyword token
        let keyword = param_keyword_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("keyword parameter name", self.state.current))?;
        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let param = self.parse_function_param()?;
        if matches!(self.state.next.kind, TokenKind::Comma) {
            self.state.advance()?;
        }
        Ok((keyword, param))
    }

    /// `keywords ::= ')' | '?' optional_keyword keywords | '**' function_param | required_keyword keywords`.
    fn parse_keywords(&mut self, params: &mut ParamsAcc) -> ParseResult<()> {
        loop {
            match self.state.next.kind {
                TokenKind::RParen => return Ok(()),
                TokenKind::Question => {
                    self.state.advance()?; // current = '?'
                    let (kw, param) = self.parse_keyword_param()?;
                    params.optional_keywords.insert(kw, param);
                }
                TokenKind::StarStar => {
                    self.state.advance()?; // current = '**'
                    params.rest_keywords = Some(self.parse_function_param()?);
                    return Ok(());
                }
                _ => {
                    let (kw, param) = self.parse_keyword_param()?;
                    params.required_keywords.insert(kw, param);
                }
            }
        }
    }

    /// Trailing positionals following a rest positional (only reachable
    /// once a `*` has been seen), switching over to `keywords` the moment
    /// a keyword-shaped entry or `**` appears (spec §4.4.3's ambiguity
    /// rules).
    fn parse_trailing_params(&mut self, params: &mut ParamsAcc) -> ParseResult<()> {
        loop {
            if matches!(self.state.next.kind, TokenKind::RParen) {
                return Ok(());
            }
            if matches!(self.state.next.kind, TokenKind::Question) {
                self.state.advance()?; // current = '?'
                let (kw, param) = self.parse_keyword_param()?;
                params.optional_keywords.insert(kw, param);
                return self.parse_keywords(params);
            }
            if matches!(self.state.next.kind, TokenKind::StarStar) {
                return self.parse_keywords(params);
            }
            if param_keyword_symbol(&self.state.next.kind).is_some() && matches!(self.state.next2.kind, TokenKind::Colon) {
                return self.parse_keywords(params);
            }
            let param = self.parse_function_param()?;
            params.trailing_positionals.push(param);
            if matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?;
            }
        }
    }

    /// Optional positionals (`?`-prefixed), reachable either directly or
    /// after a required positional run hits a `?`.
    fn parse_optional_params(&mut self, params: &mut ParamsAcc) -> ParseResult<()> {
        loop {
            if matches!(self.state.next.kind, TokenKind::RParen) {
                return Ok(());
            }
            if matches!(self.state.next.kind, TokenKind::Star) {
                self.state.advance()?; // current = '*'
                params.rest_positionals = Some(self.parse_function_param()?);
                if matches!(self.state.next.kind, TokenKind::RParen) {
                    return Ok(());
                }
                self.state.advance_assert(|k| matches!(k, TokenKind::Comma), "`,`")?;
                return self.parse_trailing_params(params);
            }
            if matches!(self.state.next.kind, TokenKind::Question) {
                self.state.advance()?; // current = '?'
                if param_keyword_symbol(&self.state.next.kind).is_some() && matches!(self.state.next2.kind, TokenKind::Colon) {
                    let (kw, param) = self.parse_keyword_param()?;
                    params.optional_keywords.insert(kw, param);
                    return self.parse_keywords(params);
                }
                let param = self.parse_function_param()?;
                params.optional_positionals.push(param);
                if matches!(self.state.next.kind, TokenKind::Comma) {
                    self.state.advance()?;
                }
            } else {
                return self.parse_keywords(params);
            }
        }
    }

    /// Required positionals, the entry point of `params`.
    fn parse_required_params(&mut self, params: &mut ParamsAcc) -> ParseResult<()> {
        loop {
            if matches!(self.state.next.kind, TokenKind::RParen) {
                return Ok(());
            }
            if matches!(self.state.next.kind, TokenKind::Star) {
                self.state.advance()?; // current = '*'
                params.rest_positionals = Some(self.parse_function_param()?);
                if matches!(self.state.next.kind, TokenKind::RParen) {
                    return Ok(());
                }
                self.state.advance_assert(|k| matches!(k, TokenKind::Comma), "`,`")?;
                return self.parse_trailing_params(params);
            }
            if matches!(self.state.next.kind, TokenKind::StarStar) {
                return self.parse_keywords(params);
            }
            if matches!(self.state.next.kind, TokenKind::Question) {
                return self.parse_optional_params(params);
            }
            if param_keyword_symbol(&self.state.next.kind).is_some() && matches!(self.state.next2.kind, TokenKind::Colon) {
                return self.parse_keywords(params);
            }
            let param = self.parse_function_param()?;
            params.required_positionals.push(param);
            if matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?;
            }
        }
    }

    fn parse_params(&mut self, params: &mut ParamsAcc) -> ParseResult<()> {
        self.parse_required_params(params)
    }

    /// `function ::= ['(' params ')'] ['?'] ['{' ['(' params ')'] '->' type '}'] '->' type`.
    /// Returns the function and, if a block was present, the block.
    pub(crate) fn parse_function(&mut self) -> ParseResult<(Function, Option<Block>)> {
        let mut params = ParamsAcc::default();
        if matches!(self.state.next.kind, TokenKind::LParen) {
            self.state.advance()?; // current = '('
            self.parse_params(&mut params)?;
            self.state.advance_assert(|k| matches!(k, TokenKind::RParen), "`)`")?;
        }

        let mut block_required = true;
        if matches!(self.state.next.kind, TokenKind::Question) && matches!(self.state.next2.kind, TokenKind::LBrace) {
            block_required = false;
            self.state.advance()?; // current = '?'
        }

        let block = if matches!(self.state.next.kind, TokenKind::LBrace) {
            self.state.advance()?; // current = '{'
            let mut block_params = ParamsAcc::default();
            if matches!(self.state.next.kind, TokenKind::LParen) {
                self.state.advance()?; // current = '('
                self.parse_params(&mut block_params)?;
                self.state.advance_assert(|k| matches!(k, TokenKind::RParen), "`)`")?;
            }
            self.state.advance_assert(|k| matches!(k, TokenKind::Arrow), "`->`")?;
            let block_return = self.parse_type()?;
            self.state.advance_assert(|k| matches!(k, TokenKind::RBrace), "`}`")?;
            Some(Block { function: block_params.into_function(block_return), required: block_required })
        } else {
            None
        };

        self.state.advance_assert(|k| matches!(k, TokenKind::Arrow), "`->`")?;
        let return_type = self.parse_type()?;
        Ok((params.into_function(return_type), block))
    }

    /// `method_type ::= ['[' UIDENT (',' UIDENT)* ']'] function` (spec
    /// §4.5). A fresh non-reset type-variable scope is pushed
    /// unconditionally before the (possibly absent) type-parameter list is
    /// read, and popped before returning — on either the success or error
    /// path, so a failure downstream never leaves the scope stack
    /// unbalanced.
    pub(crate) fn parse_method_type(&mut self) -> ParseResult<MethodType> {
        self.state.scopes.push(false);
        let start = self.state.next.range;

        let type_params = match self.parse_method_type_params() {
            Ok(params) => params,
            Err(e) => {
                self.state.scopes.pop();
                return Err(e);
            }
        };

        let (function, block) = match self.parse_function() {
            Ok(v) => v,
            Err(e) => {
                self.state.scopes.pop();
                return Err(e);
            }
        };
        self.state.scopes.pop();

        let range = start.merge(function.return_type.location().range());
        Ok(MethodType { type_params, function, block, location: self.state.location(range) })
    }

    fn parse_method_type_params(&mut self) -> ParseResult<Vec<Symbol>> {
        let mut type_params = Vec::new();
        if !matches!(self.state.next.kind, TokenKind::LBracket) {
            return Ok(type_params);
        }
        self.state.advance()?; // current = '['
        loop {
            self.state.advance()?; // current = expected UIDENT
            let sym = match self.state.current.kind {
                TokenKind::TUIdent(s) => s,
                _ => return Err(self.state.unexpected("type parameter name", self.state.current)),
            };
            self.state.scopes.insert(sym);
            type_params.push(sym);
            if matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?;
            } else {
                break;
            }
        }
        self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
        Ok(type_params)
    }
}
