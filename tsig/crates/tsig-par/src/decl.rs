//! Declaration and member parsing (spec §4.6): constants, globals, type
//! aliases, interfaces, modules, classes, and the member productions that
//! populate interface/module/class bodies.
//!
//! Grounded on `original_source/ext/rbs/parser/parser.c`'s declaration and
//! member productions, reworked onto this crate's pull-based `ParserState`
//! the way `types.rs`/`function.rs` rework the type and function grammars:
//! each production advances onto its own leading token and leaves `current`
//! on its own last token.

use tsig_util::symbol::Symbol;

use crate::ast::*;
use crate::error::ParseResult;
use crate::types::NameKindMask;
use crate::Parser;
use tsig_lex::TokenKind;

/// Which member productions are legal in the body being parsed. Interface
/// bodies are restricted (spec §4.6: "method definitions, `include` (no
/// `extend`/`prepend`), and aliases"); module bodies additionally accept
/// mixins of every kind, variables, attributes, visibility markers, and
/// nested declarations; class bodies accept the same set as modules minus
/// nested declarations (the spec grants those to modules specifically).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberContext {
    Interface,
    Module,
    Class,
}

impl<'a> Parser<'a> {
    /// `signature ::= declaration* EOF` (spec §4.6, top of the grammar).
    pub(crate) fn parse_declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut decls = Vec::new();
        loop {
            if matches!(self.state.next.kind, TokenKind::Eof) {
                return Ok(decls);
            }
            let subject_line = self.state.next.range.start.line;
            let annotations = self.parse_annotations()?;
            let comment = self.take_comment_for(subject_line);
            decls.push(self.parse_one_declaration(annotations, comment)?);
        }
    }

    /// Zero or more leading `%a{...}` annotation tokens.
    fn parse_annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while matches!(self.state.next.kind, TokenKind::TAnnotation(_)) {
            self.state.advance()?;
            if let TokenKind::TAnnotation(sym) = self.state.current.kind {
                annotations.push(Annotation {
                    content: sym.as_str().to_string(),
                    location: self.state.location(self.state.current.range),
                });
            }
        }
        Ok(annotations)
    }

    fn take_comment_for(&mut self, subject_line: u32) -> Option<Comment> {
        self.state
            .take_comment(subject_line)
            .map(|(text, range)| Comment { content: text, location: self.state.location(range) })
    }

    fn parse_one_declaration(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<Declaration> {
        match self.state.next.kind {
            TokenKind::TUIdent(_) | TokenKind::ColonColon => self.parse_constant_decl(comment).map(Declaration::Constant),
            TokenKind::TGIdent(_) => self.parse_global_decl(comment).map(Declaration::Global),
            TokenKind::KwType => self.parse_alias_decl(annotations, comment).map(Declaration::Alias),
            TokenKind::KwInterface => self.parse_interface_decl(annotations, comment).map(Declaration::Interface),
            TokenKind::KwModule => self.parse_module_decl(annotations, comment).map(Declaration::Module),
            TokenKind::KwClass => self.parse_class_decl(annotations, comment).map(Declaration::Class),
            _ => Err(self.state.unexpected("declaration", self.state.next)),
        }
    }

    /// `CONST ':' type`. `ConstantDecl` carries no annotations field, so any
    /// collected above this call are accepted but not retained.
    fn parse_constant_decl(&mut self, comment: Option<Comment>) -> ParseResult<ConstantDecl> {
        self.state.advance()?; // current = the name's leading token
        let start = self.state.current.range;
        let name = self.parse_type_name(NameKindMask::CLASS_ONLY)?;
        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let ty = self.parse_type()?;
        let range = start.merge(ty.location().range());
        Ok(ConstantDecl { name, ty, location: self.state.location(range), comment })
    }

    /// `'$' GIDENT ':' type`.
    fn parse_global_decl(&mut self, comment: Option<Comment>) -> ParseResult<GlobalDecl> {
        self.state.advance()?; // current = tGIDENT
        let start = self.state.current.range;
        let name = match self.state.current.kind {
            TokenKind::TGIdent(s) => s,
            _ => return Err(self.state.unexpected("global variable name", self.state.current)),
        };
        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let ty = self.parse_type()?;
        let range = start.merge(ty.location().range());
        Ok(GlobalDecl { name, ty, location: self.state.location(range), comment })
    }

    /// `'type' NAME ['[' type_param (',' type_param)* ']'] '=' type`. The
    /// type-parameter list's identifiers are visible, as type variables, to
    /// the right-hand type; a fresh reset scope is pushed for the whole
    /// declaration so outer type variables never leak in.
    fn parse_alias_decl(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<AliasDecl> {
        self.state.scopes.push(true);
        let result = self.parse_alias_decl_inner(annotations, comment);
        self.state.scopes.pop();
        result
    }

    fn parse_alias_decl_inner(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<AliasDecl> {
        self.state.advance()?; // current = 'type'
        let start = self.state.current.range;
        self.state.advance()?; // current = the alias name
        let name = self.parse_type_name(NameKindMask::ALIAS_ONLY)?;
        self.parse_type_params()?;
        self.state.advance_assert(|k| matches!(k, TokenKind::Eq), "`=`")?;
        let ty = self.parse_type()?;
        let range = start.merge(ty.location().range());
        Ok(AliasDecl { name, ty, annotations, location: self.state.location(range), comment })
    }

    /// `'[' type_param (',' type_param)* ']'`, or nothing at all.
    /// `type_param ::= ['unchecked'] ['in' | 'out'] UIDENT`. Every
    /// identifier is inserted into the currently active scope as it's read.
    fn parse_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        let mut params = Vec::new();
        if !matches!(self.state.next.kind, TokenKind::LBracket) {
            return Ok(params);
        }
        self.state.advance()?; // current = '['
        loop {
            let start = self.state.next.range;
            self.state.advance()?; // current = 'unchecked' | 'in' | 'out' | UIDENT

            let unchecked = if matches!(self.state.current.kind, TokenKind::KwUnchecked) {
                self.state.advance()?;
                true
            } else {
                false
            };

            let variance = match self.state.current.kind {
                TokenKind::KwIn => {
                    self.state.advance()?;
                    Variance::Contravariant
                }
                TokenKind::KwOut => {
                    self.state.advance()?;
                    Variance::Covariant
                }
                _ => Variance::Invariant,
            };

            let name = match self.state.current.kind {
                TokenKind::TUIdent(sym) => sym,
                _ => return Err(self.state.unexpected("type parameter name", self.state.current)),
            };
            self.state.scopes.insert(name);

            let range = start.merge(self.state.current.range);
            params.push(TypeParam { name, variance, unchecked, location: self.state.location(range) });

            if matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?;
            } else {
                break;
            }
        }
        self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
        Ok(params)
    }

    /// A class name with optional type arguments, used for a class's
    /// `< super` clause and a module's `: SelfType` list.
    fn parse_class_instance_ref(&mut self) -> ParseResult<ClassInstanceRef> {
        self.state.advance()?; // current = the name's leading token
        let start = self.state.current.range;
        let name = self.parse_type_name(NameKindMask::CLASS_ONLY)?;
        let args = if matches!(self.state.next.kind, TokenKind::LBracket) {
            self.state.advance()?; // current = '['
            let args = self.parse_type_list(|k| matches!(k, TokenKind::RBracket))?;
            self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
            args
        } else {
            Vec::new()
        };
        let range = start.merge(self.state.current.range);
        Ok(ClassInstanceRef { name, args, location: self.state.location(range) })
    }

    fn parse_interface_decl(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<InterfaceDecl> {
        self.state.scopes.push(true);
        let result = self.parse_interface_decl_inner(annotations, comment);
        self.state.scopes.pop();
        result
    }

    fn parse_interface_decl_inner(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<InterfaceDecl> {
        self.state.advance()?; // current = 'interface'
        let keyword_range = self.state.current.range;
        self.state.advance()?; // current = the interface name
        let name_range = self.state.current.range;
        let name = self.parse_type_name(NameKindMask::INTERFACE_ONLY)?;
        let type_params = self.parse_type_params()?;
        let members = self.parse_members(MemberContext::Interface)?;
        let end_tok = self.state.advance_assert(|k| matches!(k, TokenKind::KwEnd), "`end`")?;

        let range = keyword_range.merge(end_tok.range);
        let mut location = self.state.location(range);
        location.insert_required(Symbol::intern("keyword"), keyword_range);
        location.insert_required(Symbol::intern("name"), name_range);
        location.insert_required(Symbol::intern("end"), end_tok.range);
        Ok(InterfaceDecl { name, type_params, members, annotations, location, comment })
    }

    fn parse_module_decl(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<ModuleDecl> {
        self.state.scopes.push(true);
        let result = self.parse_module_decl_inner(annotations, comment);
        self.state.scopes.pop();
        result
    }

    fn parse_module_decl_inner(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<ModuleDecl> {
        self.state.advance()?; // current = 'module'
        let keyword_range = self.state.current.range;
        self.state.advance()?; // current = the module name
        let name_range = self.state.current.range;
        let name = self.parse_type_name(NameKindMask::CLASS_ONLY)?;
        let type_params = self.parse_type_params()?;

        let self_types = if matches!(self.state.next.kind, TokenKind::Colon) {
            self.state.advance()?; // current = ':'
            let mut refs = vec![self.parse_class_instance_ref()?];
            while matches!(self.state.next.kind, TokenKind::Comma) {
                self.state.advance()?; // current = ','
                refs.push(self.parse_class_instance_ref()?);
            }
            refs
        } else {
            Vec::new()
        };

        let members = self.parse_members(MemberContext::Module)?;
        let end_tok = self.state.advance_assert(|k| matches!(k, TokenKind::KwEnd), "`end`")?;

        let range = keyword_range.merge(end_tok.range);
        let mut location = self.state.location(range);
        location.insert_required(Symbol::intern("keyword"), keyword_range);
        location.insert_required(Symbol::intern("name"), name_range);
        location.insert_required(Symbol::intern("end"), end_tok.range);
        Ok(ModuleDecl { name, type_params, self_types, members, annotations, location, comment })
    }

    fn parse_class_decl(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<ClassDecl> {
        self.state.scopes.push(true);
        let result = self.parse_class_decl_inner(annotations, comment);
        self.state.scopes.pop();
        result
    }

    fn parse_class_decl_inner(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<ClassDecl> {
        self.state.advance()?; // current = 'class'
        let keyword_range = self.state.current.range;
        self.state.advance()?; // current = the class name
        let name_range = self.state.current.range;
        let name = self.parse_type_name(NameKindMask::CLASS_ONLY)?;
        let type_params = self.parse_type_params()?;

        let (super_class, lt_range) = if matches!(self.state.next.kind, TokenKind::Lt) {
            self.state.advance()?; // current = '<'
            let lt_range = self.state.current.range;
            (Some(self.parse_class_instance_ref()?), Some(lt_range))
        } else {
            (None, None)
        };

        let members = self.parse_members(MemberContext::Class)?;
        let end_tok = self.state.advance_assert(|k| matches!(k, TokenKind::KwEnd), "`end`")?;

        let range = keyword_range.merge(end_tok.range);
        let mut location = self.state.location(range);
        location.insert_required(Symbol::intern("keyword"), keyword_range);
        location.insert_required(Symbol::intern("name"), name_range);
        location.insert_required(Symbol::intern("end"), end_tok.range);
        location.insert_optional(Symbol::intern("lt"), lt_range);
        Ok(ClassDecl { name, type_params, super_class, members, annotations, location, comment })
    }

    fn parse_members(&mut self, ctx: MemberContext) -> ParseResult<Vec<Member>> {
        let mut members = Vec::new();
        loop {
            if matches!(self.state.next.kind, TokenKind::KwEnd) {
                return Ok(members);
            }
            let subject_line = self.state.next.range.start.line;
            let annotations = self.parse_annotations()?;
            let comment = self.take_comment_for(subject_line);
            members.push(self.parse_one_member(ctx, annotations, comment)?);
        }
    }

    fn parse_one_member(&mut self, ctx: MemberContext, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<Member> {
        match self.state.next.kind {
            TokenKind::KwDef => self.parse_method_definition(ctx, annotations, comment).map(Member::Method),

            TokenKind::KwInclude => self.parse_mixin_member(MixinKind::Include, annotations, comment).map(Member::Mixin),
            TokenKind::KwExtend if ctx == MemberContext::Interface => Err(self.state.unexpected("include", self.state.next)),
            TokenKind::KwExtend => self.parse_mixin_member(MixinKind::Extend, annotations, comment).map(Member::Mixin),
            TokenKind::KwPrepend if ctx == MemberContext::Interface => Err(self.state.unexpected("include", self.state.next)),
            TokenKind::KwPrepend => self.parse_mixin_member(MixinKind::Prepend, annotations, comment).map(Member::Mixin),

            TokenKind::KwAlias => self.parse_alias_member(annotations, comment).map(Member::Alias),

            TokenKind::KwAttrReader | TokenKind::KwAttrWriter | TokenKind::KwAttrAccessor if ctx != MemberContext::Interface => {
                self.parse_attr_member(annotations, comment).map(Member::Attr)
            }

            TokenKind::KwPublic | TokenKind::KwPrivate if ctx != MemberContext::Interface => {
                self.reject_annotations(&annotations)?;
                self.parse_visibility_member().map(Member::Visibility)
            }

            TokenKind::TAIdent(_) | TokenKind::TA2Ident(_) if ctx != MemberContext::Interface => {
                self.reject_annotations(&annotations)?;
                self.parse_variable_member().map(Member::Variable)
            }
            TokenKind::KwSelf if ctx != MemberContext::Interface && matches!(self.state.next2.kind, TokenKind::Dot) => {
                self.reject_annotations(&annotations)?;
                self.parse_self_class_ivar_member().map(Member::Variable)
            }

            TokenKind::KwClass if ctx == MemberContext::Module => {
                self.parse_class_decl(annotations, comment).map(|d| Member::Nested(Box::new(Declaration::Class(d))))
            }
            TokenKind::KwModule if ctx == MemberContext::Module => {
                self.parse_module_decl(annotations, comment).map(|d| Member::Nested(Box::new(Declaration::Module(d))))
            }
            TokenKind::KwInterface if ctx == MemberContext::Module => {
                self.parse_interface_decl(annotations, comment).map(|d| Member::Nested(Box::new(Declaration::Interface(d))))
            }
            TokenKind::KwType if ctx == MemberContext::Module => {
                self.parse_alias_decl(annotations, comment).map(|d| Member::Nested(Box::new(Declaration::Alias(d))))
            }
            (TokenKind::TUIdent(_) | TokenKind::ColonColon) if ctx == MemberContext::Module => {
                self.parse_constant_decl(comment).map(|d| Member::Nested(Box::new(Declaration::Constant(d))))
            }

            _ => Err(self.state.unexpected("interface/module/class member", self.state.next)),
        }
    }

    fn reject_annotations(&self, annotations: &[Annotation]) -> ParseResult<()> {
        if annotations.is_empty() {
            Ok(())
        } else {
            Err(self.state.unexpected("a member that accepts annotations", self.state.next))
        }
    }

    /// `'def' [self_kind] name ':' method_type ('|' method_type)* ['...']`.
    /// `self_kind` is `self.` (singleton), `self?.` (singleton+instance), or
    /// absent (instance). A singleton or `self?.` method pushes a reset
    /// scope, hiding the enclosing class's type parameters from its
    /// signature; an instance method sees them.
    fn parse_method_definition(
        &mut self,
        ctx: MemberContext,
        annotations: Vec<Annotation>,
        comment: Option<Comment>,
    ) -> ParseResult<MethodDefinition> {
        self.state.advance()?; // current = 'def'
        let start = self.state.current.range;

        let kind = if matches!(self.state.next.kind, TokenKind::KwSelf) && matches!(self.state.next2.kind, TokenKind::Question) {
            self.state.advance()?; // current = 'self'
            self.state.advance_assert(|k| matches!(k, TokenKind::Question), "`?`")?;
            self.state.advance_assert(|k| matches!(k, TokenKind::Dot), "`.`")?;
            MethodKind::SingletonInstance
        } else if matches!(self.state.next.kind, TokenKind::KwSelf) && matches!(self.state.next2.kind, TokenKind::Dot) {
            self.state.advance()?; // current = 'self'
            self.state.advance_assert(|k| matches!(k, TokenKind::Dot), "`.`")?;
            MethodKind::Singleton
        } else {
            MethodKind::Instance
        };

        self.state.advance()?; // current = the method name
        let name = crate::types::ident_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("method name", self.state.current))?;

        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;

        let reset_scope = matches!(kind, MethodKind::Singleton | MethodKind::SingletonInstance);
        if reset_scope {
            self.state.scopes.push(true);
        }
        let types_result = self.parse_method_type_alternatives();
        if reset_scope {
            self.state.scopes.pop();
        }
        let types = types_result?;

        let overload = if matches!(self.state.next.kind, TokenKind::DotDotDot) {
            if ctx == MemberContext::Interface {
                return Err(self.state.unexpected("method type", self.state.next));
            }
            self.state.advance()?;
            true
        } else {
            false
        };

        let end = match (overload, types.last()) {
            (true, _) => self.state.current.range,
            (false, Some(t)) => t.location.range(),
            (false, None) => start,
        };
        let range = start.merge(end);
        Ok(MethodDefinition { name, kind, types, overload, annotations, location: self.state.location(range), comment })
    }

    fn parse_method_type_alternatives(&mut self) -> ParseResult<Vec<MethodType>> {
        let mut types = vec![self.parse_method_type()?];
        while matches!(self.state.next.kind, TokenKind::Pipe) {
            self.state.advance()?; // current = '|'
            types.push(self.parse_method_type()?);
        }
        Ok(types)
    }

    fn parse_mixin_member(&mut self, kind: MixinKind, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<MixinMember> {
        self.state.advance()?; // current = 'include'/'extend'/'prepend'
        let start = self.state.current.range;
        self.state.advance()?; // current = the mixin's name
        let name = self.parse_type_name(NameKindMask::CLASS_OR_INTERFACE)?;
        let args = if matches!(self.state.next.kind, TokenKind::LBracket) {
            self.state.advance()?; // current = '['
            let args = self.parse_type_list(|k| matches!(k, TokenKind::RBracket))?;
            self.state.advance_assert(|k| matches!(k, TokenKind::RBracket), "`]`")?;
            args
        } else {
            Vec::new()
        };
        let range = start.merge(self.state.current.range);
        Ok(MixinMember { kind, name, args, annotations, location: self.state.location(range), comment })
    }

    /// `'alias' ['self.'] new_name ['self.'] old_name`. An instance alias
    /// names both sides bare; a singleton alias prefixes both with `self.`.
    fn parse_alias_member(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<AliasMember> {
        self.state.advance()?; // current = 'alias'
        let start = self.state.current.range;

        let kind = if matches!(self.state.next.kind, TokenKind::KwSelf) {
            self.state.advance()?; // current = 'self'
            self.state.advance_assert(|k| matches!(k, TokenKind::Dot), "`.`")?;
            AliasKind::Singleton
        } else {
            AliasKind::Instance
        };

        self.state.advance()?; // current = the new name
        let new_name = crate::types::ident_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("method name", self.state.current))?;

        if matches!(kind, AliasKind::Singleton) {
            self.state.advance_assert(|k| matches!(k, TokenKind::KwSelf), "`self`")?;
            self.state.advance_assert(|k| matches!(k, TokenKind::Dot), "`.`")?;
        }

        self.state.advance()?; // current = the old name
        let old_name = crate::types::ident_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("method name", self.state.current))?;

        let range = start.merge(self.state.current.range);
        Ok(AliasMember { new_name, old_name, kind, annotations, location: self.state.location(range), comment })
    }

    /// `('attr_reader'|'attr_writer'|'attr_accessor') ['self.'] name ['(' [AIDENT] ')'] ':' type`.
    fn parse_attr_member(&mut self, annotations: Vec<Annotation>, comment: Option<Comment>) -> ParseResult<AttrMember> {
        self.state.advance()?; // current = the attr keyword
        let start = self.state.current.range;
        let kind = match self.state.current.kind {
            TokenKind::KwAttrReader => AttrKind::Reader,
            TokenKind::KwAttrWriter => AttrKind::Writer,
            TokenKind::KwAttrAccessor => AttrKind::Accessor,
            _ => unreachable!("parse_one_member only dispatches here on an attr keyword"),
        };

        let singleton = if matches!(self.state.next.kind, TokenKind::KwSelf) && matches!(self.state.next2.kind, TokenKind::Dot) {
            self.state.advance()?; // current = 'self'
            self.state.advance()?; // current = '.'
            true
        } else {
            false
        };

        self.state.advance()?; // current = the attribute name
        let name = crate::types::ident_symbol(&self.state.current.kind)
            .ok_or_else(|| self.state.unexpected("attribute name", self.state.current))?;

        let ivar_name = if matches!(self.state.next.kind, TokenKind::LParen) {
            self.state.advance()?; // current = '('
            if matches!(self.state.next.kind, TokenKind::RParen) {
                self.state.advance()?; // current = ')'
                Some(None)
            } else {
                self.state.advance()?; // current = tAIDENT
                let ivar = match self.state.current.kind {
                    TokenKind::TAIdent(s) => s,
                    _ => return Err(self.state.unexpected("instance variable name", self.state.current)),
                };
                self.state.advance_assert(|k| matches!(k, TokenKind::RParen), "`)`")?;
                Some(Some(ivar))
            }
        } else {
            None
        };

        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let ty = self.parse_type()?;

        let range = start.merge(ty.location().range());
        Ok(AttrMember { kind, singleton, name, ivar_name, ty, annotations, location: self.state.location(range), comment })
    }

    fn parse_visibility_member(&mut self) -> ParseResult<VisibilityMember> {
        self.state.advance()?; // current = 'public'/'private'
        let visibility = match self.state.current.kind {
            TokenKind::KwPublic => Visibility::Public,
            TokenKind::KwPrivate => Visibility::Private,
            _ => unreachable!("parse_one_member only dispatches here on a visibility keyword"),
        };
        Ok(VisibilityMember { visibility, location: self.state.location(self.state.current.range) })
    }

    /// `('@IDENT' | '@@IDENT') ':' type`.
    fn parse_variable_member(&mut self) -> ParseResult<VariableMember> {
        self.state.advance()?; // current = tAIDENT or tA2IDENT
        let start = self.state.current.range;
        let (kind, name) = match self.state.current.kind {
            TokenKind::TAIdent(s) => (VariableKind::Instance, s),
            TokenKind::TA2Ident(s) => (VariableKind::Class, s),
            _ => unreachable!("parse_one_member only dispatches here on an ivar/cvar token"),
        };
        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let ty = self.parse_type()?;
        let range = start.merge(ty.location().range());
        Ok(VariableMember { kind, name, ty, location: self.state.location(range) })
    }

    /// `'self' '.' '@IDENT' ':' type`.
    fn parse_self_class_ivar_member(&mut self) -> ParseResult<VariableMember> {
        self.state.advance()?; // current = 'self'
        let start = self.state.current.range;
        self.state.advance_assert(|k| matches!(k, TokenKind::Dot), "`.`")?;
        self.state.advance()?; // current = tAIDENT
        let name = match self.state.current.kind {
            TokenKind::TAIdent(s) => s,
            _ => return Err(self.state.unexpected("instance variable name", self.state.current)),
        };
        self.state.advance_assert(|k| matches!(k, TokenKind::Colon), "`:`")?;
        let ty = self.parse_type()?;
        let range = start.merge(ty.location().range());
        Ok(VariableMember { kind: VariableKind::ClassInstance, name, ty, location: self.state.location(range) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsig_util::buffer::Buffer;

    fn parse(src: &'static str) -> Vec<Declaration> {
        let buffer = Buffer::new("t.tsig", src).expect("buffer");
        let mut parser = Parser::new_for_test(&buffer).expect("parser");
        parser.parse_declarations().expect("declarations")
    }

    #[test]
    fn constant_declaration() {
        let decls = parse("FOO: Integer\n");
        assert!(matches!(decls.as_slice(), [Declaration::Constant(_)]));
    }

    #[test]
    fn global_declaration() {
        let decls = parse("$stdout: IO\n");
        assert!(matches!(decls.as_slice(), [Declaration::Global(_)]));
    }

    #[test]
    fn type_alias_with_a_type_parameter() {
        let decls = parse("type result[T] = T | nil\n");
        match decls.as_slice() {
            [Declaration::Alias(a)] => {
                assert_eq!(a.name.name.as_str(), "result");
                match &a.ty {
                    Type::Union { types, .. } => assert!(matches!(types[0], Type::Variable { .. })),
                    other => panic!("expected a union, got {other:?}"),
                }
            }
            other => panic!("expected one alias declaration, got {other:?}"),
        }
    }

    #[test]
    fn interface_with_a_block_typed_method() {
        let decls = parse("interface _Each[T]\n  def each: () { (T) -> void } -> self\nend\n");
        match decls.as_slice() {
            [Declaration::Interface(i)] => {
                assert_eq!(i.type_params.len(), 1);
                match i.members.as_slice() {
                    [Member::Method(m)] => {
                        let block = m.types[0].block.as_ref().expect("block");
                        assert!(matches!(block.function.required_positionals[0].ty, Type::Variable { .. }));
                    }
                    other => panic!("expected one method member, got {other:?}"),
                }
            }
            other => panic!("expected one interface declaration, got {other:?}"),
        }
    }

    #[test]
    fn interface_rejects_extend() {
        let buffer = Buffer::new("t.tsig", "interface _Foo\n  extend Bar\nend\n").expect("buffer");
        let mut parser = Parser::new_for_test(&buffer).expect("parser");
        assert!(parser.parse_declarations().is_err());
    }

    #[test]
    fn class_with_super_and_members() {
        let decls = parse("class Foo < Bar\n  include Bazable\n  @x: Integer\n  def baz: () -> void\nend\n");
        match decls.as_slice() {
            [Declaration::Class(c)] => {
                assert!(c.super_class.is_some());
                assert_eq!(c.members.len(), 3);
            }
            other => panic!("expected one class declaration, got {other:?}"),
        }
    }

    #[test]
    fn module_self_types_and_nested_constant() {
        let decls = parse("module Foo : Bar, Baz\n  QUUX: Integer\nend\n");
        match decls.as_slice() {
            [Declaration::Module(m)] => {
                assert_eq!(m.self_types.len(), 2);
                assert!(matches!(m.members.as_slice(), [Member::Nested(_)]));
            }
            other => panic!("expected one module declaration, got {other:?}"),
        }
    }

    #[test]
    fn singleton_method_hides_the_enclosing_type_parameter() {
        let decls = parse("class Box[T]\n  def self.make: () -> void\nend\n");
        match decls.as_slice() {
            [Declaration::Class(c)] => match c.members.as_slice() {
                [Member::Method(m)] => {
                    assert_eq!(m.kind, MethodKind::Singleton);
                    assert!(matches!(*m.types[0].function.return_type, Type::Base(BaseKind::Void, _)));
                }
                other => panic!("expected one method member, got {other:?}"),
            },
            other => panic!("expected one class declaration, got {other:?}"),
        }
    }

    #[test]
    fn attr_reader_with_explicit_ivar_name() {
        let decls = parse("class Foo\n  attr_reader bar (@baz): Integer\nend\n");
        match decls.as_slice() {
            [Declaration::Class(c)] => match c.members.as_slice() {
                [Member::Attr(a)] => {
                    assert_eq!(a.kind, AttrKind::Reader);
                    assert_eq!(a.ivar_name, Some(Some(Symbol::intern("@baz"))));
                }
                other => panic!("expected one attr member, got {other:?}"),
            },
            other => panic!("expected one class declaration, got {other:?}"),
        }
    }

    #[test]
    fn trailing_ellipsis_marks_an_overload() {
        let decls = parse("class Foo\n  def bar: () -> void\n           | () -> Integer\n  ...\nend\n");
        match decls.as_slice() {
            [Declaration::Class(c)] => match c.members.as_slice() {
                [Member::Method(m)] => {
                    assert!(m.overload);
                    assert_eq!(m.types.len(), 2);
                }
                other => panic!("expected one method member, got {other:?}"),
            },
            other => panic!("expected one class declaration, got {other:?}"),
        }
    }

    #[test]
    fn a_contiguous_leading_comment_attaches_to_the_second_declaration_only() {
        let decls = parse("C1: Integer\n\n# hello\nC2: String\n");
        match decls.as_slice() {
            [Declaration::Constant(c1), Declaration::Constant(c2)] => {
                assert!(c1.comment.is_none());
                assert_eq!(c2.comment.as_ref().unwrap().content, "hello\n");
            }
            other => panic!("expected two constant declarations, got {other:?}"),
        }
    }
}
