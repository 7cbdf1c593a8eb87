//! AST node definitions for the type-signature language.
//!
//! Every node family is a plain `#[derive(Debug, Clone)]` struct or enum
//! carrying a [`Location`], mirroring the teacher's AST shape (one field
//! per grammar slot, a `Location`/`Span` on every span-bearing node) but
//! replaced wholesale with the signature language's node set.

use indexmap::IndexMap;
use tsig_util::location::Location;
use tsig_util::symbol::Symbol;

/// A dotted namespace path, e.g. the `Foo::Bar::` prefix of `Foo::Bar::Baz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub path: Vec<Symbol>,
    pub absolute: bool,
}

impl Namespace {
    pub fn empty() -> Self {
        Self {
            path: Vec::new(),
            absolute: false,
        }
    }
}

/// What a [`TypeName`]'s terminal identifier denotes, stamped explicitly at
/// construction time from the case class of its simple name (spec §9:
/// "compute the tag explicitly at name-construction time").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Class,
    Interface,
    Alias,
}

/// A resolved name: an optional namespace plus a terminal identifier whose
/// kind is determined by its case class (upper-initial constant ⇒ class,
/// underscore-upper ⇒ interface, lower-initial ⇒ alias).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub namespace: Namespace,
    pub name: Symbol,
    pub kind: NameKind,
}

impl TypeName {
    pub fn new(namespace: Namespace, name: Symbol, kind: NameKind) -> Self {
        Self { namespace, name, kind }
    }
}

/// One of the reserved base-type keywords. `Any` is spelled `untyped` in
/// source text; the lexer's keyword table has no separate `any` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    Any,
    Bool,
    Bottom,
    Class,
    Instance,
    Nil,
    SelfType,
    Top,
    Void,
}

/// A literal value, used both for literal types and as record keys in hash
/// shape (`{ "age" => Integer }`). String payloads are interned like any
/// other identifier text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(Symbol),
    String(Symbol),
    Symbol(Symbol),
    Bool(bool),
}

/// A type expression (spec §3, §4.4).
#[derive(Debug, Clone)]
pub enum Type {
    Base(BaseKind, Location),
    ClassInstance {
        name: TypeName,
        args: Vec<Type>,
        location: Location,
    },
    ClassSingleton {
        name: TypeName,
        location: Location,
    },
    /// A reference to a type alias by name. Unlike class-instance and
    /// interface references, an alias reference carries no type
    /// arguments even when a `[...]` list follows the name in source —
    /// the bracketed list is still parsed (so the tokens are consumed
    /// correctly) but its contents are discarded, matching the source
    /// parser's `rbs_alias(typename, location)` call, which never
    /// receives the parsed `types` array.
    Alias {
        name: TypeName,
        location: Location,
    },
    Interface {
        name: TypeName,
        args: Vec<Type>,
        location: Location,
    },
    /// Left-to-right accumulation of `|`-separated types. Never holds a
    /// single element — a one-element union collapses to its inner type.
    Union {
        types: Vec<Type>,
        location: Location,
    },
    /// Left-to-right accumulation of `&`-separated types. Never holds a
    /// single element, for the same reason as [`Type::Union`].
    Intersection {
        types: Vec<Type>,
        location: Location,
    },
    Tuple {
        types: Vec<Type>,
        location: Location,
    },
    Optional {
        inner: Box<Type>,
        location: Location,
    },
    Literal {
        value: Literal,
        location: Location,
    },
    Record {
        fields: IndexMap<Literal, Type>,
        location: Location,
    },
    /// A reference to an active type variable, as opposed to a class or
    /// interface name (spec §4.4: disambiguated by a type-variable scope
    /// lookup on a `tUIDENT`).
    Variable {
        name: Symbol,
        location: Location,
    },
    Proc {
        function: Box<Function>,
        block: Option<Box<Block>>,
        location: Location,
    },
}

impl Type {
    pub fn location(&self) -> &Location {
        match self {
            Type::Base(_, loc)
            | Type::ClassInstance { location: loc, .. }
            | Type::ClassSingleton { location: loc, .. }
            | Type::Alias { location: loc, .. }
            | Type::Interface { location: loc, .. }
            | Type::Union { location: loc, .. }
            | Type::Intersection { location: loc, .. }
            | Type::Tuple { location: loc, .. }
            | Type::Optional { location: loc, .. }
            | Type::Literal { location: loc, .. }
            | Type::Record { location: loc, .. }
            | Type::Variable { location: loc, .. }
            | Type::Proc { location: loc, .. } => loc,
        }
    }
}

/// A single function parameter: a type plus an optional name.
#[derive(Debug, Clone)]
pub struct FunctionParam {
    pub ty: Type,
    pub name: Option<Symbol>,
    pub location: Location,
}

/// A function's parameter lists and return type (spec §3, §4.4.3). The
/// seven parameter lists are kept separate rather than flattened, since
/// each has distinct parsing and printing rules.
#[derive(Debug, Clone)]
pub struct Function {
    pub required_positionals: Vec<FunctionParam>,
    pub optional_positionals: Vec<FunctionParam>,
    pub rest_positionals: Option<FunctionParam>,
    pub trailing_positionals: Vec<FunctionParam>,
    pub required_keywords: IndexMap<Symbol, FunctionParam>,
    pub optional_keywords: IndexMap<Symbol, FunctionParam>,
    pub rest_keywords: Option<FunctionParam>,
    pub return_type: Box<Type>,
}

impl Function {
    pub fn empty_params(return_type: Type) -> Self {
        Self {
            required_positionals: Vec::new(),
            optional_positionals: Vec::new(),
            rest_positionals: None,
            trailing_positionals: Vec::new(),
            required_keywords: IndexMap::new(),
            optional_keywords: IndexMap::new(),
            rest_keywords: None,
            return_type: Box::new(return_type),
        }
    }
}

/// A `{ (params) -> T }` block attached to a function, with a flag for
/// whether the block itself is optional (a leading `?` before `{`).
#[derive(Debug, Clone)]
pub struct Block {
    pub function: Function,
    pub required: bool,
}

/// `[TypeParam, ...] function`: a method signature with its own
/// type-parameter list (spec §4.5).
#[derive(Debug, Clone)]
pub struct MethodType {
    pub type_params: Vec<Symbol>,
    pub function: Function,
    pub block: Option<Block>,
    pub location: Location,
}

/// An annotation marker (`%a{...}`) attached to the following declaration
/// or member.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub content: String,
    pub location: Location,
}

/// A contiguous run of line comments attached to the declaration or member
/// immediately below them.
#[derive(Debug, Clone)]
pub struct Comment {
    pub content: String,
    pub location: Location,
}

/// One of the three declared variances on a `Module`/`Class`/`Interface`
/// type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
}

/// A single entry of a declaration's `[T, unchecked out U, ...]` type
/// parameter list.
#[derive(Debug, Clone)]
pub struct TypeParam {
    pub name: Symbol,
    pub variance: Variance,
    pub unchecked: bool,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Singleton,
    /// `self?.` — both an instance and a singleton method.
    SingletonInstance,
}

#[derive(Debug, Clone)]
pub struct MethodDefinition {
    pub name: Symbol,
    pub kind: MethodKind,
    pub types: Vec<MethodType>,
    /// Trailing `...`: this declaration adds overloads to an existing
    /// definition rather than replacing it. Rejected in interface bodies.
    pub overload: bool,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixinKind {
    Include,
    Extend,
    Prepend,
}

#[derive(Debug, Clone)]
pub struct MixinMember {
    pub kind: MixinKind,
    pub name: TypeName,
    pub args: Vec<Type>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `@ivar: T`
    Instance,
    /// `@@cvar: T`
    Class,
    /// `self.@ivar: T`
    ClassInstance,
}

#[derive(Debug, Clone)]
pub struct VariableMember {
    pub kind: VariableKind,
    pub name: Symbol,
    pub ty: Type,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Reader,
    Writer,
    Accessor,
}

/// The optional `(ivar_name)` / `()` clause on an attribute declaration:
/// `None` means no parenthesized clause was given (the ivar defaults to
/// the attribute's own name); `Some(None)` means an explicit empty `()`
/// (no backing ivar); `Some(Some(sym))` names the ivar explicitly.
pub type IvarClause = Option<Option<Symbol>>;

#[derive(Debug, Clone)]
pub struct AttrMember {
    pub kind: AttrKind,
    pub singleton: bool,
    pub name: Symbol,
    pub ivar_name: IvarClause,
    pub ty: Type,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone)]
pub struct VisibilityMember {
    pub visibility: Visibility,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Instance,
    Singleton,
}

#[derive(Debug, Clone)]
pub struct AliasMember {
    pub new_name: Symbol,
    pub old_name: Symbol,
    pub kind: AliasKind,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

/// A member of an `Interface`/`Module`/`Class` body.
#[derive(Debug, Clone)]
pub enum Member {
    Method(MethodDefinition),
    Variable(VariableMember),
    Mixin(MixinMember),
    Attr(AttrMember),
    Visibility(VisibilityMember),
    Alias(AliasMember),
    /// A class/module/interface/constant/alias declaration nested directly
    /// inside a module body (spec §4.6).
    Nested(Box<Declaration>),
}

#[derive(Debug, Clone)]
pub struct ConstantDecl {
    pub name: TypeName,
    pub ty: Type,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct GlobalDecl {
    pub name: Symbol,
    pub ty: Type,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct AliasDecl {
    pub name: TypeName,
    pub ty: Type,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

/// A class-instance reference used for a `Module`'s self-type constraints
/// and a `Class`'s `< super` clause: a type name plus optional type
/// arguments, without the generality of a full [`Type`].
#[derive(Debug, Clone)]
pub struct ClassInstanceRef {
    pub name: TypeName,
    pub args: Vec<Type>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct ModuleDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    /// The `: SelfType, ...` clause, if present.
    pub self_types: Vec<ClassInstanceRef>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    /// The `< super` clause, if present.
    pub super_class: Option<ClassInstanceRef>,
    pub members: Vec<Member>,
    pub annotations: Vec<Annotation>,
    pub location: Location,
    pub comment: Option<Comment>,
}

/// A top-level declaration (spec §3, §4.6).
#[derive(Debug, Clone)]
pub enum Declaration {
    Constant(ConstantDecl),
    Global(GlobalDecl),
    Alias(AliasDecl),
    Interface(InterfaceDecl),
    Module(ModuleDecl),
    Class(ClassDecl),
}

impl Declaration {
    pub fn location(&self) -> &Location {
        match self {
            Declaration::Constant(d) => &d.location,
            Declaration::Global(d) => &d.location,
            Declaration::Alias(d) => &d.location,
            Declaration::Interface(d) => &d.location,
            Declaration::Module(d) => &d.location,
            Declaration::Class(d) => &d.location,
        }
    }

    pub fn comment(&self) -> Option<&Comment> {
        match self {
            Declaration::Constant(d) => d.comment.as_ref(),
            Declaration::Global(d) => d.comment.as_ref(),
            Declaration::Alias(d) => d.comment.as_ref(),
            Declaration::Interface(d) => d.comment.as_ref(),
            Declaration::Module(d) => d.comment.as_ref(),
            Declaration::Class(d) => d.comment.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsig_util::buffer::Buffer;
    use tsig_util::pos::{Position, Range};

    fn dummy_location() -> Location {
        let buffer = Buffer::new("t.tsig", "x").expect("buffer");
        Location::new(buffer, Range::new(Position::new(0, 0, 1, 0), Position::new(1, 1, 1, 1)))
    }

    #[test]
    fn type_location_covers_every_variant() {
        let base = Type::Base(BaseKind::Void, dummy_location());
        assert!(!base.location().range().is_null());

        let var = Type::Variable {
            name: Symbol::intern("T"),
            location: dummy_location(),
        };
        assert!(!var.location().range().is_null());
    }

    #[test]
    fn declaration_location_dispatches_by_variant() {
        let decl = Declaration::Global(GlobalDecl {
            name: Symbol::intern("$foo"),
            ty: Type::Base(BaseKind::Void, dummy_location()),
            location: dummy_location(),
            comment: None,
        });
        assert!(!decl.location().range().is_null());
    }

    #[test]
    fn literal_record_keys_are_hashable() {
        let mut fields = IndexMap::new();
        fields.insert(Literal::Symbol(Symbol::intern("name")), Type::Base(BaseKind::Void, dummy_location()));
        fields.insert(Literal::String(Symbol::intern("age")), Type::Base(BaseKind::Void, dummy_location()));
        assert_eq!(fields.len(), 2);
    }
}
