//! Symbol interning.
//!
//! Identifiers, keywords, and [`crate::location::Location`] sub-child names
//! all flow through a single global, thread-safe interner so that
//! comparison is a single integer compare rather than a string compare.
//! Every language keyword is pre-interned at a stable index during
//! initialization.
//!
//! # Thread safety
//!
//! The interner is `Sync + Send`; multiple parsers running on separate
//! buffers on separate threads intern concurrently without coordination,
//! matching the concurrency model of §5 (distinct parsers over distinct
//! buffers need no synchronization).

mod interner;

pub use interner::STRING_TABLE;

/// Snapshot of interner statistics, useful for profiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InternerStats {
    pub count: usize,
    pub capacity: usize,
    pub collisions: usize,
    pub hits: usize,
    pub misses: usize,
}

impl InternerStats {
    pub const fn new(count: usize, capacity: usize, collisions: usize, hits: usize, misses: usize) -> Self {
        Self {
            count,
            capacity,
            collisions,
            hits,
            misses,
        }
    }

    /// `count / capacity`, or `0.0` if capacity is zero.
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.count as f64 / self.capacity as f64
        }
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// An interned string identifier.
///
/// `Symbol` is a compact 4-byte handle; equality and ordering are index
/// comparisons, not string comparisons.
///
/// # Examples
///
/// ```
/// use tsig_util::symbol::Symbol;
///
/// let a = Symbol::intern("Array");
/// let b = Symbol::intern("Array");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Array");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

impl Symbol {
    /// Intern `s`, returning its symbol. Interning the same string always
    /// returns the same symbol.
    #[inline]
    pub fn intern(s: &str) -> Symbol {
        STRING_TABLE.intern(s)
    }

    /// Resolve the symbol back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the symbol was not produced by this process's interner
    /// (e.g. constructed from a raw index).
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE
            .get(*self)
            .expect("Symbol not present in the global interner")
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of symbols reserved for known keywords; everything below this
/// index is a stable, pre-interned keyword.
pub(crate) const RESERVED_SYMBOLS_END: u32 = 64;

macro_rules! keywords {
    ($($konst:ident => $idx:expr, $text:expr;)*) => {
        $(
            #[doc = concat!("Known symbol for the `", $text, "` keyword.")]
            pub const $konst: Symbol = Symbol { index: $idx };
        )*

        pub(crate) const KEYWORD_TEXT: &[(&str, Symbol)] = &[
            $(($text, $konst),)*
        ];
    };
}

keywords! {
    KW_BOOL => 0, "bool";
    KW_BOT => 1, "bot";
    KW_CLASS => 2, "class";
    KW_INSTANCE => 3, "instance";
    KW_INTERFACE => 4, "interface";
    KW_NIL => 5, "nil";
    KW_SELF => 6, "self";
    KW_SINGLETON => 7, "singleton";
    KW_TOP => 8, "top";
    KW_VOID => 9, "void";
    KW_TYPE => 10, "type";
    KW_UNCHECKED => 11, "unchecked";
    KW_IN => 12, "in";
    KW_OUT => 13, "out";
    KW_END => 14, "end";
    KW_DEF => 15, "def";
    KW_INCLUDE => 16, "include";
    KW_EXTEND => 17, "extend";
    KW_PREPEND => 18, "prepend";
    KW_ALIAS => 19, "alias";
    KW_MODULE => 20, "module";
    KW_ATTR_READER => 21, "attr_reader";
    KW_ATTR_WRITER => 22, "attr_writer";
    KW_ATTR_ACCESSOR => 23, "attr_accessor";
    KW_PUBLIC => 24, "public";
    KW_PRIVATE => 25, "private";
    KW_TRUE => 26, "true";
    KW_FALSE => 27, "false";
    KW_UNTYPED => 28, "untyped";
    KW_ANY => 29, "any";
}

/// Look up whether `s` is one of the reserved keywords, returning its
/// stable pre-interned symbol if so. This is the keyword table of spec §4.1:
/// the lexer calls it after lexing a lower-initial identifier and rewrites
/// the token kind on a hit.
pub fn lookup_keyword(s: &str) -> Option<Symbol> {
    KEYWORD_TEXT
        .iter()
        .find(|(text, _)| *text == s)
        .map(|(_, sym)| *sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_yields_same_symbol() {
        assert_eq!(Symbol::intern("Foo"), Symbol::intern("Foo"));
    }

    #[test]
    fn interning_different_strings_yields_different_symbols() {
        assert_ne!(Symbol::intern("Foo"), Symbol::intern("Bar"));
    }

    #[test]
    fn as_str_round_trips() {
        let s = Symbol::intern("my_method");
        assert_eq!(s.as_str(), "my_method");
    }

    #[test]
    fn keyword_lookup_hits_and_misses() {
        assert_eq!(lookup_keyword("class"), Some(KW_CLASS));
        assert_eq!(lookup_keyword("attr_accessor"), Some(KW_ATTR_ACCESSOR));
        assert_eq!(lookup_keyword("not_a_keyword"), None);
    }

    #[test]
    fn keyword_constants_are_stable_and_pre_interned() {
        assert_eq!(KW_CLASS.as_str(), "class");
        assert_eq!(KW_DEF.as_str(), "def");
        assert!(KW_UNTYPED.index < RESERVED_SYMBOLS_END);
    }
}
