//! Locations — a buffer reference, a primary range, and named sub-ranges.
//!
//! Downstream tools (type checkers, documentation generators) want to
//! underline a sub-part of a declaration independently of the whole — the
//! `name` of a class, the `args` of a parameterized type, the `keyword`
//! introducing a declaration. A [`Location`] carries those as two keyed
//! maps: `required_children` (always present) and `optional_children`
//! (present only when the corresponding source construct appeared).

use indexmap::IndexMap;

use crate::pos::Range;
use crate::symbol::Symbol;
use crate::buffer::Buffer;

/// A location: the buffer it was parsed from, the node's primary range, and
/// named sub-ranges for fine-grained highlighting.
///
/// # Examples
///
/// ```
/// use tsig_util::buffer::Buffer;
/// use tsig_util::location::Location;
/// use tsig_util::pos::{Position, Range};
/// use tsig_util::symbol::Symbol;
///
/// let buf = Buffer::new("t.rbs", "class Foo\nend\n").unwrap();
/// let range = Range::new(Position::new(0, 0, 1, 0), Position::new(9, 9, 1, 9));
/// let mut loc = Location::new(buf, range);
/// loc.insert_required(Symbol::intern("keyword"), Range::new(Position::new(0, 0, 1, 0), Position::new(5, 5, 1, 5)));
/// loc.insert_optional(Symbol::intern("lt"), None);
/// assert!(loc.required(Symbol::intern("keyword")).is_some());
/// assert!(loc.optional(Symbol::intern("lt")).unwrap().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Location {
    buffer: Buffer,
    range: Range,
    required_children: IndexMap<Symbol, Range>,
    optional_children: IndexMap<Symbol, Option<Range>>,
}

impl Location {
    /// Construct a location with no sub-children yet attached.
    pub fn new(buffer: Buffer, range: Range) -> Self {
        Self {
            buffer,
            range,
            required_children: IndexMap::new(),
            optional_children: IndexMap::new(),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Attach a required sub-range. Required sub-children must always be
    /// non-null ranges — callers are responsible for upholding that
    /// invariant (see spec §3, "Invariants").
    pub fn insert_required(&mut self, name: Symbol, range: Range) {
        debug_assert!(!range.is_null(), "required_children entries must be non-null");
        self.required_children.insert(name, range);
    }

    /// Attach an optional sub-range; `None` records that the source
    /// construct the sub-range would describe was absent.
    pub fn insert_optional(&mut self, name: Symbol, range: Option<Range>) {
        self.optional_children.insert(name, range);
    }

    /// Look up a required sub-range by name.
    pub fn required(&self, name: Symbol) -> Option<Range> {
        self.required_children.get(&name).copied()
    }

    /// Look up an optional sub-range by name. Returns `Some(None)` if the
    /// name was recorded as absent, and `None` if the name was never
    /// attached at all.
    pub fn optional(&self, name: Symbol) -> Option<Option<Range>> {
        self.optional_children.get(&name).copied()
    }

    /// Iterate over all attached required sub-children.
    pub fn required_iter(&self) -> impl Iterator<Item = (Symbol, Range)> + '_ {
        self.required_children.iter().map(|(&k, &v)| (k, v))
    }

    /// Iterate over all attached optional sub-children.
    pub fn optional_iter(&self) -> impl Iterator<Item = (Symbol, Option<Range>)> + '_ {
        self.optional_children.iter().map(|(&k, &v)| (k, v))
    }

    /// Merge another location's primary range into this one, widening to
    /// cover both. Used when a node's span grows as the parser consumes
    /// more tokens (e.g. extending a declaration's range to its `end`
    /// keyword).
    pub fn widen_to(&mut self, other: Range) {
        self.range = self.range.merge(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::Position;

    fn buf() -> Buffer {
        Buffer::new("t.rbs", "class Foo\nend\n").unwrap()
    }

    fn range(a: usize, b: usize) -> Range {
        Range::new(Position::new(a, a as u32, 1, a as u32), Position::new(b, b as u32, 1, b as u32))
    }

    #[test]
    fn required_children_round_trip() {
        let mut loc = Location::new(buf(), range(0, 9));
        let name = Symbol::intern("name");
        loc.insert_required(name, range(6, 9));
        assert_eq!(loc.required(name), Some(range(6, 9)));
    }

    #[test]
    fn optional_children_distinguish_absent_from_null_range() {
        let mut loc = Location::new(buf(), range(0, 9));
        let lt = Symbol::intern("lt");
        assert_eq!(loc.optional(lt), None);
        loc.insert_optional(lt, None);
        assert_eq!(loc.optional(lt), Some(None));
        loc.insert_optional(lt, Some(range(1, 2)));
        assert_eq!(loc.optional(lt), Some(Some(range(1, 2))));
    }

    #[test]
    fn widen_to_extends_primary_range() {
        let mut loc = Location::new(buf(), range(0, 5));
        loc.widen_to(range(3, 9));
        assert_eq!(loc.range(), range(0, 9));
    }
}
