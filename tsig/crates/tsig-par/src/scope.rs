//! Type-variable scope stack (spec §4.3).
//!
//! Grounded on `original_source/ext/rbs/parser/parserstate.c`'s
//! `parser_push_typevar_table` / `parser_pop_typevar_table` /
//! `parser_insert_typevar` / `parser_typevar_member`, which use a singly
//! linked list of tables where a "reset" table is encoded by a zero-size
//! sentinel (`RESET_TABLE_P(table)` == `table->size == 0`). Spec §9
//! prescribes the clean reimplementation used here: an explicit
//! `enum { Normal(Vec<Symbol>), Reset }` stack with identical lookup
//! semantics (linear scan upward, halt at a `Reset` frame).

use tsig_util::symbol::Symbol;

#[derive(Debug, Clone)]
enum ScopeFrame {
    Normal(Vec<Symbol>),
    Reset,
}

/// The parser's stack of type-variable scopes. `push`/`pop` are called on
/// entry/exit of class, module, and interface bodies, and around a single
/// method type's own type-parameter list.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Pushes a fresh, empty `Normal` table. If `reset` is set, a `Reset`
    /// sentinel is pushed first so the new table's lookups can't see past
    /// it into outer scopes — used when entering a class/interface/module
    /// body or a singleton method, so type parameters don't leak across
    /// the boundary.
    pub fn push(&mut self, reset: bool) {
        if reset {
            self.frames.push(ScopeFrame::Reset);
        }
        self.frames.push(ScopeFrame::Normal(Vec::new()));
    }

    /// Pops the top table. If the newly exposed top is a `Reset`
    /// sentinel, it is popped too, undoing exactly what a matching
    /// `push(true)` pushed.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty — callers must balance every `push`
    /// with exactly one `pop` before the stack empties.
    pub fn pop(&mut self) {
        self.frames.pop().expect("pop on an empty type-variable scope stack");
        if matches!(self.frames.last(), Some(ScopeFrame::Reset)) {
            self.frames.pop();
        }
    }

    /// Adds `id` to the top table.
    ///
    /// # Panics
    ///
    /// Panics if the top frame is a `Reset` sentinel or the stack is
    /// empty — both indicate a caller inserting outside any pushed scope.
    pub fn insert(&mut self, id: Symbol) {
        match self.frames.last_mut() {
            Some(ScopeFrame::Normal(ids)) => ids.push(id),
            Some(ScopeFrame::Reset) => panic!("cannot insert into a reset type-variable scope"),
            None => panic!("insert on an empty type-variable scope stack"),
        }
    }

    /// Whether `id` is visible from the current scope: walks downward
    /// through `Normal` tables, stopping at the first `Reset` sentinel.
    pub fn member(&self, id: Symbol) -> bool {
        for frame in self.frames.iter().rev() {
            match frame {
                ScopeFrame::Normal(ids) => {
                    if ids.contains(&id) {
                        return true;
                    }
                }
                ScopeFrame::Reset => return false,
            }
        }
        false
    }
}
