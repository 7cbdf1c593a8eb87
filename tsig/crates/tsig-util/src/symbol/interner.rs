//! Global string interner, backed by `DashMap` for lock-free concurrent
//! access.
//!
//! # Performance
//!
//! - Interning a hit: O(1) hash lookup.
//! - Interning a miss: O(1) hash insert plus one allocation.
//! - Resolving a symbol back to a string: O(n) linear scan — rare in
//!   practice (diagnostics and debug output only), so we accept the
//!   trade-off for write-optimized concurrent inserts.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::{InternerStats, Symbol, KEYWORD_TEXT, RESERVED_SYMBOLS_END};

/// The process-global interner. Initialized on first use; all keywords are
/// pre-interned so they get stable, predictable indices.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_keywords();
    table
});

/// A thread-safe string interner.
///
/// Interned strings are leaked to obtain `'static` references. This is safe
/// because the table lives for the process's lifetime and strings are never
/// removed once interned.
pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
    collisions: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
            collisions: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn initialize_keywords(&self) {
        for &(text, symbol) in KEYWORD_TEXT {
            let interned: &'static str = Box::leak(text.to_string().into_boxed_str());
            let hash = Self::hash_string(text);
            self.map.insert(hash, (interned, symbol.index));
        }
    }

    /// Intern a string, returning its symbol. Thread-safe.
    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol { index: entry.value().1 };
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == string {
                    Symbol { index: entry.get().1 }
                } else {
                    self.handle_collision(string, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((interned, idx));
                Symbol { index: idx }
            }
        }
    }

    /// Linear-probe with a golden-ratio offset on hash collision.
    fn handle_collision(&self, string: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;

        for i in 1u64..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));

            if let Some(entry) = self.map.get(&probe_hash) {
                if entry.value().0 == string {
                    return Symbol { index: entry.value().1 };
                }
            } else {
                self.collisions.fetch_add(1, Ordering::Relaxed);
                let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                self.map.insert(probe_hash, (interned, idx));
                return Symbol { index: idx };
            }
        }

        self.collisions.fetch_add(1, Ordering::Relaxed);
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(original_hash, (interned, idx));
        Symbol { index: idx }
    }

    /// Resolve a symbol to its string. O(n) in the number of interned
    /// strings.
    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
    }

    #[inline]
    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats::new(
            self.map.len(),
            self.map.capacity(),
            self.collisions.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn intern_same_string_twice() {
        let s1 = STRING_TABLE.intern("a_unique_test_symbol");
        let s2 = STRING_TABLE.intern("a_unique_test_symbol");
        assert_eq!(s1, s2);
    }

    #[test]
    fn intern_distinct_strings() {
        let s1 = STRING_TABLE.intern("another_unique_symbol_x");
        let s2 = STRING_TABLE.intern("another_unique_symbol_y");
        assert_ne!(s1, s2);
    }

    #[test]
    fn get_resolves_back_to_string() {
        let sym = STRING_TABLE.intern("round_trip_symbol_test");
        assert_eq!(STRING_TABLE.get(sym), Some("round_trip_symbol_test"));
    }

    #[test]
    fn concurrent_intern_is_consistent() {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                thread::spawn(move || STRING_TABLE.intern(&format!("concurrent_sym_{i}")))
            })
            .collect();
        let symbols: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, sym) in symbols.iter().enumerate() {
            assert_eq!(sym.as_str(), format!("concurrent_sym_{i}"));
        }
    }
}
