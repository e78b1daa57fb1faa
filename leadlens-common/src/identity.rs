//! Seller identity unification
//!
//! Upstream name data spells the same seller several ways (middle names
//! included or dropped, missing accents). Aggregation groups by the
//! canonical spelling; the raw stored name is still shown verbatim on
//! per-record views.

use std::collections::HashMap;

/// Immutable alias lookup table. Names not in the table map to
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Build a table from alias → canonical pairs.
    ///
    /// Chains (an alias whose canonical form is itself an alias) are
    /// resolved at construction, so `canonicalize` is idempotent by
    /// construction.
    pub fn new(aliases: HashMap<String, String>) -> Self {
        let mut resolved = HashMap::with_capacity(aliases.len());
        for (alias, mut canonical) in aliases.clone() {
            // Bounded by table size; a cycle resolves to its last hop.
            for _ in 0..aliases.len() {
                match aliases.get(&canonical) {
                    Some(next) if *next != canonical => canonical = next.clone(),
                    _ => break,
                }
            }
            resolved.insert(alias, canonical);
        }
        Self { aliases: resolved }
    }

    /// Map a stored seller name to its canonical spelling.
    pub fn canonicalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }
}
