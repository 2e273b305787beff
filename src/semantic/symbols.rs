//! Symbol table
//!
//! A single flat namespace. Entries are never removed during a pass and keep
//! declaration order, which is the order unused-variable warnings come out in.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::SourceLocation;
use crate::types::ValueType;

/// A declared variable or array
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Declared type; for arrays, the element type, or `Array` when an
    /// empty literal left nothing to infer
    pub value_type: ValueType,
    pub is_array: bool,
    pub location: SourceLocation,
    /// Set on the first read reference
    pub used: bool,
}

impl Symbol {
    pub fn variable(value_type: ValueType, location: SourceLocation) -> Self {
        Self {
            value_type,
            is_array: false,
            location,
            used: false,
        }
    }

    pub fn array(element_type: ValueType, location: SourceLocation) -> Self {
        Self {
            value_type: element_type,
            is_array: true,
            location,
            used: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new symbol. Returns false, leaving the table untouched, if
    /// the name is already taken.
    pub fn declare(&mut self, name: &str, symbol: Symbol) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        trace!(name, value_type = %symbol.value_type, is_array = symbol.is_array, "declared symbol");
        self.symbols.insert(name.to_string(), symbol);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Record a read reference and return the symbol's type
    pub fn mark_used(&mut self, name: &str) -> Option<ValueType> {
        self.symbols.get_mut(name).map(|symbol| {
            symbol.used = true;
            symbol.value_type
        })
    }

    /// Symbols never referenced, in declaration order
    pub fn unused(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.iter().filter(|(_, symbol)| !symbol.used)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
