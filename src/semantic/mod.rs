//! Semantic analysis module
//!
//! This module handles semantic validation of the AST: name resolution,
//! type inference and unused-variable warnings.

pub mod analyzer;
pub mod symbols;

pub use analyzer::SemanticAnalyzer;
pub use symbols::{Symbol, SymbolTable};
