//! Type system module
//!
//! This module defines the semantic value types expressions are inferred to.

pub mod type_def;

pub use type_def::ValueType;
