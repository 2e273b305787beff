//! Type definitions
//!
//! This module defines the semantic type domain for Quill. It is separate
//! from [`TypeTag`], which only records what was written in source.

use std::fmt;

use crate::parser::TypeTag;

/// Inferred type of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Array,
    /// Could not be determined because of an earlier error.
    /// Never reported to the user as a mismatch.
    Unknown,
}

impl ValueType {
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Array => "array",
            Self::Unknown => "unknown",
        }
    }
}

impl From<TypeTag> for ValueType {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::String => Self::String,
            TypeTag::Int => Self::Int,
            TypeTag::Float => Self::Float,
            TypeTag::Bool => Self::Bool,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
