//! Abstract Syntax Tree definitions
//!
//! This module defines the AST node types for the Quill language. Every node
//! owns its children outright; the tree is built once by the parser and only
//! read afterwards.

use crate::error::SourceLocation;
use crate::lexer::TokenKind;

/// Root AST node representing a complete program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Scalar declaration: new x int = 42, or bl flag = true
    VarDecl {
        name: String,
        type_tag: TypeTag,
        value: Expr,
        location: SourceLocation,
    },

    /// Array declaration: new xs[] = [1, 2] or new xs{int}[10]
    ArrayDecl {
        name: String,
        init: ArrayInit,
        location: SourceLocation,
    },

    /// Output statement: stdout[Hello {name}]
    Stdout {
        content: StringInterpolation,
        location: SourceLocation,
    },
}

/// The two mutually exclusive forms of an array declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayInit {
    /// `[] = <array literal>`; element type is inferred during analysis
    Literal(Box<Expr>),
    /// `{type}[size]` with no initial values
    Sized { element_type: TypeTag, size: usize },
}

/// Text interleaved with `{identifier}` markers.
///
/// `parts` and `expressions` interleave by index: part 0, expression 0,
/// part 1, expression 1, and so on; either may run out first.
#[derive(Debug, Clone, PartialEq)]
pub struct StringInterpolation {
    pub parts: Vec<String>,
    pub expressions: Vec<Expr>,
    pub location: SourceLocation,
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal {
        value: Literal,
        location: SourceLocation,
    },

    /// Variable reference
    Identifier {
        name: String,
        location: SourceLocation,
    },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        location: SourceLocation,
    },

    /// Array literal: [a, b, c]
    Array {
        elements: Vec<Expr>,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Declared name, for declaration statements
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Stmt::VarDecl { name, .. } | Stmt::ArrayDecl { name, .. } => Some(name),
            Stmt::Stdout { .. } => None,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Subtract),
            TokenKind::Star => Some(Self::Multiply),
            TokenKind::Slash => Some(Self::Divide),
            TokenKind::Equal => Some(Self::Equal),
            TokenKind::NotEqual => Some(Self::NotEqual),
            TokenKind::Less => Some(Self::Less),
            TokenKind::LessEqual => Some(Self::LessEqual),
            TokenKind::Greater => Some(Self::Greater),
            TokenKind::GreaterEqual => Some(Self::GreaterEqual),
            _ => None,
        }
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            Self::Add => TokenKind::Plus,
            Self::Subtract => TokenKind::Minus,
            Self::Multiply => TokenKind::Star,
            Self::Divide => TokenKind::Slash,
            Self::Equal => TokenKind::Equal,
            Self::NotEqual => TokenKind::NotEqual,
            Self::Less => TokenKind::Less,
            Self::LessEqual => TokenKind::LessEqual,
            Self::Greater => TokenKind::Greater,
            Self::GreaterEqual => TokenKind::GreaterEqual,
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Subtract | Self::Multiply | Self::Divide)
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    /// Single precision, so the dump shows the value actually stored
    Float(f32),
    String(String),
    Boolean(bool),
}

/// Type annotation as written in source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Int,
    Float,
    Bool,
}

impl TypeTag {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::StringType => Some(Self::String),
            TokenKind::IntType => Some(Self::Int),
            TokenKind::FloatType => Some(Self::Float),
            TokenKind::BoolType => Some(Self::Bool),
            _ => None,
        }
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            Self::String => TokenKind::StringType,
            Self::Int => TokenKind::IntType,
            Self::Float => TokenKind::FloatType,
            Self::Bool => TokenKind::BoolType,
        }
    }
}
