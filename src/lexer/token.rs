//! Token definitions for the Quill language
//!
//! This module defines all token kinds used in lexical analysis and the
//! one-line-per-token debug format.

use crate::error::SourceLocation;
use std::fmt;

/// A token in the Quill language
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
    /// Column of the last source character on the token's first line. For
    /// string literals this covers the quotes and escapes the lexeme drops.
    pub end_column: usize,
}

impl Token {
    /// Create a new token whose source text is exactly its lexeme
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        let lexeme = lexeme.into();
        let end_column = location.column + lexeme.chars().count().max(1) - 1;
        Self {
            kind,
            lexeme,
            location,
            end_column,
        }
    }

    pub fn with_end_column(mut self, end_column: usize) -> Self {
        self.end_column = end_column.max(self.location.column);
        self
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// Token kinds in the Quill language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Assignment and comparison
    Assign,       // =
    Equal,        // ==
    NotEqual,     // !=
    Greater,      // >
    Less,         // <
    GreaterEqual, // >=
    LessEqual,    // <=

    // Type keywords
    StringType, // string
    IntType,    // int
    FloatType,  // float
    BoolType,   // bool
    CharType,   // char

    // Keywords
    New,    // new
    Bl,     // bl
    Stdout, // stdout
    True,   // true | True
    False,  // false | False

    // Identifiers and literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    // Array syntax and interpolation/type annotation
    ArrayOpen,  // [
    ArrayClose, // ]
    TypeOpen,   // {
    TypeClose,  // }

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Dot,        // .
    Colon,      // :

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    Comment,
    Eof,
    Unknown,
}

impl TokenKind {
    /// Get keyword from string
    pub fn keyword(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "bl" => Some(Self::Bl),
            "stdout" => Some(Self::Stdout),
            "string" => Some(Self::StringType),
            "int" => Some(Self::IntType),
            "float" => Some(Self::FloatType),
            "bool" => Some(Self::BoolType),
            "char" => Some(Self::CharType),
            "true" | "True" => Some(Self::True),
            "false" | "False" => Some(Self::False),
            _ => None,
        }
    }

    /// Name used by the debug token stream and the AST dump
    pub fn name(self) -> &'static str {
        match self {
            Self::Assign => "ASSIGNMENT",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Greater => "GREATER",
            Self::Less => "LESSER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::LessEqual => "LESSER_EQUAL",
            Self::StringType => "STRING",
            Self::IntType => "INTEGER",
            Self::FloatType => "FLOAT",
            Self::BoolType => "BOOL",
            Self::CharType => "CHARACTER",
            Self::New => "NEW",
            Self::Bl => "BL",
            Self::Stdout => "STDOUT",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Identifier => "IDENTIFIER",
            Self::IntLiteral => "INT_LIT",
            Self::FloatLiteral => "FLOAT_LIT",
            Self::StringLiteral => "STRING_LIT",
            Self::ArrayOpen => "ARRAY_OPEN",
            Self::ArrayClose => "ARRAY_CLOSE",
            Self::TypeOpen => "TYPE_OPEN",
            Self::TypeClose => "TYPE_CLOSE",
            Self::LeftParen => "LPAREN",
            Self::RightParen => "RPAREN",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Colon => "COLON",
            Self::Plus => "ADD",
            Self::Minus => "SUB",
            Self::Star => "MUL",
            Self::Slash => "DIV",
            Self::Percent => "MOD",
            Self::Comment => "COMMENT",
            Self::Eof => "END_OF_FILE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Debug token stream: one `"<KIND> <lexeme>"` line per token, comments skipped
pub fn token_stream(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .map(|t| format!("{} {}\n", t.kind.name(), t.lexeme))
        .collect()
}
