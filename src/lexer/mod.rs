//! Lexical analysis module
//!
//! This module handles tokenization of Quill source code and the cursor the
//! parser walks the tokens with.

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::TokenCursor;
pub use scanner::{tokenize, Lexer};
pub use token::{token_stream, Token, TokenKind};
