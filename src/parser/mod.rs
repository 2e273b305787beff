//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST)
//! and dumping that tree back out as text.

pub mod ast;
pub mod parser;
pub mod printer;

pub use ast::{ArrayInit, BinaryOp, Expr, Literal, Program, Stmt, StringInterpolation, TypeTag};
pub use parser::{parse, Parser};
pub use printer::ast_dump;
