//! # Quill Language Front End
//!
//! Turns Quill source text into a validated abstract syntax tree:
//! - Declarations with explicit types (`new x int = 5`, `bl flag = true`)
//! - Arrays, either from a literal or with a fixed element type and size
//! - Output statements with `{name}` interpolation
//!
//! ## Architecture
//!
//! The front end is organized into several modules:
//! - `lexer`: Tokenization of source code and the token cursor
//! - `parser`: Parsing tokens into an Abstract Syntax Tree (AST)
//! - `types`: Semantic value types
//! - `semantic`: Symbol table and type checking
//! - `error`: Diagnostics, suggestions and rendering
//!
//! Every stage appends to a [`Diagnostics`] sink instead of failing; the
//! caller decides what to do with the result.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod types;

use tracing::debug;

// Re-export commonly used types
pub use error::{
    Diagnostic, DiagnosticKind, Diagnostics, QuillError, QuillResult, Renderer, SourceLocation,
};
pub use lexer::{token_stream, tokenize, Lexer, Token, TokenCursor, TokenKind};
pub use parser::{ast_dump, parse, Parser, Program};
pub use semantic::{SemanticAnalyzer, Symbol, SymbolTable};
pub use types::ValueType;

/// Version of the Quill front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for a single compilation
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Label stamped on every diagnostic
    pub filename: Option<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Everything produced by one run of the pipeline
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    /// Empty when analysis was skipped because of earlier errors
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    /// No error-level diagnostics were recorded; warnings are allowed
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn token_stream(&self) -> String {
        token_stream(&self.tokens)
    }

    pub fn ast_dump(&self) -> String {
        ast_dump(&self.program)
    }
}

/// Run the full front end over `source`
///
/// Semantic analysis only runs when tokenizing and parsing were clean, so a
/// statement dropped by syntax recovery does not resurface as a string of
/// undefined-variable errors.
pub fn compile(source: &str, options: &CompileOptions) -> Compilation {
    let mut diagnostics = match &options.filename {
        Some(filename) => Diagnostics::for_file(filename.clone()),
        None => Diagnostics::new(),
    };

    // Phase 1: Lexical Analysis
    let tokens = tokenize(source, &mut diagnostics);

    // Phase 2: Parsing
    let program = parse(&tokens, &mut diagnostics);

    // Phase 3: Semantic Analysis
    let symbols = if diagnostics.has_errors() {
        debug!(errors = diagnostics.error_count(), "skipping semantic analysis");
        SymbolTable::new()
    } else {
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&program, &mut diagnostics);
        analyzer.into_symbols()
    };

    debug!(
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "compilation finished"
    );

    Compilation {
        tokens,
        program,
        symbols,
        diagnostics,
    }
}
