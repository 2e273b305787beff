//! Error handling and diagnostics for the Quill language
//!
//! Problems in the program being compiled are never Rust errors: the
//! tokenizer, parser and analyzer append [`Diagnostic`] records to a
//! caller-owned [`Diagnostics`] sink and keep going. [`QuillError`] is
//! reserved for failures of the driver itself (I/O, a failed compile).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub mod diagnostic;
pub mod render;
pub mod suggest;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use render::Renderer;

/// Result type alias for driver operations
pub type QuillResult<T> = Result<T, QuillError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Failures of the compiler driver, as opposed to diagnostics about the
/// program being compiled.
#[derive(Debug, Error)]
pub enum QuillError {
    #[error("Failed to read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not compile `{file}` due to {errors} previous error{}", plural(.errors))]
    CompilationFailed { file: String, errors: usize },
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}
