//! Diagnostic records and the sink they are collected into
//!
//! Every compilation unit owns one [`Diagnostics`] value. The tokenizer,
//! parser and analyzer only ever append to it; records keep insertion
//! order and are never re-sorted.

use std::fmt;

use super::SourceLocation;

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
    Warning,
}

impl DiagnosticKind {
    /// Whether this kind fails a compilation
    pub fn is_error(self) -> bool {
        !matches!(self, Self::Warning)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical error",
            Self::Syntax => "syntax error",
            Self::Semantic => "semantic error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: SourceLocation,
    /// Last highlighted column; equal to `location.column` when the
    /// diagnostic does not cover a range.
    pub end_column: usize,
    /// Possibly empty hint on how to fix the problem
    pub suggestion: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, location: SourceLocation) -> Self {
        let end_column = location.column;
        Self {
            kind,
            message: message.into(),
            location,
            end_column,
            suggestion: String::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    /// Extend the highlighted range; values before the start column are ignored.
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

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.message, self.location)
    }
}

/// Ordered collection of diagnostics for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    filename: Option<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that labels every record with `filename`
    pub fn for_file(filename: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            filename: Some(filename.into()),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Append a record, stamping the sink's file label if the record has none
    pub fn push(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.location.filename.is_none() {
            diagnostic.location.filename = self.filename.clone();
        }
        tracing::trace!(
            kind = %diagnostic.kind,
            message = %diagnostic.message,
            "diagnostic recorded"
        );
        self.items.push(diagnostic);
    }

    fn record(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
        suggestion: impl Into<String>,
    ) {
        let diagnostic = Diagnostic::new(kind, message, SourceLocation::at(line, column));
        self.push(diagnostic.with_suggestion(suggestion));
    }

    pub fn lexical(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        suggestion: impl Into<String>,
    ) {
        self.record(DiagnosticKind::Lexical, message, line, column, suggestion);
    }

    pub fn syntax(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        end_column: usize,
        suggestion: impl Into<String>,
    ) {
        self.push(
            Diagnostic::new(DiagnosticKind::Syntax, message, SourceLocation::at(line, column))
                .with_end_column(end_column)
                .with_suggestion(suggestion),
        );
    }

    pub fn semantic(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        suggestion: impl Into<String>,
    ) {
        self.record(DiagnosticKind::Semantic, message, line, column, suggestion);
    }

    pub fn warning(
        &mut self,
        message: impl Into<String>,
        line: usize,
        column: usize,
        suggestion: impl Into<String>,
    ) {
        self.record(DiagnosticKind::Warning, message, line, column, suggestion);
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Records of one kind, in insertion order
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all records; the file label is kept
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
