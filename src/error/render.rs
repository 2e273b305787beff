//! Diagnostic formatting for better error messages
//!
//! Renders [`Diagnostic`] records with source code context, a caret run
//! under the offending text, and the attached suggestion.

use colored::{ColoredString, Colorize};

use super::{Diagnostic, DiagnosticKind, Diagnostics, QuillError};

/// Lines of context shown on each side of the offending line
const CONTEXT_LINES: usize = 2;

/// Renders diagnostics against the source text they refer to
pub struct Renderer<'src> {
    lines: Vec<&'src str>,
}

impl<'src> Renderer<'src> {
    /// Create a renderer without source context
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a renderer with source code context
    pub fn with_source(source: &'src str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Format a single diagnostic with color and context
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let label = match diagnostic.kind {
            DiagnosticKind::Warning => "warning".yellow().bold(),
            DiagnosticKind::Semantic => "error".yellow().bold(),
            DiagnosticKind::Lexical | DiagnosticKind::Syntax => "error".red().bold(),
        };
        output.push_str(&format!("{}{} {}\n", label, ":".bold(), diagnostic.message));
        output.push_str(&format!("  {} {}\n", "-->".blue().bold(), diagnostic.location));

        output.push_str(&self.format_source_context(diagnostic));

        if !diagnostic.suggestion.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "help:".green().bold(),
                diagnostic.suggestion.green()
            ));
        }

        output
    }

    /// Format every record followed by a summary line when errors exist
    pub fn format_all(&self, diagnostics: &Diagnostics) -> String {
        let blocks: Vec<String> = diagnostics.iter().map(|d| self.format(d)).collect();
        let mut output = blocks.join("\n");

        let errors = diagnostics.error_count();
        if errors > 0 {
            let failure = QuillError::CompilationFailed {
                file: diagnostics.filename().unwrap_or("input").to_string(),
                errors,
            };
            output.push_str(&format!("\n{}: {}\n", "error".red().bold(), failure));
        }

        output
    }

    /// Format source code context around the diagnostic location
    fn format_source_context(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        let line = diagnostic.line();

        if line == 0 || line > self.lines.len() {
            return output;
        }

        let first = line.saturating_sub(CONTEXT_LINES).max(1);
        let last = (line + CONTEXT_LINES).min(self.lines.len());
        let width = last.to_string().len();
        let empty_gutter = format!("{} |", " ".repeat(width + 1)).blue();

        output.push_str(&format!("{}\n", empty_gutter));

        for number in first..=last {
            output.push_str(&format!("{}{}\n", gutter(number, width), self.lines[number - 1]));

            if number == line {
                // Tabs are echoed so the caret lines up however the terminal expands them
                let padding: String = self.lines[number - 1]
                    .chars()
                    .take(diagnostic.column().saturating_sub(1))
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                let span = diagnostic.end_column - diagnostic.column() + 1;
                output.push_str(&format!(
                    "{} {}{}\n",
                    empty_gutter,
                    padding,
                    "^".repeat(span).red().bold()
                ));
            }
        }

        output.push_str(&format!("{}\n", empty_gutter));
        output
    }
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn gutter(number: usize, width: usize) -> ColoredString {
    format!("{:<width$} | ", number, width = width + 1).blue()
}
