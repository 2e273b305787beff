//! Semantic analyzer implementation
//!
//! A single top-to-bottom pass over the program that builds the symbol
//! table and infers a [`ValueType`] for every expression. Once an error has
//! been reported for a subexpression its type becomes `Unknown`, and nothing
//! above it reports again.

use tracing::debug;

use super::symbols::{Symbol, SymbolTable};
use crate::error::suggest::did_you_mean;
use crate::error::{Diagnostics, SourceLocation};
use crate::parser::ast::{ArrayInit, BinaryOp, Expr, Literal, Program, Stmt, StringInterpolation};
use crate::types::ValueType;

/// Semantic analyzer
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    /// Analyze an entire program.
    ///
    /// Returns true iff no error-level diagnostic was recorded during this
    /// call and every statement checked out; warnings do not count.
    pub fn analyze(&mut self, program: &Program, diagnostics: &mut Diagnostics) -> bool {
        let errors_before = diagnostics.error_count();

        let mut all_ok = true;
        for stmt in &program.statements {
            all_ok &= self.check_stmt(stmt, diagnostics);
        }
        self.report_unused(diagnostics);

        let new_errors = diagnostics.error_count() - errors_before;
        debug!(symbols = self.symbols.len(), errors = new_errors, "semantic analysis finished");
        all_ok && new_errors == 0
    }

    // ===== Statements =====

    /// Returns false if the statement failed to check
    fn check_stmt(&mut self, stmt: &Stmt, diagnostics: &mut Diagnostics) -> bool {
        match stmt {
            Stmt::VarDecl {
                name,
                type_tag,
                value,
                location,
            } => {
                if self.symbols.contains(name) {
                    error(
                        diagnostics,
                        format!("Variable '{}' is already declared", name),
                        location,
                        "Use a different variable name or remove the duplicate declaration",
                    );
                    return false;
                }

                let value_type = self.check_expr(value, diagnostics);
                let declared = ValueType::from(*type_tag);
                if !value_type.is_unknown() && value_type != declared {
                    error(
                        diagnostics,
                        format!(
                            "Type mismatch: cannot assign {} to variable of type {}",
                            value_type, declared
                        ),
                        location,
                        "Change the variable type or provide a value of the correct type",
                    );
                    return false;
                }

                self.symbols
                    .declare(name, Symbol::variable(declared, location.clone()))
            }

            Stmt::ArrayDecl { name, init, location } => {
                if self.symbols.contains(name) {
                    error(
                        diagnostics,
                        format!("Array '{}' is already declared", name),
                        location,
                        "Use a different array name",
                    );
                    return false;
                }

                let element_type = match init {
                    ArrayInit::Sized { element_type, .. } => ValueType::from(*element_type),
                    ArrayInit::Literal(literal) => match literal.as_ref() {
                        // An empty literal leaves references typed as plain `Array`
                        Expr::Array { elements, location } => self
                            .check_array_elements(elements, location, diagnostics)
                            .unwrap_or(ValueType::Array),
                        other => {
                            if self.check_expr(other, diagnostics).is_unknown() {
                                return false;
                            }
                            error(
                                diagnostics,
                                "Array initializer must be an array literal",
                                location,
                                "Use [element1, element2, ...] syntax for array initialization",
                            );
                            return false;
                        }
                    },
                };

                self.symbols
                    .declare(name, Symbol::array(element_type, location.clone()))
            }

            Stmt::Stdout { content, .. } => !self.check_interpolation(content, diagnostics).is_unknown(),
        }
    }

    fn report_unused(&self, diagnostics: &mut Diagnostics) {
        for (name, symbol) in self.symbols.unused() {
            diagnostics.warning(
                format!("Unused variable '{}'", name),
                symbol.location.line,
                symbol.location.column,
                "Remove this variable or use it in your code",
            );
        }
    }

    // ===== Expressions =====

    fn check_expr(&mut self, expr: &Expr, diagnostics: &mut Diagnostics) -> ValueType {
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Integer(_) => ValueType::Int,
                Literal::Float(_) => ValueType::Float,
                Literal::String(_) => ValueType::String,
                Literal::Boolean(_) => ValueType::Bool,
            },

            Expr::Identifier { name, location } => match self.symbols.mark_used(name) {
                Some(value_type) => value_type,
                None => {
                    let suggestion = did_you_mean(name, self.symbols.names())
                        .unwrap_or_else(|| "Declare the variable before using it".to_string());
                    error(diagnostics, format!("Undefined variable '{}'", name), location, suggestion);
                    ValueType::Unknown
                }
            },

            Expr::Binary {
                left,
                operator,
                right,
                location,
            } => {
                let left_type = self.check_expr(left, diagnostics);
                let right_type = self.check_expr(right, diagnostics);
                if left_type.is_unknown() || right_type.is_unknown() {
                    return ValueType::Unknown;
                }

                if operator.is_arithmetic() {
                    check_arithmetic(*operator, left_type, right_type, location, diagnostics)
                } else {
                    check_comparison(left_type, right_type, location, diagnostics)
                }
            }

            Expr::Array { elements, location } => {
                match self.check_array_elements(elements, location, diagnostics) {
                    Some(ValueType::Unknown) => ValueType::Unknown,
                    _ => ValueType::Array,
                }
            }
        }
    }

    /// Element type of an array literal: `None` when empty, `Unknown` after
    /// an error has been reported
    fn check_array_elements(
        &mut self,
        elements: &[Expr],
        location: &SourceLocation,
        diagnostics: &mut Diagnostics,
    ) -> Option<ValueType> {
        let types: Vec<ValueType> = elements
            .iter()
            .map(|element| self.check_expr(element, diagnostics))
            .collect();

        let &first = types.first()?;
        if types.iter().any(|t| t.is_unknown()) {
            return Some(ValueType::Unknown);
        }
        if types.iter().any(|t| *t != first) {
            error(
                diagnostics,
                "Array elements must have the same type",
                location,
                format!("Ensure all array elements are of type {}", first),
            );
            return Some(ValueType::Unknown);
        }

        Some(first)
    }

    /// Every embedded expression is checked, even after one fails
    fn check_interpolation(&mut self, interp: &StringInterpolation, diagnostics: &mut Diagnostics) -> ValueType {
        let mut result = ValueType::String;
        for expr in &interp.expressions {
            if self.check_expr(expr, diagnostics).is_unknown() {
                result = ValueType::Unknown;
            }
        }
        result
    }
}

fn check_arithmetic(
    operator: BinaryOp,
    left: ValueType,
    right: ValueType,
    location: &SourceLocation,
    diagnostics: &mut Diagnostics,
) -> ValueType {
    let has_string = left == ValueType::String || right == ValueType::String;

    // String concatenation
    if operator == BinaryOp::Add && has_string {
        return ValueType::String;
    }
    if has_string {
        error(
            diagnostics,
            "Cannot perform arithmetic operations on strings",
            location,
            "Use string concatenation (+) or convert to numbers",
        );
        return ValueType::Unknown;
    }

    match (left, right) {
        (ValueType::Int, ValueType::Int) => ValueType::Int,
        (ValueType::Float, r) if r.is_numeric() => ValueType::Float,
        (l, ValueType::Float) if l.is_numeric() => ValueType::Float,
        _ => {
            error(
                diagnostics,
                format!("Type mismatch in arithmetic operation: {} and {}", left, right),
                location,
                "Ensure both operands are numbers",
            );
            ValueType::Unknown
        }
    }
}

fn check_comparison(
    left: ValueType,
    right: ValueType,
    location: &SourceLocation,
    diagnostics: &mut Diagnostics,
) -> ValueType {
    if left == right || (left.is_numeric() && right.is_numeric()) {
        return ValueType::Bool;
    }

    error(
        diagnostics,
        format!("Cannot compare {} with {}", left, right),
        location,
        "Ensure both operands are of compatible types",
    );
    ValueType::Unknown
}

fn error(
    diagnostics: &mut Diagnostics,
    message: impl Into<String>,
    location: &SourceLocation,
    suggestion: impl Into<String>,
) {
    diagnostics.semantic(message, location.line, location.column, suggestion);
}
