//! Indented text dump of a parsed program
//!
//! One node per line, two spaces per nesting level. Interpolation text parts
//! and expressions are printed interleaved, in the order they appear in the
//! source.

use std::fmt::Write;

use super::ast::*;

/// Render `program` as an indented tree
pub fn ast_dump(program: &Program) -> String {
    let mut printer = AstPrinter::default();
    printer.program(program);
    printer.out
}

#[derive(Default)]
struct AstPrinter {
    out: String,
    depth: usize,
}

impl AstPrinter {
    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        // Writing into a String cannot fail
        let _ = self.out.write_fmt(text);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn program(&mut self, program: &Program) {
        self.line(format_args!("PROGRAM ({} statements)", program.statements.len()));
        self.nested(|p| {
            for stmt in &program.statements {
                p.stmt(stmt);
            }
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                name,
                type_tag,
                value,
                ..
            } => {
                self.line(format_args!("VAR_DECL '{}' type={}", name, type_tag.token_kind().name()));
                self.nested(|p| p.expr(value));
            }

            Stmt::ArrayDecl { name, init, .. } => match init {
                ArrayInit::Literal(literal) => {
                    self.line(format_args!("ARRAY_DECL '{}'", name));
                    self.nested(|p| p.expr(literal));
                }
                ArrayInit::Sized { element_type, size } => {
                    self.line(format_args!(
                        "ARRAY_DECL '{}' type={} size={}",
                        name,
                        element_type.token_kind().name(),
                        size
                    ));
                }
            },

            Stmt::Stdout { content, .. } => {
                self.line(format_args!("STDOUT"));
                self.nested(|p| p.interpolation(content));
            }
        }
    }

    fn interpolation(&mut self, interp: &StringInterpolation) {
        self.line(format_args!(
            "STRING_INTERP [{} parts, {} expressions]",
            interp.parts.len(),
            interp.expressions.len()
        ));

        let count = interp.parts.len().max(interp.expressions.len());
        self.nested(|p| {
            for i in 0..count {
                if let Some(part) = interp.parts.get(i) {
                    p.line(format_args!("TEXT_PART \"{}\"", part));
                }
                if let Some(expr) = interp.expressions.get(i) {
                    p.expr(expr);
                }
            }
        });
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { value, .. } => match value {
                Literal::Integer(n) => self.line(format_args!("INT_LITERAL {}", n)),
                Literal::Float(f) => self.line(format_args!("FLOAT_LITERAL {:.6}", f)),
                Literal::String(s) => self.line(format_args!("STRING_LITERAL \"{}\"", s)),
                Literal::Boolean(b) => self.line(format_args!("BOOL_LITERAL {}", b)),
            },

            Expr::Identifier { name, .. } => self.line(format_args!("IDENTIFIER '{}'", name)),

            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => {
                self.line(format_args!("BINARY_OP {}", operator.token_kind().name()));
                self.nested(|p| {
                    p.expr(left);
                    p.expr(right);
                });
            }

            Expr::Array { elements, .. } => {
                self.line(format_args!("ARRAY_LITERAL [{} elements]", elements.len()));
                self.nested(|p| {
                    for element in elements {
                        p.expr(element);
                    }
                });
            }
        }
    }
}
