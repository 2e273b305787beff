//! Parser implementation
//!
//! This module implements the recursive-descent parser for the Quill
//! language. Each grammar violation is reported once to the diagnostics
//! sink and aborts the statement being parsed; the program loop then skips
//! a single token and tries again.

use tracing::{debug, trace};

use super::ast::*;
use crate::error::suggest::syntax_hint;
use crate::error::{Diagnostics, SourceLocation};
use crate::lexer::{Token, TokenCursor, TokenKind};

/// A syntax error has been recorded; unwind to the statement loop.
#[derive(Debug)]
struct Abort;

type ParseResult<T> = Result<T, Abort>;

/// Parse a token sequence into a program, reporting syntax errors into `diagnostics`
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics) -> Program {
    Parser::new(tokens, diagnostics).parse_program()
}

/// Parser for Quill source code
pub struct Parser<'t, 'd> {
    cursor: TokenCursor<'t>,
    diagnostics: &'d mut Diagnostics,
}

impl<'t, 'd> Parser<'t, 'd> {
    /// Create a new parser from tokens
    pub fn new(tokens: &'t [Token], diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            diagnostics,
        }
    }

    /// Parse every statement up to end of input
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cursor.is_at_end() {
            match self.statement() {
                Some(stmt) => statements.push(stmt),
                None => {
                    trace!(
                        position = self.cursor.position(),
                        "skipping one token after failed statement"
                    );
                    self.cursor.advance();
                }
            }
        }

        debug!(statements = statements.len(), "parsed program");
        Program {
            statements,
            location: SourceLocation::at(1, 1),
        }
    }

    // ===== Statements =====

    fn statement(&mut self) -> Option<Stmt> {
        while self.cursor.consume(TokenKind::Comment) {}

        let token = self.cursor.current()?;
        let result = match token.kind {
            // Only comments were left
            TokenKind::Eof => return None,
            TokenKind::New => {
                if self.is_array_declaration() {
                    self.array_declaration()
                } else {
                    self.var_declaration()
                }
            }
            TokenKind::Bl => self.bool_declaration(),
            TokenKind::Stdout => self.stdout_statement(),
            _ => Err(self.error("Unexpected token at start of statement")),
        };

        result.ok()
    }

    /// Probe on a copy of the cursor: `new IDENT` followed by `[` or `{`
    fn is_array_declaration(&self) -> bool {
        let mut probe = self.cursor;
        probe.advance();
        if !probe.consume(TokenKind::Identifier) {
            return false;
        }
        probe.matches(TokenKind::ArrayOpen) || probe.matches(TokenKind::TypeOpen)
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let location = self.current_location();
        self.expect(TokenKind::New, "Expected 'new' keyword")?;
        let name = self.expect_identifier("Expected variable name after 'new'")?;
        let type_tag = self.expect_type("Expected type (string, int, float, bool) after variable name")?;
        self.expect(TokenKind::Assign, "Expected '=' after variable type")?;
        let value = self.expression()?;

        Ok(Stmt::VarDecl {
            name,
            type_tag,
            value,
            location,
        })
    }

    fn bool_declaration(&mut self) -> ParseResult<Stmt> {
        let location = self.current_location();
        self.expect(TokenKind::Bl, "Expected 'bl' keyword")?;
        let name = self.expect_identifier("Expected variable name after 'bl'")?;
        self.expect(TokenKind::Assign, "Expected '=' after variable name")?;
        let value = self.expression()?;

        Ok(Stmt::VarDecl {
            name,
            type_tag: TypeTag::Bool,
            value,
            location,
        })
    }

    fn array_declaration(&mut self) -> ParseResult<Stmt> {
        let location = self.current_location();
        self.expect(TokenKind::New, "Expected 'new' keyword")?;
        let name = self.expect_identifier("Expected variable name after 'new'")?;

        let init = if self.cursor.consume(TokenKind::ArrayOpen) {
            // new xs[] = [...]
            self.expect(TokenKind::ArrayClose, "Expected ']' after '['")?;
            self.expect(TokenKind::Assign, "Expected '=' after array declaration")?;
            if !self.cursor.matches(TokenKind::ArrayOpen) {
                return Err(self.error("Expected array literal after '='"));
            }
            ArrayInit::Literal(Box::new(self.array_literal()?))
        } else if self.cursor.consume(TokenKind::TypeOpen) {
            // new xs{int}[10]
            let element_type = self.expect_type("Expected type inside {}")?;
            self.expect(TokenKind::TypeClose, "Expected '}' after type")?;
            self.expect(TokenKind::ArrayOpen, "Expected '[' after type specification")?;
            let size = self.array_size()?;
            self.expect(TokenKind::ArrayClose, "Expected ']' after array size")?;
            ArrayInit::Sized { element_type, size }
        } else {
            return Err(self.error("Expected array syntax after variable name"));
        };

        Ok(Stmt::ArrayDecl {
            name,
            init,
            location,
        })
    }

    fn array_size(&mut self) -> ParseResult<usize> {
        let token = match self.cursor.current() {
            Some(token) if token.kind == TokenKind::IntLiteral => token,
            _ => return Err(self.error("Expected array size")),
        };
        let size = token
            .lexeme
            .parse::<usize>()
            .map_err(|_| self.error("Array size is out of range"))?;
        self.cursor.advance();
        Ok(size)
    }

    fn stdout_statement(&mut self) -> ParseResult<Stmt> {
        let location = self.current_location();
        self.expect(TokenKind::Stdout, "Expected 'stdout' keyword")?;
        self.expect(TokenKind::ArrayOpen, "Expected '[' after 'stdout'")?;
        let content = self.string_interpolation()?;
        self.expect(TokenKind::ArrayClose, "Expected ']' after stdout content")?;

        Ok(Stmt::Stdout { content, location })
    }

    /// Text tokens up to the closing `]`, with `{name}` markers pulled out
    fn string_interpolation(&mut self) -> ParseResult<StringInterpolation> {
        let location = self.current_location();
        let mut parts = Vec::new();
        let mut expressions = Vec::new();
        let mut text = String::new();

        while let Some(token) = self.cursor.current() {
            match token.kind {
                TokenKind::ArrayClose | TokenKind::Eof => break,
                TokenKind::TypeOpen => {
                    if !text.is_empty() {
                        parts.push(std::mem::take(&mut text));
                    }
                    self.cursor.advance();

                    let name_location = self.current_location();
                    let name = self.expect_identifier("Expected variable name inside {}")?;
                    expressions.push(Expr::Identifier {
                        name,
                        location: name_location,
                    });
                    self.expect(TokenKind::TypeClose, "Expected '}' after variable name")?;
                }
                _ => {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(&token.lexeme);
                    self.cursor.advance();
                }
            }
        }

        if !text.is_empty() {
            parts.push(text);
        }

        Ok(StringInterpolation {
            parts,
            expressions,
            location,
        })
    }

    // ===== Expressions =====

    /// One operand, then optionally an operator and another full expression.
    /// Chains are right-associative and all operators bind equally.
    fn expression(&mut self) -> ParseResult<Expr> {
        let left = self.primary()?;

        let Some(token) = self.cursor.current() else {
            return Ok(left);
        };
        let Some(operator) = BinaryOp::from_token(token.kind) else {
            return Ok(left);
        };
        self.cursor.advance();
        let right = self.expression()?;

        Ok(Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location: token.location.clone(),
        })
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.cursor.current() else {
            return Err(self.error("Expected expression"));
        };
        let location = token.location.clone();

        let value = match token.kind {
            TokenKind::IntLiteral => {
                let n = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| self.error("Integer literal is out of range"))?;
                Literal::Integer(n)
            }
            TokenKind::FloatLiteral => {
                match token.lexeme.parse::<f32>() {
                    Ok(f) if f.is_finite() => Literal::Float(f),
                    _ => return Err(self.error("Float literal is out of range")),
                }
            }
            TokenKind::StringLiteral => Literal::String(token.lexeme.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),

            TokenKind::Identifier => {
                self.cursor.advance();
                return Ok(Expr::Identifier {
                    name: token.lexeme.clone(),
                    location,
                });
            }

            // Parenthesized expression
            TokenKind::LeftParen => {
                self.cursor.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                return Ok(expr);
            }

            TokenKind::ArrayOpen => return self.array_literal(),

            _ => return Err(self.error("Expected expression")),
        };

        self.cursor.advance();
        Ok(Expr::Literal { value, location })
    }

    /// `[` (expr (`,` expr)*)? `]`
    fn array_literal(&mut self) -> ParseResult<Expr> {
        let location = self.current_location();
        self.expect(TokenKind::ArrayOpen, "Expected '[' for array literal")?;

        let mut elements = Vec::new();
        if !self.cursor.matches(TokenKind::ArrayClose) {
            loop {
                elements.push(self.expression()?);
                if !self.cursor.consume(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::ArrayClose, "Expected ']' after array elements")?;
        Ok(Expr::Array { elements, location })
    }

    // ===== Helper Methods =====

    fn current_location(&self) -> SourceLocation {
        self.cursor
            .current_or_last()
            .map(|t| t.location.clone())
            .unwrap_or_else(|| SourceLocation::at(1, 1))
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'t Token> {
        match self.cursor.current() {
            Some(token) if token.kind == kind => {
                self.cursor.advance();
                Ok(token)
            }
            _ => Err(self.error(message)),
        }
    }

    fn expect_identifier(&mut self, message: &str) -> ParseResult<String> {
        self.expect(TokenKind::Identifier, message)
            .map(|token| token.lexeme.clone())
    }

    fn expect_type(&mut self, message: &str) -> ParseResult<TypeTag> {
        match self.cursor.current().and_then(|t| TypeTag::from_token(t.kind)) {
            Some(tag) => {
                self.cursor.advance();
                Ok(tag)
            }
            None => Err(self.error(message)),
        }
    }

    /// Record a syntax error at the current token
    fn error(&mut self, message: &str) -> Abort {
        let hint = syntax_hint(message);
        match self.cursor.current_or_last() {
            Some(token) => self.diagnostics.syntax(
                format!("{}, found {}", message, describe(token)),
                token.line(),
                token.column(),
                token.end_column,
                hint,
            ),
            None => self.diagnostics.syntax(message, 1, 1, 1, hint),
        }
        Abort
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::StringLiteral => format!("\"{}\"", token.lexeme),
        _ => format!("'{}'", token.lexeme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> (Program, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        (program, diagnostics)
    }

    fn parse_ok(source: &str) -> Program {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
        program
    }

    fn syntax_messages(diagnostics: &Diagnostics) -> Vec<String> {
        diagnostics
            .of_kind(DiagnosticKind::Syntax)
            .map(|d| d.message.clone())
            .collect()
    }

    fn int(n: i64, line: usize, column: usize) -> Expr {
        Expr::Literal {
            value: Literal::Integer(n),
            location: SourceLocation::at(line, column),
        }
    }

    #[test]
    fn test_var_declaration() {
        let program = parse_ok("new x int = 42");
        assert_eq!(
            program.statements,
            vec![Stmt::VarDecl {
                name: "x".to_string(),
                type_tag: TypeTag::Int,
                value: int(42, 1, 13),
                location: SourceLocation::at(1, 1),
            }]
        );
    }

    #[test]
    fn test_bool_declaration_is_typed_bool() {
        let program = parse_ok("bl ready = False");
        match &program.statements[0] {
            Stmt::VarDecl { name, type_tag, value, .. } => {
                assert_eq!(name, "ready");
                assert_eq!(*type_tag, TypeTag::Bool);
                assert!(matches!(
                    value,
                    Expr::Literal {
                        value: Literal::Boolean(false),
                        ..
                    }
                ));
            }
            other => panic!("expected VarDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_initialized_array_declaration() {
        let program = parse_ok("new xs[] = [1, 2, 3]");
        match &program.statements[0] {
            Stmt::ArrayDecl {
                name,
                init: ArrayInit::Literal(literal),
                ..
            } => {
                assert_eq!(name, "xs");
                match literal.as_ref() {
                    Expr::Array { elements, .. } => assert_eq!(elements.len(), 3),
                    other => panic!("expected array literal, got {:?}", other),
                }
            }
            other => panic!("expected ArrayDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_sized_array_declaration() {
        let program = parse_ok("new buf{float}[16]");
        assert_eq!(
            program.statements,
            vec![Stmt::ArrayDecl {
                name: "buf".to_string(),
                init: ArrayInit::Sized {
                    element_type: TypeTag::Float,
                    size: 16,
                },
                location: SourceLocation::at(1, 1),
            }]
        );
    }

    #[test]
    fn test_empty_array_literal() {
        let program = parse_ok("new xs[] = []");
        assert!(matches!(
            &program.statements[0],
            Stmt::ArrayDecl { init: ArrayInit::Literal(lit), .. }
                if matches!(lit.as_ref(), Expr::Array { elements, .. } if elements.is_empty())
        ));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let (_, diagnostics) = parse_source("new xs[] = [1, 2,]");
        let messages = syntax_messages(&diagnostics);
        assert!(messages[0].starts_with("Expected expression, found ']'"));
    }

    #[test]
    fn test_stdout_interpolation() {
        let program = parse_ok("stdout[Hello there {name} and {other} bye]");
        match &program.statements[0] {
            Stmt::Stdout { content, .. } => {
                assert_eq!(content.parts, vec!["Hello there", "and", "bye"]);
                let names: Vec<&str> = content
                    .expressions
                    .iter()
                    .map(|e| match e {
                        Expr::Identifier { name, .. } => name.as_str(),
                        other => panic!("expected identifier, got {:?}", other),
                    })
                    .collect();
                assert_eq!(names, vec!["name", "other"]);
            }
            other => panic!("expected Stdout, got {:?}", other),
        }
    }

    #[test]
    fn test_stdout_starting_with_marker() {
        let program = parse_ok("stdout[{a}{b} tail]");
        match &program.statements[0] {
            Stmt::Stdout { content, .. } => {
                assert_eq!(content.parts, vec!["tail"]);
                assert_eq!(content.expressions.len(), 2);
            }
            other => panic!("expected Stdout, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_right_associative_chain() {
        // 1 * 2 + 3 parses as 1 * (2 + 3)
        let program = parse_ok("new x int = 1 * 2 + 3");
        let Stmt::VarDecl { value, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        assert_eq!(
            *value,
            Expr::Binary {
                left: Box::new(int(1, 1, 13)),
                operator: BinaryOp::Multiply,
                right: Box::new(Expr::Binary {
                    left: Box::new(int(2, 1, 17)),
                    operator: BinaryOp::Add,
                    right: Box::new(int(3, 1, 21)),
                    location: SourceLocation::at(1, 19),
                }),
                location: SourceLocation::at(1, 15),
            }
        );
    }

    #[test]
    fn test_parentheses_group_left_operand() {
        let program = parse_ok("new x int = (1 + 2) * 3");
        let Stmt::VarDecl { value, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        match value {
            Expr::Binary { left, operator, .. } => {
                assert_eq!(*operator, BinaryOp::Multiply);
                assert!(matches!(
                    left.as_ref(),
                    Expr::Binary {
                        operator: BinaryOp::Add,
                        ..
                    }
                ));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_assign() {
        let (program, diagnostics) = parse_source("new x int 5");
        assert!(program.statements.is_empty());

        let diag = diagnostics.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::Syntax);
        assert_eq!(diag.message, "Expected '=' after variable type, found '5'");
        assert_eq!(diag.suggestion, "Add '=' followed by a value");
        assert_eq!((diag.line(), diag.column(), diag.end_column), (1, 11, 11));
    }

    #[test]
    fn test_error_spans_lexeme() {
        let (_, diagnostics) = parse_source("new x strin = 5");
        let diag = diagnostics.iter().next().unwrap();
        assert!(diag.message.starts_with("Expected type"));
        assert_eq!((diag.column(), diag.end_column), (7, 11));
    }

    #[test]
    fn test_error_spans_quoted_string() {
        let (_, diagnostics) = parse_source("new x int \"abc\"");
        let diag = diagnostics.iter().next().unwrap();
        assert_eq!(diag.message, "Expected '=' after variable type, found \"abc\"");
        assert_eq!((diag.column(), diag.end_column), (11, 15));
    }

    #[test]
    fn test_recovery_skips_one_token_and_continues() {
        let (program, diagnostics) = parse_source("new x int 5 new y int = 2");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0].declared_name(), Some("y"));
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_unexpected_token_at_statement_start() {
        let (program, diagnostics) = parse_source("42 new y int = 2");
        assert_eq!(program.statements.len(), 1);
        let messages = syntax_messages(&diagnostics);
        assert_eq!(messages, vec!["Unexpected token at start of statement, found '42'"]);
    }

    #[test]
    fn test_comments_between_statements() {
        let program = parse_ok("// header\nnew a int = 1 ;; trailing\n; block ; new b int = 2\n; unclosed");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_missing_closing_bracket_reports_end_of_input() {
        let (_, diagnostics) = parse_source("stdout[Hello {name}");
        let messages = syntax_messages(&diagnostics);
        assert_eq!(messages, vec!["Expected ']' after stdout content, found end of input"]);
    }

    #[test]
    fn test_interpolation_requires_identifier() {
        let (_, diagnostics) = parse_source("stdout[Hi {42}]");
        let messages = syntax_messages(&diagnostics);
        assert!(messages[0].starts_with("Expected variable name inside {}"));
    }

    #[test]
    fn test_sized_array_requires_type() {
        let (_, diagnostics) = parse_source("new xs{char}[3]");
        let first = diagnostics.iter().next().unwrap();
        assert!(first.message.starts_with("Expected type inside {}, found 'char'"));
    }

    #[test]
    fn test_array_initializer_must_be_literal() {
        let (_, diagnostics) = parse_source("new xs[] = 5");
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.message, "Expected array literal after '=', found '5'");
    }

    #[test]
    fn test_integer_out_of_range() {
        let (_, diagnostics) = parse_source("new x int = 99999999999999999999");
        let first = diagnostics.iter().next().unwrap();
        assert!(first.message.starts_with("Integer literal is out of range"));
        assert_eq!(first.suggestion, "Use a smaller number");
    }

    #[test]
    fn test_float_out_of_single_precision_range() {
        let source = format!("new f float = {}.0", "9".repeat(40));
        let (_, diagnostics) = parse_source(&source);
        let first = diagnostics.iter().next().unwrap();
        assert!(first.message.starts_with("Float literal is out of range"));
    }

    #[test]
    fn test_empty_input() {
        let program = parse_ok("");
        assert!(program.statements.is_empty());
        assert_eq!(program.location, SourceLocation::at(1, 1));
    }

    #[test]
    fn test_recovery_terminates_on_garbage() {
        let (program, diagnostics) = parse_source("= = ] } ) , new");
        assert!(program.statements.is_empty());
        assert!(diagnostics.error_count() >= 6);
    }
}
