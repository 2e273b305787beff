//! Lexer/Scanner implementation for the Quill language
//!
//! This module implements lexical analysis, converting source code into tokens.
//! Scanning never stops early: characters that fit no token are reported to
//! the diagnostics sink and emitted as [`TokenKind::Unknown`].

use tracing::debug;

use super::token::{Token, TokenKind};
use crate::error::suggest::lexical_hint;
use crate::error::{Diagnostics, SourceLocation};

/// Lexer for Quill source code
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
}

/// Tokenize `source`, reporting lexical errors into `diagnostics`
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Lexer::new(source).tokenize(diagnostics)
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Tokenize the source code. The result always ends with exactly one
    /// [`TokenKind::Eof`].
    pub fn tokenize(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            SourceLocation::at(self.line, self.column),
        ));

        debug!(tokens = self.tokens.len(), "tokenized source");
        self.tokens
    }

    /// Scan a single token
    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.advance();

        match c {
            // Whitespace (skip)
            ' ' | '\r' | '\t' | '\n' => {}

            // Single-character tokens
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::ArrayOpen),
            ']' => self.add_token(TokenKind::ArrayClose),
            '{' => self.add_token(TokenKind::TypeOpen),
            '}' => self.add_token(TokenKind::TypeClose),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            ':' => self.add_token(TokenKind::Colon),
            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '*' => self.add_token(TokenKind::Star),
            '%' => self.add_token(TokenKind::Percent),

            // Two-character tokens
            '=' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::Equal)
                } else {
                    self.add_token(TokenKind::Assign)
                }
            }

            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::NotEqual)
                } else {
                    self.unknown(c, diagnostics)
                }
            }

            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::LessEqual)
                } else {
                    self.add_token(TokenKind::Less)
                }
            }

            '>' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::GreaterEqual)
                } else {
                    self.add_token(TokenKind::Greater)
                }
            }

            // Comments
            '/' => {
                if self.match_char('/') {
                    self.scan_line_comment()
                } else {
                    self.add_token(TokenKind::Slash)
                }
            }

            ';' => {
                if self.match_char(';') {
                    self.scan_line_comment()
                } else {
                    self.scan_block_comment()
                }
            }

            // String literals
            '"' => self.scan_string(diagnostics),

            // Number literals
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            // Unexpected character
            _ => self.unknown(c, diagnostics),
        }
    }

    /// Report an unexpected character and emit it as an unknown token
    fn unknown(&mut self, c: char, diagnostics: &mut Diagnostics) {
        diagnostics.lexical(
            format!("Unexpected character '{}'", c),
            self.start_line,
            self.start_column,
            lexical_hint(c),
        );
        self.add_token(TokenKind::Unknown);
    }

    /// Scan a string literal. The token's lexeme is the unquoted, unescaped value.
    fn scan_string(&mut self, diagnostics: &mut Diagnostics) {
        let mut value = String::new();

        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() != '\\' {
                value.push(self.advance());
                continue;
            }

            let escape_line = self.line;
            let escape_column = self.column;
            self.advance(); // consume backslash
            if self.is_at_end() {
                break;
            }
            let escaped = self.advance();
            match escaped {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '\\' => value.push('\\'),
                '"' => value.push('"'),
                _ => {
                    diagnostics.lexical(
                        format!("Invalid escape sequence '\\{}'", escaped),
                        escape_line,
                        escape_column,
                        "Supported escapes are \\n, \\t, \\r, \\\\ and \\\"",
                    );
                    value.push(escaped);
                }
            }
        }

        if self.is_at_end() {
            diagnostics.lexical(
                "Unterminated string literal",
                self.start_line,
                self.start_column,
                "Add a closing '\"' to end the string",
            );
        } else {
            // Consume closing quote
            self.advance();
        }

        self.add_token_with_lexeme(TokenKind::StringLiteral, value);
    }

    /// Scan a number literal (integer or float)
    fn scan_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A trailing '.' without digits is left for the next token
        let is_float = if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            true
        } else {
            false
        };

        if is_float {
            self.add_token(TokenKind::FloatLiteral)
        } else {
            self.add_token(TokenKind::IntLiteral)
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        self.add_token_with_lexeme(kind, lexeme);
    }

    /// `//` and `;;` comments run to the end of the line
    fn scan_line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
        self.add_token(TokenKind::Comment)
    }

    /// `;` comments run to the next `;`, or to end of input without complaint
    fn scan_block_comment(&mut self) {
        while !self.is_at_end() {
            if self.advance() == ';' {
                break;
            }
        }
        self.add_token(TokenKind::Comment)
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Add a token whose lexeme is the scanned source text
    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.add_token_with_lexeme(kind, lexeme);
    }

    fn add_token_with_lexeme(&mut self, kind: TokenKind, lexeme: String) {
        let location = SourceLocation::at(self.start_line, self.start_column);
        let first_line_len = self.source[self.start..self.current]
            .iter()
            .take_while(|&&c| c != '\n')
            .count();
        let end_column = self.start_column + first_line_len.max(1) - 1;
        self.tokens
            .push(Token::new(kind, lexeme, location).with_end_column(end_column));
    }

    /// Advance to the next character, keeping line and column in step
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    /// Check if the next character matches and consume it if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    /// Peek at the next character without consuming it
    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    /// Check if we've reached the end of the source
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    fn tokenize_source(source: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize(source, &mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize_source(source).0.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source() {
        let (tokens, diagnostics) = tokenize_source("");
        assert_eq!(tokens.len(), 1); // Just EOF
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            kinds("()[]{},.:+-*/%"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::ArrayOpen,
                TokenKind::ArrayClose,
                TokenKind::TypeOpen,
                TokenKind::TypeClose,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_character_tokens() {
        assert_eq!(
            kinds("== != <= >= = < >"),
            vec![
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Assign,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("new bl stdout string int float bool char true True false False"),
            vec![
                TokenKind::New,
                TokenKind::Bl,
                TokenKind::Stdout,
                TokenKind::StringType,
                TokenKind::IntType,
                TokenKind::FloatType,
                TokenKind::BoolType,
                TokenKind::CharType,
                TokenKind::True,
                TokenKind::True,
                TokenKind::False,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let (tokens, _) = tokenize_source("foo bar_baz _private myVar123 newer");
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["foo", "bar_baz", "_private", "myVar123", "newer", ""]);
        assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_number_literals() {
        let (tokens, _) = tokenize_source("0 42 3.14 7.");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].lexeme, "42");
        assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[2].lexeme, "3.14");
        // The dot is not swallowed without a following digit
        assert_eq!(tokens[3].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[3].lexeme, "7");
        assert_eq!(tokens[4].kind, TokenKind::Dot);
    }

    #[test]
    fn test_string_literals() {
        let (tokens, diagnostics) = tokenize_source(r#""hello" "foo bar" """#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "hello");
        assert_eq!(tokens[1].lexeme, "foo bar");
        assert_eq!(tokens[2].lexeme, "");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_string_escape_sequences() {
        let (tokens, diagnostics) = tokenize_source(r#""hello\nworld" "tab\there" "quote\"test""#);
        assert_eq!(tokens[0].lexeme, "hello\nworld");
        assert_eq!(tokens[1].lexeme, "tab\there");
        assert_eq!(tokens[2].lexeme, "quote\"test");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_string_span_covers_source_text() {
        let (tokens, _) = tokenize_source("x = \"a\\tb\" \"open\nrest\"");
        assert_eq!(tokens[2].lexeme, "a\tb");
        assert_eq!((tokens[2].column(), tokens[2].end_column), (5, 10));

        // A string running onto the next line spans to the end of its first line
        assert_eq!(tokens[3].lexeme, "open\nrest");
        assert_eq!((tokens[3].column(), tokens[3].end_column), (12, 16));
    }

    #[test]
    fn test_invalid_escape_is_reported_and_kept() {
        let (tokens, diagnostics) = tokenize_source(r#""a\qb""#);
        assert_eq!(tokens[0].lexeme, "aqb");
        assert_eq!(diagnostics.len(), 1);
        let diag = diagnostics.iter().next().unwrap();
        assert!(diag.message.contains("Invalid escape sequence"));
        assert_eq!(diag.column(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = tokenize_source(r#""abc"#);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "abc");

        let lexical: Vec<_> = diagnostics.of_kind(DiagnosticKind::Lexical).collect();
        assert_eq!(lexical.len(), 1);
        assert!(lexical[0].message.contains("Unterminated string literal"));
        assert_eq!((lexical[0].line(), lexical[0].column()), (1, 1));
    }

    #[test]
    fn test_comment_forms() {
        let (tokens, diagnostics) =
            tokenize_source("new // slash\nbl ;; double\nstdout ; block\nspans ; int");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::New,
                TokenKind::Comment,
                TokenKind::Bl,
                TokenKind::Comment,
                TokenKind::Stdout,
                TokenKind::Comment,
                TokenKind::IntType,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].lexeme, "// slash");
        assert_eq!(tokens[3].lexeme, ";; double");
        assert_eq!(tokens[5].lexeme, "; block\nspans ;");
        assert_eq!(tokens[6].location.line, 4);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unclosed_block_comment_is_silent() {
        let (tokens, diagnostics) = tokenize_source("new ; never closed");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].lexeme, "; never closed");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bare_bang_is_unknown() {
        let (tokens, diagnostics) = tokenize_source("a ! b");
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].lexeme, "!");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);

        let diag = diagnostics.iter().next().unwrap();
        assert_eq!(diag.kind, DiagnosticKind::Lexical);
        assert!(diag.suggestion.contains("!="));
    }

    #[test]
    fn test_invalid_character_does_not_stop_scanning() {
        let (tokens, diagnostics) = tokenize_source("new x int = @ 5 $");
        assert_eq!(diagnostics.error_count(), 2);
        assert_eq!(tokens[4].kind, TokenKind::Unknown);
        assert_eq!(tokens[5].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[6].kind, TokenKind::Unknown);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);

        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.message, "Unexpected character '@'");
        assert_eq!((first.line(), first.column()), (1, 13));
    }

    #[test]
    fn test_source_location() {
        let (tokens, _) = tokenize_source("new\n  x\t= 1");
        assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 3));
        assert_eq!((tokens[2].line(), tokens[2].column()), (2, 5));
        assert_eq!((tokens[3].line(), tokens[3].column()), (2, 7));
    }

    #[test]
    fn test_single_eof_for_odd_inputs() {
        for source in ["", "\"", ";", "!", "1.", "\"\\", "new x int = 5\n\n"] {
            let (tokens, _) = tokenize_source(source);
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            assert_eq!(eofs, 1, "source {:?}", source);
            assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        }
    }
}
