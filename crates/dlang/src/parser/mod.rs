//! Recursive-descent parser: tokens to AST
//!
//! Single-token lookahead (two for the assignment check), no backtracking,
//! no error recovery. The first failure aborts the whole parse.

mod expr;
mod stmt;

use crate::ast::Program;
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Parse a token sequence into a program.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(statements = program.len(), "parsed program");
    Ok(program)
}

/// Parser state over an owned token sequence.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a parser positioned at the first token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse every remaining statement. Stray `;` separators are skipped.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Vec::new();
        while !self.is_at_end() {
            if self.eat_punct(";") {
                continue;
            }
            program.push(self.parse_statement()?);
        }
        Ok(program)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn check_punct(&self, punct: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn eat_punct(&mut self, punct: &str) -> bool {
        if self.check_punct(punct) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expectations
    // ═══════════════════════════════════════════════════════════════════

    fn expect_punct(&mut self, punct: &str, expected: &str) -> Result<Token, ParseError> {
        if self.check_punct(punct) {
            self.advance().ok_or_else(|| self.unexpected(expected))
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_operator(&mut self, op: &str, expected: &str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(t) if t.is(TokenKind::Operator, op) => {
                self.advance().ok_or_else(|| self.unexpected(expected))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Identifier => {
                let name = t.text.clone();
                self.current += 1;
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Build an error describing the current token (or end of input).
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
                line: token.line,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }
}
