//! Statement productions

use super::Parser;
use crate::ast::{Block, Stmt};
use crate::error::ParseError;
use crate::token::TokenKind;

impl Parser {
    /// Parse one statement, dispatching on the current token.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let (kind, text) = match self.peek() {
            Some(token) => (token.kind, token.text.clone()),
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "statement".to_string(),
                })
            }
        };

        match (kind, text.as_str()) {
            (TokenKind::Keyword, "let") => self.parse_let(),
            (TokenKind::Keyword, "print") => self.parse_print(),
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "while") => self.parse_while(),
            (TokenKind::Keyword, "break") => {
                self.advance();
                Ok(Stmt::Break)
            }
            (TokenKind::Keyword, "continue") => {
                self.advance();
                Ok(Stmt::Continue)
            }
            (TokenKind::Keyword, "function") => self.parse_function(),
            (TokenKind::Keyword, "dede") => self.parse_return(),
            (TokenKind::Keyword, _) => Err(self.unexpected("statement")),
            (TokenKind::Punctuation, "{") => Ok(Stmt::Block(self.parse_block("block")?)),
            (TokenKind::Identifier, _) if self.is_assignment() => self.parse_assignment(),
            _ => Ok(Stmt::Expression {
                expression: self.parse_expression()?,
            }),
        }
    }

    /// `<ident> =` at statement position. Any other `=` is equality.
    fn is_assignment(&self) -> bool {
        self.peek_next()
            .is_some_and(|t| t.is(TokenKind::Operator, "="))
    }

    fn parse_let(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.expect_identifier("variable name after `let`")?;
        self.expect_operator("=", "`=` after variable name")?;
        let value = self.parse_expression()?;
        Ok(Stmt::Let { name, value })
    }

    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier("assignment target")?;
        self.expect_operator("=", "`=` in assignment")?;
        let value = self.parse_expression()?;
        Ok(Stmt::Assign { name, value })
    }

    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let value = self.parse_expression()?;
        Ok(Stmt::Print { value })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let condition = self.parse_expression()?;
        let then_branch = self.parse_block("if body")?;

        let else_branch = if self.check_keyword("else") {
            self.advance();
            if self.check_keyword("if") {
                // else-if chains nest as a one-statement else block
                Some(Block::new(vec![self.parse_if()?]))
            } else {
                Some(self.parse_block("else body")?)
            }
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let condition = self.parse_expression()?;
        let body = self.parse_block("while body")?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_function(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let name = self.expect_identifier("function name after `function`")?;
        self.expect_punct("(", "`(` to open parameter list")?;

        let mut params = Vec::new();
        if !self.check_punct(")") {
            loop {
                params.push(self.expect_identifier("parameter name")?);
                if !self.eat_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")", "`)` to close parameter list")?;

        let body = self.parse_block("function body")?;
        Ok(Stmt::Function { name, params, body })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.advance();
        let bare = self.is_at_end() || self.check_punct("}") || self.check_punct(";");
        let value = if bare {
            None
        } else {
            Some(self.parse_expression()?)
        };
        Ok(Stmt::Return { value })
    }

    /// Parse `{ <statement>* }`. `context` names the construct for errors.
    pub(crate) fn parse_block(&mut self, context: &str) -> Result<Block, ParseError> {
        let open = self.expect_punct("{", &format!("`{{` to open {}", context))?;

        let mut body = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedBlock { line: open.line }),
                Some(t) if t.is_punct("}") => {
                    self.advance();
                    break;
                }
                Some(t) if t.is_punct(";") => {
                    self.advance();
                }
                Some(_) => body.push(self.parse_statement()?),
            }
        }

        Ok(Block::new(body))
    }
}
