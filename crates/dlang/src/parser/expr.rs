//! Expression productions (precedence climbing)
//!
//! ```text
//! expression := unary (binary_op unary)*      -- climbed by precedence
//! unary      := ("-" | "!") unary | primary
//! primary    := NUMBER | STRING | IDENT | IDENT "(" args ")" | "(" expression ")"
//! ```

use super::Parser;
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::token::TokenKind;

/// Lowest binding strength of any binary operator.
const MIN_PRECEDENCE: u8 = 1;

impl Parser {
    /// Parse a full expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(MIN_PRECEDENCE)
    }

    /// Fold operators binding at least `min_prec` into a left-associative tree.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.peek_binary_op()? {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// The binary operator at the cursor, if the cursor is on an operator.
    fn peek_binary_op(&self) -> Result<Option<BinaryOp>, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Operator => BinaryOp::from_symbol(&t.text)
                .map(Some)
                .ok_or_else(|| ParseError::UnknownOperator {
                    operator: t.text.clone(),
                    line: t.line,
                }),
            _ => Ok(None),
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let prefix = self
            .peek()
            .filter(|t| t.kind == TokenKind::Operator)
            .and_then(|t| UnaryOp::from_symbol(&t.text));

        match prefix {
            Some(op) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::unary(op, operand))
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.advance() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "expression".to_string(),
                })
            }
        };

        match token.kind {
            TokenKind::Number => {
                token
                    .text
                    .parse::<f64>()
                    .map(Expr::number)
                    .map_err(|_| ParseError::UnexpectedToken {
                        expected: "numeric literal".to_string(),
                        found: token.to_string(),
                        line: token.line,
                    })
            }
            TokenKind::String => {
                let text = &token.text;
                Ok(Expr::string(&text[1..text.len() - 1]))
            }
            TokenKind::Identifier if self.check_punct("(") => self.parse_call(token.text),
            TokenKind::Identifier => Ok(Expr::Identifier { name: token.text }),
            TokenKind::Punctuation if token.text == "(" => {
                let inner = self.parse_expression()?;
                self.expect_punct(")", "`)` to close parenthesized expression")?;
                Ok(inner)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: token.to_string(),
                line: token.line,
            }),
        }
    }

    /// Parse `( <expr>, ... )` after a callee name.
    fn parse_call(&mut self, callee: String) -> Result<Expr, ParseError> {
        self.expect_punct("(", "`(` to open argument list")?;

        let mut arguments = Vec::new();
        if !self.check_punct(")") {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.eat_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")", "`)` to close argument list")?;

        Ok(Expr::Call { callee, arguments })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr, Stmt, UnaryOp};
    use crate::error::ParseError;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn parse_expr(src: &str) -> Result<Expr, ParseError> {
        let mut program = parse(tokenize(&format!("print {}", src)).unwrap())?;
        match program.remove(0) {
            Stmt::Print { value } => Ok(value),
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            parse_expr("2 + 3 * 4").unwrap(),
            Expr::binary(
                BinaryOp::Add,
                Expr::number(2.0),
                Expr::binary(BinaryOp::Mul, Expr::number(3.0), Expr::number(4.0)),
            )
        );
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(
            parse_expr("10 - 4 - 3").unwrap(),
            Expr::binary(
                BinaryOp::Sub,
                Expr::binary(BinaryOp::Sub, Expr::number(10.0), Expr::number(4.0)),
                Expr::number(3.0),
            )
        );
    }

    #[test]
    fn test_comparison_binds_looser_than_arithmetic() {
        assert_eq!(
            parse_expr("a + 1 < b * 2").unwrap(),
            Expr::binary(
                BinaryOp::Lt,
                Expr::binary(BinaryOp::Add, Expr::ident("a"), Expr::number(1.0)),
                Expr::binary(BinaryOp::Mul, Expr::ident("b"), Expr::number(2.0)),
            )
        );
    }

    #[test]
    fn test_equality_binds_loosest() {
        assert_eq!(
            parse_expr("a < b == c > d").unwrap(),
            Expr::binary(
                BinaryOp::Eq,
                Expr::binary(BinaryOp::Lt, Expr::ident("a"), Expr::ident("b")),
                Expr::binary(BinaryOp::Gt, Expr::ident("c"), Expr::ident("d")),
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse_expr("(2 + 3) * 4").unwrap(),
            Expr::binary(
                BinaryOp::Mul,
                Expr::binary(BinaryOp::Add, Expr::number(2.0), Expr::number(3.0)),
                Expr::number(4.0),
            )
        );
    }

    #[test]
    fn test_string_quotes_stripped() {
        assert_eq!(parse_expr("\"Hello\"").unwrap(), Expr::string("Hello"));
        assert_eq!(parse_expr("\"\"").unwrap(), Expr::string(""));
    }

    #[test]
    fn test_call_with_nested_arguments() {
        assert_eq!(
            parse_expr("sum(1 + 2, f(x))").unwrap(),
            Expr::call(
                "sum",
                vec![
                    Expr::binary(BinaryOp::Add, Expr::number(1.0), Expr::number(2.0)),
                    Expr::call("f", vec![Expr::ident("x")]),
                ],
            )
        );
    }

    #[test]
    fn test_unary_prefix() {
        assert_eq!(
            parse_expr("- x * 2").unwrap(),
            Expr::binary(
                BinaryOp::Mul,
                Expr::unary(UnaryOp::Neg, Expr::ident("x")),
                Expr::number(2.0),
            )
        );
    }

    #[test]
    fn test_unknown_operator() {
        let err = parse_expr("1 +- 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownOperator {
                operator: "+-".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_expr("1 +").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEof {
                expected: "expression".to_string(),
            }
        );
    }

    #[test]
    fn test_unclosed_call() {
        let err = parse_expr("f(1, 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEof {
                expected: "`)` to close argument list".to_string(),
            }
        );
    }
}
