//! Line-oriented, rule-table tokenizer
//!
//! Each line has everything from the first `#` stripped, is trimmed, and is
//! skipped when empty. Within a line the rules below are tried in order at
//! each position and the first one matching a non-empty prefix wins. Rule
//! order is part of the contract: it is first-match, not longest-match.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::LexError;
use crate::token::{is_keyword, Token, TokenKind};

/// Maximum number of characters of unmatched input quoted in a [`LexError`].
const SNIPPET_LEN: usize = 10;

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Matched and discarded
    Whitespace,
    Emit(TokenKind),
}

lazy_static! {
    static ref RULES: Vec<(Rule, Regex)> = vec![
        (Rule::Whitespace, rule(r"^\s+")),
        (Rule::Emit(TokenKind::Number), rule(r"^[0-9]+")),
        (Rule::Emit(TokenKind::String), rule(r#"^"[^"]*""#)),
        (Rule::Emit(TokenKind::Operator), rule(r"^[+\-*/=<>!]+")),
        (Rule::Emit(TokenKind::Punctuation), rule(r"^[(){};,]")),
        (Rule::Emit(TokenKind::Identifier), rule(r"^[A-Za-z_][A-Za-z0-9_]*")),
    ];
}

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("token rule patterns are valid")
}

/// Tokenize source text into an ordered sequence of tokens.
///
/// # Errors
///
/// Returns [`LexError`] at the first position no rule matches.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;
        let code = match raw_line.find('#') {
            Some(comment) => &raw_line[..comment],
            None => raw_line,
        };
        let trimmed = code.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = code.len() - code.trim_start().len();
        tokenize_line(trimmed, line, &code[..indent], &mut tokens)?;
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn tokenize_line(
    text: &str,
    line: usize,
    indent: &str,
    tokens: &mut Vec<Token>,
) -> Result<(), LexError> {
    let indent_cols = indent.chars().count();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let column = indent_cols + text[..pos].chars().count() + 1;

        let (rule, len) = RULES
            .iter()
            .find_map(|(rule, regex)| {
                regex
                    .find(rest)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| (*rule, m.end()))
            })
            .ok_or_else(|| LexError {
                line,
                column,
                snippet: rest.chars().take(SNIPPET_LEN).collect(),
            })?;

        let lexeme = &rest[..len];
        match rule {
            Rule::Whitespace => {}
            Rule::Emit(TokenKind::Identifier) if is_keyword(lexeme) => {
                tokens.push(Token::new(TokenKind::Keyword, lexeme, line, column));
            }
            Rule::Emit(kind) => tokens.push(Token::new(kind, lexeme, line, column)),
        }

        pos += len;
    }

    Ok(())
}
