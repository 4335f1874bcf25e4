//! Token shapes shared by the lexer and the parser

use std::fmt;

use serde::Serialize;

/// The fixed, closed set of keywords. `dede` is the return statement.
pub const KEYWORDS: [&str; 9] = [
    "let", "print", "if", "else", "while", "break", "continue", "function", "dede",
];

/// Check whether identifier-shaped text is a keyword.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Run of decimal digits
    Number,
    /// Double-quoted span, quotes included
    String,
    /// Maximal run of `+ - * / = < > !`
    Operator,
    /// One of `( ) { } ; ,`
    Punctuation,
    /// Letter or underscore followed by letters, digits or underscores
    Identifier,
    /// Identifier-shaped text that is one of [`KEYWORDS`]
    Keyword,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
        };
        f.write_str(name)
    }
}

/// A classified lexical unit. Produced once, consumed in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token category
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Literal source text (string tokens keep their quotes)
    #[serde(rename = "value")]
    pub text: String,

    /// 1-based source line
    pub line: usize,

    /// 1-based column of the first character
    pub column: usize,
}

impl Token {
    /// Create a token at the given position.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Check kind and exact text at once.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Check for a specific keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Keyword, keyword)
    }

    /// Check for a specific punctuation character.
    pub fn is_punct(&self, punct: &str) -> bool {
        self.is(TokenKind::Punctuation, punct)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.text)
    }
}
