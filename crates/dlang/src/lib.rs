//! # Dlang
//!
//! A small tree-walking interpreter for the Dlang toy scripting language.
//!
//! Source text flows one way through three stages:
//!
//! - **Lexer**: source text to an ordered [`Token`] sequence
//! - **Parser**: tokens to a [`Program`] of [`Stmt`] nodes
//! - **Evaluator**: walks the tree over a chain of lexical scopes,
//!   collecting printed lines
//!
//! ```
//! let output = dlang::run("let a = 2 + 3 * 4\nprint a").unwrap();
//! assert_eq!(output.printed_lines, vec!["14".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

// Re-export main types
pub use ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
pub use context::EvalContext;
pub use environment::Environment;
pub use error::{
    EnvironmentError, InterpreterError, LexError, ParseError, Result, RuntimeError,
};
pub use eval::{evaluate, ControlFlow, Evaluate, Execute};
pub use interpreter::{run, Interpreter, RunOutput};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Token, TokenKind, KEYWORDS};
pub use value::{FunctionValue, Value};

/// Dlang version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
