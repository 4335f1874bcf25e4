//! Error types for every interpreter stage

use thiserror::Error;

use crate::value::Value;

/// Raised by the lexer when no token rule matches at a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lex error at line {line}, column {column}: unexpected input near `{snippet}`")]
pub struct LexError {
    /// 1-based source line
    pub line: usize,
    /// 1-based column within the line
    pub column: usize,
    /// Bounded prefix of the unmatched remainder
    pub snippet: String,
}

/// Raised by the parser on structurally invalid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token other than the required one was found
    #[error("Parse error at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser needed here
        expected: String,
        /// Description of the token encountered
        found: String,
        /// Line of the offending token
        line: usize,
    },

    /// Input ended while a construct was still incomplete
    #[error("Parse error: expected {expected}, found end of input")]
    UnexpectedEof {
        /// What the parser needed here
        expected: String,
    },

    /// A `{` was never closed
    #[error("Parse error: unterminated block opened at line {line}")]
    UnterminatedBlock {
        /// Line of the opening brace
        line: usize,
    },

    /// An operator run that names no known operator (e.g. `+-`)
    #[error("Parse error at line {line}: unknown operator `{operator}`")]
    UnknownOperator {
        /// The operator text
        operator: String,
        /// Line of the operator
        line: usize,
    },
}

/// Failures of scope-level operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// Assignment target is not bound in any reachable scope
    #[error("`{name}` is not bound in any enclosing scope")]
    Unbound {
        /// Variable name
        name: String,
    },
}

/// Raised by the evaluator on semantic violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Identifier lookup failed in every scope
    #[error("Runtime error: undefined variable `{name}`")]
    UndefinedVariable {
        /// Variable name
        name: String,
    },

    /// Assignment to a name that was never declared
    #[error("Runtime error: assignment to undeclared variable `{name}`")]
    UndeclaredAssignment {
        /// Variable name
        name: String,
    },

    /// Operator applied to operands it does not support
    #[error("Runtime error: unsupported operands for `{op}`: {left_type} and {right_type}")]
    InvalidOperands {
        /// Operator symbol
        op: String,
        /// Kind of the left operand
        left_type: String,
        /// Kind of the right operand
        right_type: String,
    },

    /// A value of the wrong kind in some other position
    #[error("Runtime error: {message}")]
    TypeError {
        /// Error description
        message: String,
    },

    /// Call of a name bound to something other than a function
    #[error("Runtime error: `{name}` is a {found}, not a function")]
    NotCallable {
        /// Callee name
        name: String,
        /// Kind of the bound value
        found: String,
    },

    /// Call of a name that is not bound at all
    #[error("Runtime error: undefined function `{name}`")]
    UndefinedFunction {
        /// Callee name
        name: String,
    },

    /// Wrong number of arguments
    #[error("Runtime error: function `{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Division with a zero divisor
    #[error("Runtime error: division by zero")]
    DivisionByZero,

    /// `break` reached a function or program boundary
    #[error("Runtime error: break outside loop")]
    BreakOutsideLoop,

    /// `continue` reached a function or program boundary
    #[error("Runtime error: continue outside loop")]
    ContinueOutsideLoop,

    /// `dede` reached the program boundary
    #[error("Runtime error: dede (return) outside function")]
    ReturnOutsideFunction,

    /// Call depth exceeded the configured limit
    #[error("Runtime error: stack overflow (call depth {depth} exceeds maximum {max})")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

impl From<EnvironmentError> for RuntimeError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::Unbound { name } => RuntimeError::UndeclaredAssignment { name },
        }
    }
}

/// Any failure of a full run. The first error aborts the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    /// Tokenizing failed
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Parsing failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for whole-run operations
pub type Result<T> = std::result::Result<T, InterpreterError>;

/// User-facing name of a value's kind, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Bool(_) => "boolean",
        Value::Unit => "unit",
        Value::Function(_) => "function",
    }
}
