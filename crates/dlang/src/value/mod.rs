//! Runtime values

mod callable;
mod display;

pub use callable::FunctionValue;

use std::rc::Rc;

/// Runtime value representation.
///
/// Numbers are 64-bit floats so `/` and equality behave the same for every
/// numeric value. `Bool` comes from comparisons, `Unit` is the result of
/// calls that finish without `dede` and of statements with no value.
#[derive(Clone)]
pub enum Value {
    /// Number (integral values print without a fraction)
    Number(f64),

    /// Immutable string
    String(Rc<str>),

    /// Result of a comparison or `!`
    Bool(bool),

    /// No value
    Unit,

    /// User-defined function closed over its defining scope
    Function(Rc<FunctionValue>),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Rc::from(s.into()))
    }

    /// Create a function value.
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(Rc::new(func))
    }

    /// Truthiness used by `if`, `while` and `!`.
    ///
    /// Numbers are truthy iff nonzero, strings iff non-empty, booleans as
    /// themselves. Unit is falsy and functions are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Unit => false,
            Value::Function(_) => true,
        }
    }

    /// Check if value is unit
    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// Check if value is a function
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Extract a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Extract a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract a function
    pub fn as_function(&self) -> Option<&Rc<FunctionValue>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
