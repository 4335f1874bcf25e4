//! Control signals for break/continue/return

use crate::Value;

/// The result of executing a statement.
///
/// Anything other than `Normal` is an abrupt completion: blocks stop at it
/// and hand it outward until a loop (`Break`, `Continue`) or a call
/// (`Return`) absorbs it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Completed normally with a value (`Value::Unit` for none)
    Normal(Value),

    /// Leave the nearest enclosing loop
    Break,

    /// Skip to the nearest enclosing loop's next condition check
    Continue,

    /// Leave the nearest enclosing call with a value
    Return(Value),
}

impl ControlFlow {
    /// Normal completion without a value.
    pub fn unit() -> Self {
        ControlFlow::Normal(Value::Unit)
    }

    /// Check for normal completion.
    pub fn is_normal(&self) -> bool {
        matches!(self, ControlFlow::Normal(_))
    }

    /// Check for break, continue or return.
    pub fn is_abrupt(&self) -> bool {
        !self.is_normal()
    }

    /// Value carried by `Normal` or `Return`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ControlFlow::Normal(v) | ControlFlow::Return(v) => Some(v),
            ControlFlow::Break | ControlFlow::Continue => None,
        }
    }
}
