//! Tree-walking evaluation
//!
//! Expressions evaluate to a [`Value`]; statements execute to a
//! [`ControlFlow`] signal that every caller (block, loop, call) inspects.
//! `break`, `continue` and `dede` travel outward as ordinary return values.

pub mod binary;
pub mod call;
pub mod control;
pub mod function;
pub mod if_stmt;
pub mod loops;
pub mod stmt;
pub mod unary;

use crate::ast::{Expr, Stmt};
use crate::{Environment, EvalContext, RuntimeError, Value};

/// Evaluate an expression node to a value.
pub trait Evaluate {
    /// Evaluate this node in the given scope.
    fn eval(&self, env: &Environment, ctx: &mut EvalContext) -> Result<Value, RuntimeError>;
}

/// Execute a statement node for effect.
pub trait Execute {
    /// Execute this node in the given scope, yielding a control signal.
    fn exec(&self, env: &Environment, ctx: &mut EvalContext) -> Result<ControlFlow, RuntimeError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, env: &Environment, ctx: &mut EvalContext) -> Result<Value, RuntimeError> {
        match self {
            Expr::Number { value } => Ok(Value::Number(*value)),
            Expr::String { value } => Ok(Value::string(value.as_str())),
            Expr::Identifier { name } => lookup(name, env),
            Expr::Binary {
                operator,
                left,
                right,
            } => binary::eval_binary(*operator, left, right, env, ctx),
            Expr::Unary { operator, operand } => unary::eval_unary(*operator, operand, env, ctx),
            Expr::Call { callee, arguments } => call::eval_call(callee, arguments, env, ctx),
        }
    }
}

/// Resolve an identifier through the scope chain.
fn lookup(name: &str, env: &Environment) -> Result<Value, RuntimeError> {
    env.get(name).ok_or_else(|| RuntimeError::UndefinedVariable {
        name: name.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Program Entry
// ═══════════════════════════════════════════════════════════════════════

/// Execute a program's top-level statements and return the printed lines.
///
/// A `break`, `continue` or `dede` signal that reaches the top level is an
/// error. On error the lines buffered by this call are discarded.
///
/// # Errors
///
/// Returns the first [`RuntimeError`]; evaluation stops there.
pub fn evaluate(
    program: &[Stmt],
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<Vec<String>, RuntimeError> {
    match execute_top_level(program, env, ctx) {
        Ok(()) => Ok(ctx.take_output()),
        Err(err) => {
            ctx.reset();
            tracing::debug!(error = %err, "evaluation aborted");
            Err(err)
        }
    }
}

fn execute_top_level(
    program: &[Stmt],
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<(), RuntimeError> {
    for stmt in program {
        match stmt.exec(env, ctx)? {
            ControlFlow::Normal(_) => {}
            ControlFlow::Break => return Err(RuntimeError::BreakOutsideLoop),
            ControlFlow::Continue => return Err(RuntimeError::ContinueOutsideLoop),
            ControlFlow::Return(_) => return Err(RuntimeError::ReturnOutsideFunction),
        }
    }
    Ok(())
}

// Re-export for use by other modules
pub use control::ControlFlow;
pub use stmt::exec_block;
