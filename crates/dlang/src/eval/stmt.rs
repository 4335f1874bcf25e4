//! Statement evaluation

use crate::ast::{Block, Expr, Stmt};
use crate::error::type_name;
use crate::{Environment, EvalContext, RuntimeError, Value};

use super::control::ControlFlow;
use super::{function, if_stmt, loops, Evaluate, Execute};

impl Execute for Stmt {
    fn exec(&self, env: &Environment, ctx: &mut EvalContext) -> Result<ControlFlow, RuntimeError> {
        match self {
            Stmt::Let { name, value } => exec_let(name, value, env, ctx),
            Stmt::Assign { name, value } => exec_assign(name, value, env, ctx),
            Stmt::Print { value } => exec_print(value, env, ctx),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => if_stmt::exec_if(condition, then_branch, else_branch.as_ref(), env, ctx),
            Stmt::While { condition, body } => loops::exec_while(condition, body, env, ctx),
            Stmt::Block(block) => exec_block(block, env, ctx),
            Stmt::Break => Ok(ControlFlow::Break),
            Stmt::Continue => Ok(ControlFlow::Continue),
            Stmt::Function { name, params, body } => {
                function::exec_function_decl(name, params, body, env)
            }
            Stmt::Return { value } => {
                let value = match value {
                    Some(expr) => expr.eval(env, ctx)?,
                    None => Value::Unit,
                };
                Ok(ControlFlow::Return(value))
            }
            Stmt::Expression { expression } => Ok(ControlFlow::Normal(expression.eval(env, ctx)?)),
        }
    }
}

/// `let` binds or rebinds in the current scope; redeclaring is not an error.
fn exec_let(
    name: &str,
    value: &Expr,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    let value = value.eval(env, ctx)?;
    env.define(name, value.clone());
    Ok(ControlFlow::Normal(value))
}

/// Assignment rebinds in whichever scope already holds the name.
fn exec_assign(
    name: &str,
    value: &Expr,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    if !env.contains(name) {
        return Err(RuntimeError::UndeclaredAssignment {
            name: name.to_string(),
        });
    }
    let value = value.eval(env, ctx)?;
    env.assign(name, value.clone())?;
    Ok(ControlFlow::Normal(value))
}

fn exec_print(
    value: &Expr,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    let value = value.eval(env, ctx)?;
    if let Value::Function(func) = &value {
        return Err(RuntimeError::TypeError {
            message: format!("cannot print {} `{}`", type_name(&value), func.name),
        });
    }
    ctx.emit(value.to_string());
    Ok(ControlFlow::Normal(value))
}

/// Execute a block's statements in order.
///
/// Stops at the first abrupt signal and returns it. Otherwise yields the
/// last statement's signal, or unit for an empty block. Blocks do not open
/// a scope; only calls do.
pub fn exec_block(
    block: &Block,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    let mut last = ControlFlow::unit();

    for stmt in &block.body {
        let signal = stmt.exec(env, ctx)?;
        if signal.is_abrupt() {
            return Ok(signal);
        }
        last = signal;
    }

    Ok(last)
}
