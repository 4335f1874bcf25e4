//! Unary operation evaluation

use crate::ast::{Expr, UnaryOp};
use crate::error::type_name;
use crate::{Environment, EvalContext, RuntimeError, Value};

use super::Evaluate;

pub(crate) fn eval_unary(
    op: UnaryOp,
    operand: &Expr,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<Value, RuntimeError> {
    let operand = operand.eval(env, ctx)?;
    apply_unary(op, operand)
}

/// Apply a prefix operator.
///
/// `-` negates a number; `!` inverts truthiness and accepts any value.
pub fn apply_unary(op: UnaryOp, operand: Value) -> Result<Value, RuntimeError> {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::TypeError {
                message: format!("cannot negate a {}", type_name(&other)),
            }),
        },
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}
