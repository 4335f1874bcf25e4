//! Binary operation evaluation

use std::cmp::Ordering;

use crate::ast::{BinaryOp, Expr};
use crate::error::type_name;
use crate::{Environment, EvalContext, RuntimeError, Value};

use super::Evaluate;

/// Evaluate both operands left to right, then apply `op`.
pub(crate) fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<Value, RuntimeError> {
    let left = left.eval(env, ctx)?;
    let right = right.eval(env, ctx)?;
    apply_binary(op, left, right)
}

/// Apply a binary operator to two values.
///
/// Arithmetic takes numbers; `+` also concatenates two strings.
/// Comparisons take operands of the same kind and yield a boolean.
///
/// # Errors
///
/// `InvalidOperands` for unsupported kinds, `DivisionByZero` for `/ 0`.
pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op {
        // Arithmetic
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => eval_arithmetic(op, left, right, |a, b| a - b),
        BinaryOp::Mul => eval_arithmetic(op, left, right, |a, b| a * b),
        BinaryOp::Div => eval_div(left, right),

        // Equality
        BinaryOp::Eq => eval_eq(op, &left, &right).map(Value::Bool),
        BinaryOp::Ne => eval_eq(op, &left, &right).map(|eq| Value::Bool(!eq)),

        // Ordering
        BinaryOp::Lt => eval_cmp(op, &left, &right, Ordering::is_lt),
        BinaryOp::Gt => eval_cmp(op, &left, &right, Ordering::is_gt),
        BinaryOp::Le => eval_cmp(op, &left, &right, Ordering::is_le),
        BinaryOp::Ge => eval_cmp(op, &left, &right, Ordering::is_ge),
    }
}

fn invalid_operands(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::InvalidOperands {
        op: op.symbol().to_string(),
        left_type: type_name(left).to_string(),
        right_type: type_name(right).to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

fn eval_add(left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        // String concatenation
        (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{}{}", a, b))),

        // Numeric addition
        _ => eval_arithmetic(BinaryOp::Add, left, right, |a, b| a + b),
    }
}

fn eval_div(left: Value, right: Value) -> Result<Value, RuntimeError> {
    if let (Value::Number(_), Value::Number(divisor)) = (&left, &right) {
        if *divisor == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
    }
    eval_arithmetic(BinaryOp::Div, left, right, |a, b| a / b)
}

fn eval_arithmetic(
    op: BinaryOp,
    left: Value,
    right: Value,
    apply: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
        _ => Err(invalid_operands(op, &left, &right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison Operations
// ═══════════════════════════════════════════════════════════════════════

fn eval_eq(op: BinaryOp, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Unit, Value::Unit) => Ok(true),
        _ => Err(invalid_operands(op, left, right)),
    }
}

fn eval_cmp(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    test: fn(Ordering) -> bool,
) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => return Err(invalid_operands(op, left, right)),
    };
    // NaN compares false in every direction
    Ok(Value::Bool(ordering.is_some_and(test)))
}
