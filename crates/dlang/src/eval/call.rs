//! Function call evaluation

use crate::ast::Expr;
use crate::error::type_name;
use crate::value::FunctionValue;
use crate::{Environment, EvalContext, RuntimeError, Value};

use super::control::ControlFlow;
use super::{exec_block, Evaluate};

/// Remaining native stack below which a call body moves to a new segment.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each native stack segment allocated for deep recursion.
const STACK_SEGMENT_SIZE: usize = 4 * 1024 * 1024;

/// Evaluate `callee(arguments...)`.
///
/// The callee is looked up by name, arguments are evaluated left to right
/// in the caller's scope, then the function runs in a fresh child of its
/// defining scope.
pub(crate) fn eval_call(
    callee: &str,
    arguments: &[Expr],
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<Value, RuntimeError> {
    let func = match env.get(callee) {
        Some(Value::Function(func)) => func,
        Some(other) => {
            return Err(RuntimeError::NotCallable {
                name: callee.to_string(),
                found: type_name(&other).to_string(),
            })
        }
        None => {
            return Err(RuntimeError::UndefinedFunction {
                name: callee.to_string(),
            })
        }
    };

    let args = arguments
        .iter()
        .map(|arg| arg.eval(env, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    call_function(&func, args, ctx)
}

/// Call a user-defined function with already-evaluated arguments.
///
/// A call that finishes without `dede` evaluates to unit. `break` or
/// `continue` escaping the body is an error; loops never span a call.
/// The call scope is emptied on the way out unless a closure declared in
/// it is still reachable from outside.
///
/// # Errors
///
/// `ArityMismatch` on a wrong argument count, `StackOverflow` past the
/// context's call depth limit, plus anything the body raises.
pub fn call_function(
    func: &FunctionValue,
    args: Vec<Value>,
    ctx: &mut EvalContext,
) -> Result<Value, RuntimeError> {
    if args.len() != func.arity() {
        return Err(RuntimeError::ArityMismatch {
            name: func.name.clone(),
            expected: func.arity(),
            got: args.len(),
        });
    }

    // Track call depth (stack overflow protection)
    ctx.enter_call()?;
    tracing::trace!(function = %func.name, depth = ctx.call_depth(), "call");

    let scope = Environment::new_enclosed(&func.closure);
    for (param, arg) in func.params.iter().zip(args) {
        scope.define(param.as_str(), arg);
    }

    // Dlang recursion is Rust recursion; grow the native stack on demand so
    // `max_call_depth` is reached before the host thread's stack runs out.
    let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
        exec_block(&func.body, &scope, ctx)
    });

    ctx.exit_call();
    scope.release_if_unshared();

    match result? {
        ControlFlow::Return(value) => Ok(value),
        ControlFlow::Normal(_) => Ok(Value::Unit),
        ControlFlow::Break => Err(RuntimeError::BreakOutsideLoop),
        ControlFlow::Continue => Err(RuntimeError::ContinueOutsideLoop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Block, Stmt};

    fn define_sum(env: &Environment) {
        let body = Block::new(vec![Stmt::Return {
            value: Some(Expr::binary(BinaryOp::Add, Expr::ident("a"), Expr::ident("b"))),
        }]);
        let func = FunctionValue::new(
            "sum".to_string(),
            vec!["a".to_string(), "b".to_string()],
            body,
            env.clone(),
        );
        env.define("sum", Value::function(func));
    }

    #[test]
    fn test_call_returns_value() {
        let env = Environment::new();
        define_sum(&env);
        let mut ctx = EvalContext::new();
        let result = eval_call(
            "sum",
            &[Expr::number(5.0), Expr::number(10.0)],
            &env,
            &mut ctx,
        )
        .unwrap();
        assert_eq!(result, Value::from(15));
        assert_eq!(ctx.call_depth(), 0);
    }

    #[test]
    fn test_params_do_not_leak_into_caller() {
        let env = Environment::new();
        define_sum(&env);
        let mut ctx = EvalContext::new();
        eval_call("sum", &[Expr::number(1.0), Expr::number(2.0)], &env, &mut ctx).unwrap();
        assert!(!env.contains("a"));
        assert!(!env.contains("b"));
    }

    #[test]
    fn test_arity_mismatch() {
        let env = Environment::new();
        define_sum(&env);
        let mut ctx = EvalContext::new();
        let err = eval_call("sum", &[Expr::number(1.0)], &env, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::ArityMismatch {
                name: "sum".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn test_call_non_function() {
        let env = Environment::new();
        env.define("n", Value::from(3));
        let mut ctx = EvalContext::new();
        let err = eval_call("n", &[], &env, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::NotCallable {
                name: "n".to_string(),
                found: "number".to_string(),
            }
        );
    }

    #[test]
    fn test_call_undefined() {
        let env = Environment::new();
        let mut ctx = EvalContext::new();
        let err = eval_call("nope", &[], &env, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UndefinedFunction {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_break_escaping_body_is_error() {
        let env = Environment::new();
        let func = FunctionValue::new(
            "f".to_string(),
            vec![],
            Block::new(vec![Stmt::Break]),
            env.clone(),
        );
        let mut ctx = EvalContext::new();
        let err = call_function(&func, vec![], &mut ctx).unwrap_err();
        assert_eq!(err, RuntimeError::BreakOutsideLoop);
        assert_eq!(ctx.call_depth(), 0);
    }
}
