//! If statement evaluation

use crate::ast::{Block, Expr};
use crate::{Environment, EvalContext, RuntimeError};

use super::control::ControlFlow;
use super::{exec_block, Evaluate};

/// Run the branch selected by the condition's truthiness and propagate its
/// signal. A false condition with no else branch yields unit.
pub(crate) fn exec_if(
    condition: &Expr,
    then_branch: &Block,
    else_branch: Option<&Block>,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    if condition.eval(env, ctx)?.is_truthy() {
        exec_block(then_branch, env, ctx)
    } else if let Some(else_branch) = else_branch {
        exec_block(else_branch, env, ctx)
    } else {
        Ok(ControlFlow::unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;
    use crate::Value;

    fn print(n: f64) -> Block {
        Block::new(vec![Stmt::Print {
            value: Expr::number(n),
        }])
    }

    #[test]
    fn test_truthy_number_takes_then() {
        let env = Environment::new();
        let mut ctx = EvalContext::new();
        exec_if(&Expr::number(3.0), &print(1.0), Some(&print(2.0)), &env, &mut ctx).unwrap();
        assert_eq!(ctx.output(), ["1"]);
    }

    #[test]
    fn test_empty_string_takes_else() {
        let env = Environment::new();
        let mut ctx = EvalContext::new();
        exec_if(&Expr::string(""), &print(1.0), Some(&print(2.0)), &env, &mut ctx).unwrap();
        assert_eq!(ctx.output(), ["2"]);
    }

    #[test]
    fn test_false_without_else_is_unit() {
        let env = Environment::new();
        let mut ctx = EvalContext::new();
        let cf = exec_if(&Expr::number(0.0), &print(1.0), None, &env, &mut ctx).unwrap();
        assert_eq!(cf, ControlFlow::Normal(Value::Unit));
        assert!(ctx.output().is_empty());
    }

    #[test]
    fn test_signal_propagates_from_branch() {
        let env = Environment::new();
        let mut ctx = EvalContext::new();
        let then_branch = Block::new(vec![Stmt::Continue]);
        let cf = exec_if(&Expr::number(1.0), &then_branch, None, &env, &mut ctx).unwrap();
        assert_eq!(cf, ControlFlow::Continue);
    }
}
