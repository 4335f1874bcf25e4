//! Loop evaluation

use crate::ast::{Block, Expr};
use crate::{Environment, EvalContext, RuntimeError};

use super::control::ControlFlow;
use super::{exec_block, Evaluate};

/// Run `body` while `condition` is truthy.
///
/// `Break` ends the loop, `Continue` goes back to the condition, and
/// `Return` is handed outward untouched for the enclosing call to absorb.
pub(crate) fn exec_while(
    condition: &Expr,
    body: &Block,
    env: &Environment,
    ctx: &mut EvalContext,
) -> Result<ControlFlow, RuntimeError> {
    while condition.eval(env, ctx)?.is_truthy() {
        match exec_block(body, env, ctx)? {
            ControlFlow::Break => break,
            ControlFlow::Continue | ControlFlow::Normal(_) => {}
            ret @ ControlFlow::Return(_) => return Ok(ret),
        }
    }

    Ok(ControlFlow::unit())
}
