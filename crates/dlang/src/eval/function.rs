//! Function declaration evaluation

use crate::ast::Block;
use crate::value::FunctionValue;
use crate::{Environment, RuntimeError, Value};

use super::control::ControlFlow;

/// Bind `name` in the current scope to a function closed over that scope.
pub(crate) fn exec_function_decl(
    name: &str,
    params: &[String],
    body: &Block,
    env: &Environment,
) -> Result<ControlFlow, RuntimeError> {
    let func = FunctionValue::new(name.to_string(), params.to_vec(), body.clone(), env.clone());
    env.define(name, Value::function(func));
    Ok(ControlFlow::unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_captures_defining_scope() {
        let env = Environment::new();
        exec_function_decl("f", &["a".to_string()], &Block::default(), &env).unwrap();

        let value = env.get("f").expect("f is bound");
        let func = value.as_function().expect("f is a function");
        assert_eq!(func.name, "f");
        assert_eq!(func.arity(), 1);
        assert!(func.closure.same_scope(&env));
    }
}
