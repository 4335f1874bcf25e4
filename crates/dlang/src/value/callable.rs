//! Function values

use std::fmt;
use std::rc::Rc;

use crate::ast::Block;
use crate::environment::Environment;

/// A user-defined function.
///
/// Holds its own copy of the body so it outlives the statement that
/// declared it, and the scope it was declared in for free-variable lookups.
#[derive(Clone)]
pub struct FunctionValue {
    /// Function name
    pub name: String,

    /// Parameter names in order
    pub params: Vec<String>,

    /// The function body
    pub body: Rc<Block>,

    /// Defining scope (lexical closure)
    pub closure: Environment,
}

impl FunctionValue {
    /// Create a new function value
    pub fn new(name: String, params: Vec<String>, body: Block, closure: Environment) -> Self {
        Self {
            name,
            params,
            body: Rc::new(body),
            closure,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// The closure scope usually contains this function again, so it is left out.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
