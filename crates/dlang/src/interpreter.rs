//! Whole-run entry points
//!
//! [`run`] takes source text through lexing, parsing and evaluation in one
//! fresh global scope. [`Interpreter`] keeps that global scope alive across
//! several sources, which is what the REPL uses.

use crate::ast::Stmt;
use crate::environment::Bindings;
use crate::error::Result;
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::{Environment, EvalContext};

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Lines printed by `print`, in order
    pub printed_lines: Vec<String>,

    /// Global bindings after the last statement, in definition order
    pub final_bindings: Bindings,
}

/// A persistent interpreter session.
///
/// Each call to [`eval_source`](Self::eval_source) runs in the same global
/// scope, so bindings from earlier sources stay visible.
pub struct Interpreter {
    globals: Environment,
    ctx: EvalContext,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create a session with default settings.
    pub fn new() -> Self {
        Self::with_context(EvalContext::new())
    }

    /// Create a session with a custom evaluation context.
    pub fn with_context(ctx: EvalContext) -> Self {
        Self {
            globals: Environment::new(),
            ctx,
        }
    }

    /// The global scope.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Lex, parse and evaluate `source`, returning the printed lines.
    ///
    /// Statements before a runtime error keep their effect on the global
    /// scope; the lines they printed are discarded.
    pub fn eval_source(&mut self, source: &str) -> Result<Vec<String>> {
        let tokens = tokenize(source)?;
        let program = parse(tokens)?;
        self.eval_program(&program)
    }

    /// Evaluate an already parsed program.
    pub fn eval_program(&mut self, program: &[Stmt]) -> Result<Vec<String>> {
        tracing::debug!(statements = program.len(), "evaluating program");
        Ok(evaluate(program, &self.globals, &mut self.ctx)?)
    }

    /// End the session and hand back the global bindings.
    pub fn finish(self) -> Bindings {
        self.globals.take_bindings()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        // Functions hold their defining scope, which holds them back.
        self.globals.clear();
    }
}

/// Run a complete program in a fresh global scope.
///
/// # Errors
///
/// The first lex, parse or runtime error aborts the run; no partial output
/// is returned.
pub fn run(source: &str) -> Result<RunOutput> {
    let mut interpreter = Interpreter::new();
    let printed_lines = interpreter.eval_source(source)?;
    Ok(RunOutput {
        printed_lines,
        final_bindings: interpreter.finish(),
    })
}
