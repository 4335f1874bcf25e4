//! Evaluation context configuration

use crate::error::RuntimeError;

/// Default maximum call depth.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Configuration and per-run state for evaluation.
///
/// This is passed through all evaluation calls. It holds the recursion
/// limit, the live call depth, and the lines printed so far. The core
/// never writes to stdout itself; printed lines are collected here.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Maximum call depth (stack overflow protection)
    pub max_call_depth: usize,

    call_depth: usize,

    output: Vec<String>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            call_depth: 0,
            output: Vec::new(),
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Depth Tracking
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function call. Returns error if max depth exceeded.
    pub fn enter_call(&mut self) -> Result<(), RuntimeError> {
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                depth: self.call_depth + 1,
                max: self.max_call_depth,
            });
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Exit a function call.
    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Get current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Output
    // ═══════════════════════════════════════════════════════════════════

    /// Append one printed line.
    pub fn emit(&mut self, line: String) {
        self.output.push(line);
    }

    /// Lines printed since the last [`take_output`](Self::take_output).
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drain the printed lines.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Reset per-run state, keeping configuration.
    pub fn reset(&mut self) {
        self.call_depth = 0;
        self.output.clear();
    }
}
