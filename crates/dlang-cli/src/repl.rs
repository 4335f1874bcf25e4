//! Interactive session over a single interpreter.

use anyhow::Result;
use dlang::{Interpreter, InterpreterError, ParseError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "dlang> ";
const CONTINUATION_PROMPT: &str = "...... ";

/// What one line of input produced.
#[derive(Debug, PartialEq)]
enum Feed {
    /// The buffered source ran; these lines were printed
    Output(Vec<String>),
    /// A block is still open; more lines are needed
    Incomplete,
    /// The buffered source failed
    Error(InterpreterError),
}

/// Interpreter plus the source of a statement still being typed.
struct Session {
    interpreter: Interpreter,
    pending: String,
}

impl Session {
    fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            pending: String::new(),
        }
    }

    fn is_continuing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append a line and run everything buffered so far.
    ///
    /// An unterminated block keeps the buffer for the next line. Parsing
    /// happens before any evaluation, so nothing runs twice.
    fn feed(&mut self, line: &str) -> Feed {
        self.pending.push_str(line);
        self.pending.push('\n');

        match self.interpreter.eval_source(&self.pending) {
            Err(InterpreterError::Parse(ParseError::UnterminatedBlock { .. })) => Feed::Incomplete,
            result => {
                self.pending.clear();
                match result {
                    Ok(lines) => Feed::Output(lines),
                    Err(err) => Feed::Error(err),
                }
            }
        }
    }

    /// Drop a partially typed statement.
    fn discard(&mut self) {
        self.pending.clear();
    }
}

/// Read lines until end of input. Each statement runs in the same global
/// scope; an error is reported and the session continues.
pub fn run() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new();

    println!("Dlang {} (Ctrl-D to exit)", dlang::VERSION);

    loop {
        let prompt = if session.is_continuing() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        };

        match editor.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() && !session.is_continuing() {
                    continue;
                }
                editor.add_history_entry(line.as_str())?;
                match session.feed(&line) {
                    Feed::Output(lines) => {
                        for printed in lines {
                            println!("{printed}");
                        }
                    }
                    Feed::Incomplete => {}
                    Feed::Error(err) => eprintln!("error: {err}"),
                }
            }
            // Ctrl-C drops the current statement only
            Err(ReadlineError::Interrupted) => session.discard(),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!(
        bindings = session.interpreter.globals().len(),
        "session ended"
    );
    Ok(())
}
