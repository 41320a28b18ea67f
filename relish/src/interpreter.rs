//! The contract between the engine and a plugged-in interpreter

use std::collections::BTreeSet;

/// Opaque error raised by an interpreter's `eval`.
pub type EvalError = Box<dyn std::error::Error + Send + Sync>;

/// A line interpreter pluggable into a [`Session`](crate::Session).
///
/// The engine knows nothing about the language being interpreted: it hands
/// over one alias-expanded line at a time and reports any error the
/// interpreter raises without terminating the session.
pub trait Interpreter {
    /// Evaluate one line of input, producing side effects (usually output).
    fn eval(&mut self, line: &str) -> Result<(), EvalError>;

    /// Keywords contributed to tab-completion.
    ///
    /// This capability is optional: the default implementation returns
    /// `None` and contributes nothing. Implementations that do complete
    /// should return the full keyword set on every call, since the set may
    /// change as the interpreter accumulates state.
    fn keywords(&self) -> Option<BTreeSet<String>> {
        None
    }
}

/// Fallback interpreter used when nothing else is plugged in.
///
/// Echoes every line back and supplies a small fixed keyword set, which is
/// enough to exercise the loop, history and completion interactively.
pub struct EchoInterpreter {
    words: BTreeSet<String>,
}

impl EchoInterpreter {
    pub fn new() -> Self {
        let words = ["print", "dup", "drop", "swap"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        Self { words }
    }
}

impl Default for EchoInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter for EchoInterpreter {
    fn eval(&mut self, line: &str) -> Result<(), EvalError> {
        println!("You typed: {line}");
        Ok(())
    }

    fn keywords(&self) -> Option<BTreeSet<String>> {
        Some(self.words.clone())
    }
}
