//! relish - an embeddable REPL engine
//!
//! This crate turns any type implementing [`Interpreter`] (one method:
//! evaluate a line of text) into a full interactive shell with persistent
//! history, `@alias` macros, tab-completion candidates and a small set of
//! dot-prefixed meta-commands (`.exit`, `.help`, `.load`, ...).
//!
//! The engine is terminal-agnostic: input arrives through the [`LineReader`]
//! seam, so the same session runs against a line editor, a test script or a
//! batch file. See the `relish-cli` crate for the rustyline front-end and
//! the workspace's `interpreters/` members for complete embeddings.

pub mod alias;
pub mod commands;
mod complete;
pub mod error;
pub mod history;
pub mod interpreter;
mod loader;
pub mod reader;
pub mod session;

pub use alias::AliasTable;
pub use commands::{default_registry, Command};
pub use error::{ReplError, ReplResult};
pub use history::HistoryLog;
pub use interpreter::{EchoInterpreter, EvalError, Interpreter};
pub use reader::{LineReader, ReadEvent, ScriptedReader};
pub use session::{Session, SessionBuilder};
