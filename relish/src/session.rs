//! Session controller
//!
//! Owns the interpreter, alias table, history log and command registry, and
//! drives the read-process loop. The line-processing pipeline decides, in
//! priority order: empty line, `!N` recall, built-in command, alias
//! expansion, interpreter delegation, history recording.

use crate::alias::AliasTable;
use crate::commands::{default_registry, Command};
use crate::error::{ReplError, ReplResult};
use crate::history::HistoryLog;
use crate::interpreter::{EchoInterpreter, Interpreter};
use crate::reader::{LineReader, ReadEvent};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// An interactive session around a plugged-in interpreter.
pub struct Session {
    interpreter: Box<dyn Interpreter>,
    aliases: AliasTable,
    history: HistoryLog,
    commands: Vec<Rc<dyn Command>>,
    init_file: Option<PathBuf>,
    history_file: Option<PathBuf>,
    alias_file: Option<PathBuf>,
    startup_command: Option<String>,
    prompt: String,
    welcome: String,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// The most recently preloaded batch file, re-run by `.reload`.
    pub fn init_file(&self) -> Option<&Path> {
        self.init_file.as_deref()
    }

    pub fn set_init_file(&mut self, path: impl Into<PathBuf>) {
        self.init_file = Some(path.into());
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Help line for every registered handler, in dispatch order.
    pub fn command_descriptions(&self) -> Vec<&'static str> {
        self.commands.iter().map(|cmd| cmd.describe()).collect()
    }

    pub(crate) fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().flat_map(|cmd| cmd.names()).copied()
    }

    pub(crate) fn interpreter_keywords(&self) -> Option<std::collections::BTreeSet<String>> {
        self.interpreter.keywords()
    }

    /// Runs the registry over a raw line. `Some(continue)` if a handler
    /// claimed it, `None` if the line falls through to evaluation.
    ///
    /// Handlers are scanned in registration order and the first match wins.
    /// The matched handler is cloned out of the registry before executing so
    /// re-entrant commands (`.load`, `.reload`) can dispatch again.
    pub(crate) fn dispatch_command(&mut self, line: &str) -> Option<bool> {
        let handler = self.commands.iter().find(|cmd| cmd.matches(line)).cloned();
        handler.map(|cmd| cmd.execute(line, self))
    }

    pub(crate) fn delegate(&mut self, text: &str) -> ReplResult<()> {
        self.interpreter
            .eval(text)
            .map_err(|err| ReplError::Eval(err.to_string()))
    }

    /// Processes a single line of input. Returns `true` to continue the
    /// loop, `false` to terminate the session.
    pub fn process_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }

        // Recall: !N re-runs the stored line through this same pipeline, so
        // recalled meta-commands and aliases behave exactly as typed. The
        // !N line itself is never recorded, which bounds the recursion.
        if let Some(rest) = line.strip_prefix('!') {
            match rest.trim().parse::<i64>() {
                Ok(index) => {
                    let recalled = usize::try_from(index)
                        .ok()
                        .and_then(|i| self.history.get(i))
                        .map(str::to_owned);
                    match recalled {
                        Some(recalled) => {
                            println!("# {recalled}");
                            return self.process_line(&recalled);
                        }
                        None => println!("{}", ReplError::RecallIndex(index)),
                    }
                }
                Err(_) => println!("Use !N to recall a command by its index."),
            }
            return true;
        }

        // Built-ins match on the raw line and short-circuit: no expansion,
        // no history recording.
        if let Some(proceed) = self.dispatch_command(line) {
            return proceed;
        }

        let expanded = match self.aliases.expand(line) {
            Ok(expanded) => expanded,
            Err(err) => {
                eprintln!("Alias error: {err}");
                return true;
            }
        };

        if let Err(err) = self.delegate(&expanded) {
            eprintln!("Error: {err}");
        }

        // The original, unexpanded line is what history remembers.
        self.history.push(line);
        true
    }

    /// Runs the interactive loop to completion.
    ///
    /// Startup loads persisted history and aliases, replays the init file
    /// and the one-shot startup command; shutdown persists history and
    /// aliases on every exit path.
    pub fn run(&mut self, reader: &mut dyn LineReader) {
        if self.startup() {
            self.serve(reader);
        }
        self.shutdown();
    }

    fn startup(&mut self) -> bool {
        if let Some(path) = self.history_file.clone() {
            self.history.load(&path);
        }
        if let Some(path) = self.alias_file.clone() {
            self.aliases.load(&path);
        }
        if let Some(path) = self.init_file.clone() {
            if !self.load_file(&path, Some("init file"), false) {
                return false;
            }
        }
        if let Some(command) = self.startup_command.take() {
            if let Err(err) = self.delegate(&command) {
                eprintln!("Error: {err}");
            }
            self.history.push(&command);
        }
        true
    }

    fn serve(&mut self, reader: &mut dyn LineReader) {
        println!("{}", self.welcome);
        tracing::debug!("session started with prompt: {}", self.prompt);

        loop {
            let prompt = self.prompt.clone();
            match reader.read_line(&prompt, self) {
                ReadEvent::Line(line) => {
                    if !self.process_line(&line) {
                        break;
                    }
                }
                ReadEvent::Interrupted => {
                    println!("Use .exit, .quit or Ctrl-D to leave.");
                }
                ReadEvent::Eof => {
                    println!("Bye!");
                    break;
                }
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(err) = self.history.save(path) {
                eprintln!("Error saving history to {}: {err}", path.display());
            }
        }
        if let Some(path) = &self.alias_file {
            if let Err(err) = self.aliases.save(path) {
                eprintln!("Error saving aliases to {}: {err}", path.display());
            }
        }
    }
}

/// Builder for [`Session`].
///
/// Defaults: the echo interpreter, prompt `>>> `, a friendly welcome line,
/// a 1000-entry history cap and no persistence paths.
pub struct SessionBuilder {
    interpreter: Box<dyn Interpreter>,
    prompt: String,
    welcome: String,
    history_limit: usize,
    history_file: Option<PathBuf>,
    alias_file: Option<PathBuf>,
    init_file: Option<PathBuf>,
    startup_command: Option<String>,
    extra_commands: Vec<Rc<dyn Command>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            interpreter: Box::new(EchoInterpreter::new()),
            prompt: ">>> ".to_string(),
            welcome: "Welcome to the REPL!".to_string(),
            history_limit: 1000,
            history_file: None,
            alias_file: None,
            init_file: None,
            startup_command: None,
            extra_commands: Vec::new(),
        }
    }

    pub fn interpreter(mut self, interpreter: Box<dyn Interpreter>) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Maximum number of history entries kept in memory and persisted.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// File the history log is loaded from at startup and saved to at exit.
    pub fn history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// File the alias table is loaded from at startup and saved to at exit.
    pub fn alias_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.alias_file = Some(path.into());
        self
    }

    /// Batch file executed during startup and remembered for `.reload`.
    pub fn init_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.init_file = Some(path.into());
        self
    }

    /// One-shot command evaluated after the init file, before the loop.
    pub fn startup_command(mut self, command: impl Into<String>) -> Self {
        self.startup_command = Some(command.into());
        self
    }

    /// Appends a custom handler after the built-ins; it still runs before
    /// the alias-expand-and-evaluate fallback.
    pub fn command(mut self, command: Rc<dyn Command>) -> Self {
        self.extra_commands.push(command);
        self
    }

    pub fn build(self) -> Session {
        let mut commands = default_registry();
        commands.extend(self.extra_commands);
        Session {
            interpreter: self.interpreter,
            aliases: AliasTable::new(),
            history: HistoryLog::new(self.history_limit),
            commands,
            init_file: self.init_file,
            history_file: self.history_file,
            alias_file: self.alias_file,
            startup_command: self.startup_command,
            prompt: self.prompt,
            welcome: self.welcome,
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
