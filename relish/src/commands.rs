//! Built-in meta-command registry
//!
//! Each built-in is a stateless handler implementing [`Command`]. The
//! registry is a fixed ordered list scanned on every line; the first handler
//! whose predicate matches wins and nothing after it runs. A line matching no
//! handler falls through to alias expansion and interpreter delegation.
//!
//! Handlers match on the raw line, before alias expansion, so aliases can
//! never shadow a control command.

use crate::session::Session;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

/// A built-in meta-command handler.
pub trait Command {
    /// Command words this handler answers to, e.g. `[".exit", ".quit"]`.
    /// These feed tab-completion and are matched as the line's first word.
    fn names(&self) -> &'static [&'static str];

    /// Whether this handler claims the (trimmed, unexpanded) line.
    fn matches(&self, line: &str) -> bool {
        self.names().iter().any(|name| word_matches(line, name))
    }

    /// Executes the command. Returns `true` to continue the loop, `false`
    /// to terminate the session.
    fn execute(&self, line: &str, session: &mut Session) -> bool;

    /// One help line, pre-formatted for `.help` output.
    fn describe(&self) -> &'static str;
}

/// The always-available recall syntax, shown by `.help` alongside the
/// registered handlers.
pub const RECALL_HELP: &str = "!N                    Recall command at position N";

fn word_matches(line: &str, name: &str) -> bool {
    match line.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Argument text after the command word, trimmed.
fn arg_of<'a>(line: &'a str, name: &str) -> &'a str {
    line.strip_prefix(name).unwrap_or("").trim()
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".exit", ".quit"]
    }

    fn execute(&self, _line: &str, _session: &mut Session) -> bool {
        println!("Bye!");
        false
    }

    fn describe(&self) -> &'static str {
        ".exit, .quit          Exit the REPL"
    }
}

pub struct HelpCommand;

impl Command for HelpCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".help"]
    }

    fn execute(&self, _line: &str, session: &mut Session) -> bool {
        println!("REPL meta-commands:");
        for description in session.command_descriptions() {
            println!("  {description}");
        }
        println!("  {RECALL_HELP}");
        true
    }

    fn describe(&self) -> &'static str {
        ".help                 Show this help message"
    }
}

pub struct ClearCommand;

impl Command for ClearCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".clear"]
    }

    fn execute(&self, _line: &str, _session: &mut Session) -> bool {
        // ANSI erase-display + cursor-home; best-effort on odd terminals.
        print!("\x1b[2J\x1b[1;1H");
        let _ = std::io::stdout().flush();
        true
    }

    fn describe(&self) -> &'static str {
        ".clear                Clear the screen"
    }
}

pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".history"]
    }

    fn execute(&self, _line: &str, session: &mut Session) -> bool {
        session.history().print();
        true
    }

    fn describe(&self) -> &'static str {
        ".history              Show command history"
    }
}

pub struct ReloadCommand;

impl Command for ReloadCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".reload"]
    }

    fn execute(&self, _line: &str, session: &mut Session) -> bool {
        match session.init_file().map(PathBuf::from) {
            Some(path) => session.load_file(&path, Some(".reload"), true),
            None => {
                println!("No file was originally loaded to reload.");
                true
            }
        }
    }

    fn describe(&self) -> &'static str {
        ".reload               Reload the init file"
    }
}

pub struct LoadCommand;

impl Command for LoadCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".load"]
    }

    fn execute(&self, line: &str, session: &mut Session) -> bool {
        let arg = arg_of(line, ".load");
        if arg.is_empty() {
            println!("Usage: .load <file>");
            return true;
        }
        let label = format!(".load {arg}");
        session.load_file(&PathBuf::from(arg), Some(&label), true)
    }

    fn describe(&self) -> &'static str {
        ".load <file>          Load a batch file"
    }
}

pub struct AliasCommand;

impl Command for AliasCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".alias"]
    }

    fn execute(&self, line: &str, session: &mut Session) -> bool {
        let arg = arg_of(line, ".alias");
        if arg.is_empty() {
            if session.aliases().is_empty() {
                println!("No aliases defined.");
            } else {
                for (name, expr) in session.aliases().iter() {
                    println!("{name} = {expr}");
                }
            }
            return true;
        }

        let Some((name, expr)) = arg.split_once('=') else {
            println!("Usage: .alias name=expression");
            return true;
        };
        let (name, expr) = (name.trim(), expr.trim());
        match session.aliases_mut().define(name, expr) {
            Ok(defined) => match defined.previous {
                Some(previous) => println!(
                    "Alias '{name}' replaced (was: {previous}) -> now: {}",
                    defined.stored
                ),
                None => println!("Alias added: {name} = {}", defined.stored),
            },
            Err(err) => println!("{err}"),
        }
        true
    }

    fn describe(&self) -> &'static str {
        ".alias [@name=expr]   Define or list aliases"
    }
}

pub struct UnaliasCommand;

impl Command for UnaliasCommand {
    fn names(&self) -> &'static [&'static str] {
        &[".unalias"]
    }

    fn execute(&self, line: &str, session: &mut Session) -> bool {
        let name = arg_of(line, ".unalias");
        if name.is_empty() {
            println!("Usage: .unalias @name");
            return true;
        }
        match session.aliases_mut().remove(name) {
            Some(_) => println!("Alias removed: {name}"),
            None => println!("No such alias: {name}"),
        }
        true
    }

    fn describe(&self) -> &'static str {
        ".unalias @name        Remove an alias"
    }
}

/// The fixed built-in registry, in dispatch order. Custom handlers may be
/// appended after these before the session starts; they still run ahead of
/// the alias-expand-and-evaluate fallback.
pub fn default_registry() -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(ExitCommand),
        Rc::new(HelpCommand),
        Rc::new(ClearCommand),
        Rc::new(HistoryCommand),
        Rc::new(ReloadCommand),
        Rc::new(LoadCommand),
        Rc::new(AliasCommand),
        Rc::new(UnaliasCommand),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_word_exact() {
        assert!(ExitCommand.matches(".exit"));
        assert!(ExitCommand.matches(".quit"));
        assert!(!ExitCommand.matches(".exited"));
        assert!(ExitCommand.matches(".exit now"));

        assert!(AliasCommand.matches(".alias"));
        assert!(AliasCommand.matches(".alias @x=1"));
        assert!(!AliasCommand.matches(".aliases"));
        assert!(!AliasCommand.matches(".unalias @x"));

        assert!(LoadCommand.matches(".load"));
        assert!(LoadCommand.matches(".load init.txt"));
        assert!(!LoadCommand.matches(".loaded"));
    }

    #[test]
    fn registry_starts_with_exit_and_scans_in_order() {
        let registry = default_registry();
        let first = registry
            .iter()
            .find(|cmd| cmd.matches(".exit"))
            .map(|cmd| cmd.names());
        assert_eq!(first, Some([".exit", ".quit"].as_slice()));
    }

    #[test]
    fn every_builtin_has_a_description() {
        for cmd in default_registry() {
            assert!(!cmd.describe().is_empty());
            assert!(!cmd.names().is_empty());
        }
    }
}
