//! Terminal glue for the relish engine
//!
//! Provides the clap argument surface, the layered settings resolution
//! (flags > environment > config file > defaults), file-backed logging and
//! the rustyline reader. Interpreter binaries call [`launch`] with their
//! interpreter and parsed [`Args`] and get the whole interactive surface
//! for free.

mod completer;
mod reader;

pub use reader::RustylineReader;

use clap::Parser;
use relish::{Interpreter, Session};
use relish_config::{expand_path, RelishConfig};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Generic REPL command line.
#[derive(Parser, Debug, Default)]
#[command(name = "relish", version, about = "Generic REPL CLI")]
pub struct Args {
    /// Prompt text
    #[arg(long, env = "RELISH_PROMPT")]
    pub prompt: Option<String>,

    /// Welcome message
    #[arg(long, env = "RELISH_WELCOME")]
    pub hello: Option<String>,

    /// Path to the history file
    #[arg(long, env = "RELISH_HISTORY_FILE")]
    pub history: Option<String>,

    /// Path to the alias file
    #[arg(long = "alias-file", env = "RELISH_ALIAS_FILE")]
    pub alias_file: Option<String>,

    /// Log file path
    #[arg(long, env = "RELISH_LOG_FILE")]
    pub log: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, env = "RELISH_LOG_LEVEL")]
    pub loglevel: Option<String>,

    /// Command to execute before entering the loop
    #[arg(long)]
    pub run: Option<String>,

    /// Batch file executed at startup and remembered for .reload
    #[arg(long)]
    pub file: Option<String>,

    /// Explicit configuration file
    #[arg(long)]
    pub config: Option<String>,
}

/// Builds a session from `args` and the layered configuration, then runs the
/// interactive loop against a rustyline reader.
pub fn launch(
    interpreter: Box<dyn Interpreter>,
    args: Args,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => relish_config::load_from_file(path)?,
        None => relish_config::load().unwrap_or_else(|err| {
            eprintln!("Warning: could not load configuration: {err}");
            RelishConfig::default()
        }),
    };

    let log_path = expand_path(args.log.as_deref().unwrap_or(&config.logging.file));
    let log_level = args
        .loglevel
        .as_deref()
        .unwrap_or_else(|| config.logging.level.as_str());
    init_logging(&log_path, log_level);

    let history_path = expand_path(args.history.as_deref().unwrap_or(&config.repl.history.file));
    let alias_path = expand_path(args.alias_file.as_deref().unwrap_or(&config.repl.aliases_file));
    tracing::debug!(
        "session files: history={}, aliases={}",
        history_path.display(),
        alias_path.display()
    );

    let mut builder = Session::builder()
        .interpreter(interpreter)
        .prompt(args.prompt.unwrap_or(config.repl.prompt))
        .welcome(args.hello.unwrap_or(config.repl.welcome))
        .history_limit(config.repl.history.max_entries)
        .alias_file(alias_path);
    if config.repl.history.enabled {
        builder = builder.history_file(history_path);
    }
    if let Some(file) = args.file {
        builder = builder.init_file(expand_path(&file));
    }
    if let Some(run) = args.run {
        builder = builder.startup_command(run);
    }
    let mut session = builder.build();

    let mut reader = RustylineReader::new(config.repl.history.max_entries)?;
    session.run(&mut reader);
    Ok(())
}

/// Routes tracing output to the log file so the subscriber never writes to
/// the terminal the prompt owns. Logging is skipped if the file cannot be
/// opened.
fn init_logging(path: &Path, level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file {}: {err}", path.display());
            return;
        }
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .try_init();
}
