//! Relish Configuration System
//!
//! Provides unified YAML-based configuration for relish front-ends.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/relish/relish.yaml` (system-wide)
//! 3. `~/.config/relish/relish.yaml` (user)
//! 4. `./relish.yaml` (project-local)
//! 5. `RELISH_CONFIG=/path/to/config.yaml` (explicit)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! repl:
//!   prompt: "bool> "
//!   welcome: "Welcome to the boolean calculator"
//!   aliases_file: "~/.relish_aliases"
//!   history:
//!     file: "~/.relish_history"
//!     max_entries: 1000
//!
//! logging:
//!   level: debug
//!   file: "~/.relish.log"
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

use std::path::PathBuf;

/// Load configuration from default locations.
///
/// Searches for config files in order; environment variables override file
/// values.
pub fn load() -> Result<RelishConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<RelishConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
