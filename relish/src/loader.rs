//! Batch-file loading
//!
//! A batch file is newline-delimited commands: blank lines and `#` comments
//! are skipped, everything else goes through the same dispatch as
//! interactive input. One bad line never aborts the batch.

use crate::session::Session;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

impl Session {
    /// Loads and executes each command from a file.
    ///
    /// `label` names the operation in messages (`init file`, `.reload`,
    /// `.load <path>`); `show_errors` gates per-line evaluation errors,
    /// which the init file suppresses. Every successfully processed line is
    /// appended to history under the usual de-duplication rule.
    ///
    /// A missing file is reported and the call is a no-op. The returned
    /// flag is the loop continuation signal: a termination command inside
    /// the file stops the batch and propagates.
    pub fn load_file(&mut self, path: &Path, label: Option<&str>, show_errors: bool) -> bool {
        let name = label.map_or_else(|| path.display().to_string(), str::to_string);

        if !path.exists() {
            println!("{} not found: {}", label.unwrap_or("File"), path.display());
            return true;
        }

        println!("Loading {name}...");

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                println!("Failed to read {name}: {err}");
                return true;
            }
        };

        for raw in BufReader::new(file).lines() {
            let raw = match raw {
                Ok(raw) => raw,
                Err(err) => {
                    println!("Failed to read {name}: {err}");
                    break;
                }
            };
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(proceed) = self.dispatch_command(line) {
                self.history_mut().push(line);
                if !proceed {
                    return false;
                }
                continue;
            }

            let expanded = match self.aliases().expand(line) {
                Ok(expanded) => expanded,
                Err(err) => {
                    println!("Alias error in {name}: {err}");
                    continue;
                }
            };

            match self.delegate(&expanded) {
                Ok(()) => {
                    self.history_mut().push(line);
                }
                Err(err) => {
                    if show_errors {
                        println!("Error in {name}: {err}");
                    }
                }
            }
        }

        true
    }
}
