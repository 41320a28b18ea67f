//! History log
//!
//! An ordered, 1-indexed log of accepted input lines with consecutive-dup
//! suppression, owned by the session rather than hidden in global terminal
//! state so tests can substitute an in-memory log for a real file.

use std::fs;
use std::path::Path;

/// Ordered log of accepted raw input lines.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<String>,
    max_entries: usize,
}

impl HistoryLog {
    /// Creates an empty log holding at most `max_entries` lines; older lines
    /// are discarded first once the cap is reached.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Appends a line unless it is identical to the immediately preceding
    /// entry. Returns whether the line was stored.
    pub fn push(&mut self, line: &str) -> bool {
        if self.entries.last().map(String::as_str) == Some(line) {
            return false;
        }
        self.entries.push(line.to_string());
        let overflow = self.entries.len().saturating_sub(self.max_entries);
        if overflow > 0 {
            self.entries.drain(..overflow);
        }
        true
    }

    /// Returns the entry at a 1-based index.
    pub fn get(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.entries.get(index - 1).map(String::as_str)
    }

    /// Entries oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Prints the log to stdout, 1-indexed.
    pub fn print(&self) {
        for (i, entry) in self.entries.iter().enumerate() {
            println!("{}: {entry}", i + 1);
        }
    }

    /// Loads entries from a newline-delimited file. A missing file is not an
    /// error; the de-duplication rule applies while loading.
    pub fn load(&mut self, path: &Path) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("History file not found: {}", path.display());
                return;
            }
            Err(err) => {
                eprintln!("Error loading history file {}: {err}", path.display());
                return;
            }
        };
        for line in content.lines() {
            if !line.is_empty() {
                self.push(line);
            }
        }
        tracing::info!("Loaded history file: {}", path.display());
    }

    /// Saves the log as newline-delimited plain text.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        fs::write(path, out)?;
        tracing::info!("Saved history to: {}", path.display());
        Ok(())
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(1000)
    }
}
