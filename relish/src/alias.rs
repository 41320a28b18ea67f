//! Alias table and expansion
//!
//! Aliases are named macros of the form `@name` that expand to fixed
//! replacement text. Expansion is a single pass: an alias value that itself
//! mentions `@other` is emitted literally and never substituted further, so
//! there is no recursive macro expansion and no cycle detection.

use crate::error::{ReplError, ReplResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""[^"]*"|'[^']*'|@[A-Za-z_][A-Za-z0-9_]*|\w+|[^\s]"#).unwrap()
    })
}

fn alias_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Outcome of a successful alias definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defined {
    /// Previous value if the definition overwrote an existing alias
    pub previous: Option<String>,
    /// The value actually stored (the expression, expansion-checked and
    /// expanded against the table as it was at definition time)
    pub stored: String,
}

/// Mapping from alias name (`@name`) to replacement text.
///
/// Keys always match `@[A-Za-z_][A-Za-z0-9_]*`; iteration order is
/// alphabetical, which is also the order used when listing and saving.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Alias names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Inserts a raw entry without validation or expansion-checking.
    ///
    /// Callers are responsible for the key grammar; [`define`](Self::define)
    /// is the checked path used by the `.alias` command.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Expands every alias token in `line`.
    ///
    /// Tokens are matched preserving quoted substrings, so `"@x"` inside
    /// quotes is never treated as an alias. Each `@name` token is replaced
    /// with its value wrapped in parentheses; any undefined alias aborts the
    /// whole line with [`ReplError::UnknownAlias`]. Surviving tokens are
    /// joined with single spaces.
    pub fn expand(&self, line: &str) -> ReplResult<String> {
        if self.entries.is_empty() || !line.contains('@') {
            return Ok(line.to_string());
        }

        let mut result = Vec::new();
        for token in token_re().find_iter(line).map(|m| m.as_str()) {
            if alias_token_re().is_match(token) {
                match self.entries.get(token) {
                    Some(value) => result.push(format!("({value})")),
                    None => return Err(ReplError::UnknownAlias(token.to_string())),
                }
            } else {
                result.push(token.to_string());
            }
        }

        Ok(result.join(" "))
    }

    /// Defines or redefines an alias.
    ///
    /// The name must be `@` followed by an identifier and the expression must
    /// be non-empty. The expression is expansion-checked against the current
    /// table before storage, so a forward reference to a not-yet-defined
    /// alias fails here rather than at use time; the expanded form is what
    /// gets stored.
    pub fn define(&mut self, name: &str, expr: &str) -> ReplResult<Defined> {
        if !alias_token_re().is_match(name) {
            return Err(ReplError::InvalidAliasName(name.to_string()));
        }
        if expr.is_empty() {
            return Err(ReplError::EmptyAliasExpression);
        }

        let stored = self.expand(expr)?;
        let previous = self.entries.insert(name.to_string(), stored.clone());
        Ok(Defined { previous, stored })
    }

    /// Removes an alias, returning its value if it was defined.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Loads `.alias name = expr` directives from a file.
    ///
    /// A missing file is not an error. Lines that are not alias directives
    /// are ignored; malformed directives are reported and skipped.
    pub fn load(&mut self, path: &Path) {
        if !path.exists() {
            tracing::warn!("Aliases file not found: {}", path.display());
            return;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Error loading aliases file {}: {err}", path.display());
                return;
            }
        };
        for line in content.lines() {
            let line = line.trim();
            let Some(rest) = line.strip_prefix(".alias") else {
                continue;
            };
            let Some((name, expr)) = rest.trim().split_once('=') else {
                continue;
            };
            if let Err(err) = self.define(name.trim(), expr.trim()) {
                eprintln!("Error in aliases file {}: {err}", path.display());
            }
        }
        tracing::info!("Loaded aliases file: {}", path.display());
    }

    /// Saves every alias as a `.alias name = expr` directive, one per line,
    /// alphabetically by name. Round-trips with [`load`](Self::load).
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut out = String::new();
        for (name, expr) in &self.entries {
            out.push_str(&format!(".alias {name} = {expr}\n"));
        }
        fs::write(path, out)?;
        tracing::info!("Saved aliases to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_expansion() {
        let mut table = AliasTable::new();
        table.insert("@X", "A or B");
        assert_eq!(table.expand("@X and C").unwrap(), "(A or B) and C");
    }

    #[test]
    fn multiple_aliases() {
        let mut table = AliasTable::new();
        table.insert("@A", "True");
        table.insert("@B", "False");
        assert_eq!(table.expand("@A and @B").unwrap(), "(True) and (False)");
    }

    #[test]
    fn line_without_aliases_is_unchanged() {
        let table = AliasTable::new();
        assert_eq!(table.expand("A and B").unwrap(), "A and B");
    }

    #[test]
    fn expansion_is_not_recursive() {
        let mut table = AliasTable::new();
        table.insert("@A", "x");
        table.insert("@B", "@A 2 +");
        assert_eq!(table.expand("@B").unwrap(), "(@A 2 +)");
    }

    #[test]
    fn unknown_alias_aborts_whole_line() {
        let mut table = AliasTable::new();
        table.insert("@A", "True");
        let err = table.expand("@A1 and @A").unwrap_err();
        assert!(matches!(err, ReplError::UnknownAlias(name) if name == "@A1"));
    }

    #[test]
    fn quoted_tokens_are_opaque() {
        let mut table = AliasTable::new();
        table.insert("@X", "A");
        assert_eq!(table.expand(r#""@X" and @X"#).unwrap(), r#""@X" and (A)"#);
    }

    #[test]
    fn define_rejects_bad_names() {
        let mut table = AliasTable::new();
        assert!(matches!(
            table.define("X", "A"),
            Err(ReplError::InvalidAliasName(_))
        ));
        assert!(matches!(
            table.define("@1x", "A"),
            Err(ReplError::InvalidAliasName(_))
        ));
        assert!(matches!(
            table.define("@x", ""),
            Err(ReplError::EmptyAliasExpression)
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn define_checks_forward_references() {
        let mut table = AliasTable::new();
        let err = table.define("@B", "@A or C").unwrap_err();
        assert!(matches!(err, ReplError::UnknownAlias(name) if name == "@A"));
        assert!(table.is_empty());
    }

    #[test]
    fn define_stores_expanded_expression() {
        let mut table = AliasTable::new();
        table.define("@A", "x").unwrap();
        let defined = table.define("@B", "@A and y").unwrap();
        assert_eq!(defined.stored, "(x) and y");
        assert_eq!(table.get("@B"), Some("(x) and y"));
    }

    #[test]
    fn redefinition_reports_previous_value() {
        let mut table = AliasTable::new();
        assert_eq!(table.define("@X", "A").unwrap().previous, None);
        let defined = table.define("@X", "B").unwrap();
        assert_eq!(defined.previous.as_deref(), Some("A"));
        assert_eq!(table.get("@X"), Some("B"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases");

        let mut table = AliasTable::new();
        table.define("@b", "2 + 2").unwrap();
        table.define("@a", "A or B").unwrap();
        table.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, ".alias @a = A or B\n.alias @b = 2 + 2\n");

        let mut reloaded = AliasTable::new();
        reloaded.load(&path);
        assert_eq!(reloaded.get("@a"), Some("A or B"));
        assert_eq!(reloaded.get("@b"), Some("2 + 2"));
    }

    #[test]
    fn loading_missing_file_is_a_no_op() {
        let mut table = AliasTable::new();
        table.load(Path::new("/nonexistent/aliases"));
        assert!(table.is_empty());
    }
}
