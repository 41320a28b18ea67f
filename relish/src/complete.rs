//! Completion-candidate aggregation
//!
//! Candidates are recomputed from scratch on every request; the sets
//! involved are small.

use crate::session::Session;
use std::collections::BTreeSet;

impl Session {
    /// The full candidate universe: built-in command names, interpreter
    /// keywords (when that capability is present), alias names, and every
    /// whitespace-delimited token across the history log. Deduplicated and
    /// lexicographically ordered.
    pub fn completion_words(&self) -> BTreeSet<String> {
        let mut words = BTreeSet::new();

        words.extend(self.command_names().map(str::to_owned));

        if let Some(keywords) = self.interpreter_keywords() {
            words.extend(keywords);
        }

        words.extend(self.aliases().names().map(str::to_owned));

        for entry in self.history().iter() {
            words.extend(entry.split_whitespace().map(str::to_owned));
        }

        words
    }

    /// Sorted distinct candidates starting with `prefix`.
    pub fn completion_candidates(&self, prefix: &str) -> Vec<String> {
        self.completion_words()
            .into_iter()
            .filter(|word| word.starts_with(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{EvalError, Interpreter};

    struct NoKeywords;

    impl Interpreter for NoKeywords {
        fn eval(&mut self, _line: &str) -> Result<(), EvalError> {
            Ok(())
        }
    }

    struct FixedKeywords;

    impl Interpreter for FixedKeywords {
        fn eval(&mut self, _line: &str) -> Result<(), EvalError> {
            Ok(())
        }

        fn keywords(&self) -> Option<BTreeSet<String>> {
            Some(
                ["drop", "duplicate", "push", "pop"]
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            )
        }
    }

    #[test]
    fn builtin_names_complete() {
        let session = Session::builder().interpreter(Box::new(NoKeywords)).build();
        let candidates = session.completion_candidates(".h");
        assert!(candidates.contains(&".help".to_string()));
        assert!(candidates.contains(&".history".to_string()));
        assert!(!candidates.contains(&".exit".to_string()));
    }

    #[test]
    fn interpreter_keywords_complete() {
        let session = Session::builder()
            .interpreter(Box::new(FixedKeywords))
            .build();
        let candidates = session.completion_candidates("d");
        assert_eq!(candidates, vec!["drop", "duplicate"]);
    }

    #[test]
    fn missing_keyword_capability_degrades_silently() {
        let session = Session::builder().interpreter(Box::new(NoKeywords)).build();
        assert!(session.completion_candidates("d").is_empty());
    }

    #[test]
    fn alias_names_complete() {
        let mut session = Session::builder().interpreter(Box::new(NoKeywords)).build();
        session.aliases_mut().define("@abc", "A or B").unwrap();
        assert_eq!(session.completion_candidates("@a"), vec!["@abc"]);
    }

    #[test]
    fn history_tokens_complete_individually() {
        let mut session = Session::builder().interpreter(Box::new(NoKeywords)).build();
        session.history_mut().push("run this");
        session.history_mut().push("drop that");

        let candidates = session.completion_candidates("d");
        assert!(candidates.contains(&"drop".to_string()));
        assert!(!candidates.contains(&"drop that".to_string()));
        assert!(!candidates.contains(&"that".to_string()));
    }

    #[test]
    fn candidates_are_sorted_and_distinct() {
        let mut session = Session::builder()
            .interpreter(Box::new(FixedKeywords))
            .build();
        session.history_mut().push("pop pop push");

        let candidates = session.completion_candidates("p");
        assert_eq!(candidates, vec!["pop", "push"]);
    }
}
