//! rustyline helper backed by the engine's completion aggregator

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Candidate universe shared between the reader (which refreshes it from the
/// session before every read) and the helper (which filters it on tab).
pub(crate) type WordSet = Rc<RefCell<BTreeSet<String>>>;

pub struct ReplHelper {
    words: WordSet,
}

impl ReplHelper {
    pub(crate) fn new(words: WordSet) -> Self {
        Self { words }
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);

        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let words = self.words.borrow();
        let completions = words
            .iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();

        Ok((start, completions))
    }
}

// Only whitespace delimits words, so '.' and '@' stay part of the token and
// ".he" or "@al" complete to ".help" / "@alias-name".
fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ReplHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}
