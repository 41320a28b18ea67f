//! rustyline-backed implementation of the engine's input seam

use crate::completer::{ReplHelper, WordSet};
use relish::{LineReader, ReadEvent, Session};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, Config, Editor};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Interactive reader wrapping a rustyline editor.
///
/// The editor keeps its own in-memory navigation history (arrow keys),
/// seeded from the session's log on first read; the engine remains the only
/// writer of the persisted history file.
pub struct RustylineReader {
    editor: Editor<ReplHelper, FileHistory>,
    words: WordSet,
    seeded: bool,
}

impl RustylineReader {
    pub fn new(max_history: usize) -> rustyline::Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .max_history_size(max_history)?
            .history_ignore_dups(true)?
            .build();

        let words: WordSet = Rc::new(RefCell::new(BTreeSet::new()));
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(ReplHelper::new(words.clone())));

        Ok(Self {
            editor,
            words,
            seeded: false,
        })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str, session: &Session) -> ReadEvent {
        if !self.seeded {
            for entry in session.history().iter() {
                let _ = self.editor.add_history_entry(entry);
            }
            self.seeded = true;
        }

        *self.words.borrow_mut() = session.completion_words();

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                ReadEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => ReadEvent::Interrupted,
            Err(ReadlineError::Eof) => ReadEvent::Eof,
            Err(err) => {
                eprintln!("Error: {err:?}");
                ReadEvent::Eof
            }
        }
    }
}
