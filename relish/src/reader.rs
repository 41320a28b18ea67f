//! Input seam between the session loop and the terminal
//!
//! The engine never talks to a terminal directly: it asks a [`LineReader`]
//! for the next line and reacts to the three things a blocking read can
//! produce. The CLI front-end implements this with a line editor; tests use
//! [`ScriptedReader`].

use crate::session::Session;
use std::collections::VecDeque;

/// Outcome of one blocking read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A line of input (not yet trimmed)
    Line(String),
    /// The read was interrupted (Ctrl-C); the loop prints a hint and resumes
    Interrupted,
    /// End of input (Ctrl-D); equivalent to the exit command
    Eof,
}

/// Blocking source of input lines.
///
/// The session is passed in so interactive implementations can refresh
/// completion state from it before blocking; non-interactive implementations
/// ignore it.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str, session: &Session) -> ReadEvent;
}

/// Replays a fixed sequence of events, then reports end-of-input.
///
/// Useful for driving a session from tests or for non-interactive embedding.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    events: VecDeque<ReadEvent>,
}

impl ScriptedReader {
    /// A reader that yields each given line in order.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: lines
                .into_iter()
                .map(|line| ReadEvent::Line(line.into()))
                .collect(),
        }
    }

    /// A reader that replays arbitrary events in order.
    pub fn events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = ReadEvent>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str, _session: &Session) -> ReadEvent {
        self.events.pop_front().unwrap_or(ReadEvent::Eof)
    }
}
