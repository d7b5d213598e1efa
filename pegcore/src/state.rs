use crate::config::ParseConfig;
use crate::cursor::{Checkpoint, Cursor};
use crate::results::MatchResult;
use crate::span::Span;
use crate::value::Value;

/// Everything needed to undo a failed attempt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    at: Checkpoint,
    values: usize,
    named: usize,
}

/// Parser state for one top-level parse call.
///
/// Values and names are appended as matches succeed, and truncated back to
/// a `Mark` when an attempt fails.
#[derive(Debug)]
pub(crate) struct State<'a> {
    pub cursor: Cursor<'a>,
    pub config: &'a ParseConfig,
    pub values: Vec<Value>,
    /// Names in the order they matched. Later entries shadow earlier ones.
    pub named: Vec<(String, Value)>,
    /// Current nesting through forward references.
    pub depth: usize,
}

impl<'a> State<'a> {
    pub fn new(input: &'a str, config: &'a ParseConfig) -> Self {
        State {
            cursor: Cursor::new(input),
            config,
            values: Vec::new(),
            named: Vec::new(),
            depth: 0,
        }
    }

    pub fn mark(&self) -> Mark {
        Mark {
            at: self.cursor.save(),
            values: self.values.len(),
            named: self.named.len(),
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        self.cursor.restore(mark.at);
        self.values.truncate(mark.values);
        self.named.truncate(mark.named);
    }

    pub fn skip_whitespace(&mut self) {
        self.cursor.skip_whitespace(&self.config.whitespace);
    }

    /// Text between a checkpoint and the current position.
    pub fn slice_from(&self, start: &Checkpoint) -> &'a str {
        &self.cursor.input()[start.offset..self.cursor.offset()]
    }

    /// Forget accumulated values so the state can be reused for another
    /// match attempt further along the same input.
    pub fn clear(&mut self) {
        self.values.clear();
        self.named.clear();
        self.depth = 0;
    }

    /// Collect what has been matched since `start` into a result.
    pub fn take_result(&mut self, start: &Checkpoint) -> MatchResult {
        let span = Span::from_checkpoints(start, &self.cursor.save());
        let values = std::mem::take(&mut self.values);
        let named = std::mem::take(&mut self.named);
        MatchResult::new(values, named, span)
    }
}
