use crate::cursor::Checkpoint;

/// A byte region over the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn from_checkpoints(start: &Checkpoint, end: &Checkpoint) -> Self {
        debug_assert!(start.offset <= end.offset);
        Span {
            start: start.offset,
            end: end.offset,
        }
    }

    /// The text this span covers. `input` must be the string that was parsed.
    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
