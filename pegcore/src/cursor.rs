use crate::charset::CharSet;

/// A saved scan position. Restoring one is the only way the engine
/// backtracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset into the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl Checkpoint {
    fn start() -> Self {
        Checkpoint {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Keep track of a position within a str, updating on successful operations.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    at: Checkpoint,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            at: Checkpoint::start(),
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn offset(&self) -> usize {
        self.at.offset
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.at.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.at.offset == self.input.len()
    }

    pub fn save(&self) -> Checkpoint {
        self.at
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.offset <= self.input.len());
        self.at = checkpoint;
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume a single character, keeping line and column current.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.at.offset += c.len_utf8();
        if c == '\n' {
            self.at.line += 1;
            self.at.column = 1;
        } else {
            self.at.column += 1;
        }
        Some(c)
    }

    /// Move forward `n` characters, stopping early at the end of input.
    /// Returns how many characters were actually consumed.
    pub fn advance(&mut self, n: usize) -> usize {
        let mut moved = 0;
        while moved < n && self.bump().is_some() {
            moved += 1;
        }
        moved
    }

    /// Skip over any characters in `whitespace`.
    pub fn skip_whitespace(&mut self, whitespace: &CharSet) {
        while let Some(c) = self.peek_char() {
            if !whitespace.contains(c) {
                break;
            }
            self.bump();
        }
    }

    /// Check if a string matches the current input starting at the current
    /// index. The index will be updated on match.
    pub fn match_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.advance(s.chars().count());
            true
        } else {
            false
        }
    }
}
