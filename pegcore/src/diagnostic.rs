use std::fmt::{self, Display};

use thiserror::Error;

use crate::charset::CharSet;
use crate::cursor::Checkpoint;

/// Something a matcher wanted to see at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Literal(String),
    Word { leading: CharSet, body: CharSet },
    Quoted(char),
    EndOfInput,
    Label(String),
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Literal(s) => write!(f, "'{}'", s),
            Expected::Word { leading, body } if leading == body => write!(f, "W:({})", leading),
            Expected::Word { leading, body } => write!(f, "W:({}, {})", leading, body),
            Expected::Quoted(q) => write!(f, "quoted string starting with {}", q),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Why a match attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reason {
    /// One or more expectations, all at the same position.
    Expected(Vec<Expected>),
    UnterminatedString,
    Action(String),
    RecursionLimit(usize),
}

/// A failed match attempt. Failures are ordinary values; only the one that
/// escapes the top-level parse becomes a `Diagnostic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub at: Checkpoint,
    pub reason: Reason,
}

impl Failure {
    pub fn expected(at: Checkpoint, expected: Expected) -> Self {
        Failure {
            at,
            reason: Reason::Expected(vec![expected]),
        }
    }

    /// A failure no alternative can recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self.reason, Reason::RecursionLimit(_))
    }

    /// Combine the failures of two alternatives. The one that got further
    /// wins; at equal offsets plain expectations are pooled.
    pub fn merge(self, other: Failure) -> Failure {
        if other.at.offset > self.at.offset {
            return other;
        }
        if other.at.offset < self.at.offset {
            return self;
        }
        match (self.reason, other.reason) {
            (Reason::Expected(mut mine), Reason::Expected(theirs)) => {
                for e in theirs {
                    if !mine.contains(&e) {
                        mine.push(e);
                    }
                }
                Failure {
                    at: self.at,
                    reason: Reason::Expected(mine),
                }
            }
            (reason, _) => Failure {
                at: self.at,
                reason,
            },
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        let (kind, expectation) = match self.reason {
            Reason::Expected(expected) => {
                let kind = if expected == [Expected::EndOfInput] {
                    ErrorKind::TrailingInput
                } else {
                    ErrorKind::Mismatch
                };
                let items: Vec<String> = expected.iter().map(ToString::to_string).collect();
                (kind, format!("expected {}", items.join(" or ")))
            }
            Reason::UnterminatedString => (
                ErrorKind::UnterminatedQuotedString,
                "unterminated quoted string".to_owned(),
            ),
            Reason::Action(msg) => (ErrorKind::ActionFailure, msg),
            Reason::RecursionLimit(depth) => (
                ErrorKind::RecursionLimit,
                format!("recursion limit of {} exceeded", depth),
            ),
        };
        Diagnostic {
            offset: self.at.offset,
            line: self.at.line,
            column: self.at.column,
            expectation,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A sub-grammar did not match.
    Mismatch,
    UnterminatedQuotedString,
    /// A parse action rejected its input.
    ActionFailure,
    /// An explicit end-of-input check found unparsed content.
    TrailingInput,
    RecursionLimit,
}

/// The error returned by a failed top-level parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{expectation} (at char {offset}), (line:{line}, col:{column})")]
pub struct Diagnostic {
    /// Byte offset of the offending character.
    pub offset: usize,
    pub line: usize,
    /// Character column within the line, 1-based.
    pub column: usize,
    pub expectation: String,
    pub kind: ErrorKind,
}

impl Diagnostic {
    /// Render the line containing the error with `>!<` inserted before the
    /// offending character. `input` must be the text that was parsed.
    pub fn marked_line(&self, input: &str) -> String {
        let offset = self.offset.min(input.len());
        let line_start = input[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line_end = input[offset..]
            .find('\n')
            .map_or(input.len(), |i| offset + i);
        format!(
            "{}>!<{}",
            &input[line_start..offset],
            &input[offset..line_end]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: usize) -> Checkpoint {
        Checkpoint {
            offset,
            line: 1,
            column: offset + 1,
        }
    }

    #[test]
    fn merge_prefers_furthest() {
        let a = Failure::expected(at(0), Expected::Literal("a".into()));
        let b = Failure::expected(at(3), Expected::Literal("b".into()));
        assert_eq!(a.clone().merge(b.clone()), b);
        assert_eq!(b.clone().merge(a), b);
    }

    #[test]
    fn merge_pools_ties() {
        let a = Failure::expected(at(0), Expected::Literal("float".into()));
        let b = Failure::expected(at(0), Expected::Literal("int".into()));
        let d = a.merge(b).into_diagnostic();
        assert_eq!(d.expectation, "expected 'float' or 'int'");
        assert_eq!(d.kind, ErrorKind::Mismatch);
    }

    #[test]
    fn diagnostic_display() {
        let d = Failure::expected(at(12), Expected::Literal(";".into())).into_diagnostic();
        assert_eq!(d.to_string(), "expected ';' (at char 12), (line:1, col:13)");
    }

    #[test]
    fn trailing_input_kind() {
        let d = Failure::expected(at(17), Expected::EndOfInput).into_diagnostic();
        assert_eq!(d.kind, ErrorKind::TrailingInput);
        assert_eq!(d.expectation, "expected end of input");
    }

    #[test]
    fn marked_line() {
        let input = "first\ndouble x = 7, y = 9;\nlast";
        let d = Diagnostic {
            offset: 18,
            line: 2,
            column: 13,
            expectation: "expected ';'".into(),
            kind: ErrorKind::Mismatch,
        };
        assert_eq!(d.marked_line(input), "double x = 7>!<, y = 9;");
    }
}
