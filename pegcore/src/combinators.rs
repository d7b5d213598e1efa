//! Constructors for primitive matchers and the combinators that compose
//! them.
//!
//! Every function returns a new `Matcher`; the arguments are shared, never
//! modified.

use std::fmt::Display;
use std::ops::{Add, BitOr};

use once_cell::sync::OnceCell;

use crate::action::Action;
use crate::charset::CharSet;
use crate::matcher::{Matcher, Node};
use crate::value::Value;

/// Matches `text` exactly.
pub fn literal(text: &str) -> Matcher {
    Matcher::from_node(Node::Literal(text.to_owned()))
}

/// Matches the longest run of characters that starts with one from
/// `leading` and continues with ones from `body`.
pub fn word(leading: impl Into<CharSet>, body: impl Into<CharSet>) -> Matcher {
    Matcher::from_node(Node::Word {
        leading: leading.into(),
        body: body.into(),
    })
}

/// A `word` whose body uses the same characters as its first character.
pub fn word_of(chars: impl Into<CharSet>) -> Matcher {
    let chars = chars.into();
    word(chars.clone(), chars)
}

/// Matches a string delimited by `quote`. `escape` followed by `quote`
/// stands for a literal quote; the value is the decoded content.
pub fn quoted_string(quote: char, escape: char) -> Matcher {
    Matcher::from_node(Node::QuotedString { quote, escape })
}

/// Succeeds only when nothing but whitespace remains.
pub fn end_of_input() -> Matcher {
    Matcher::from_node(Node::EndOfInput)
}

/// Matches each of `matchers` in turn.
pub fn sequence(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::from_node(Node::Sequence(matchers.into_iter().collect()))
}

/// Ordered choice: the first alternative that matches wins.
pub fn choice(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::from_node(Node::Choice(matchers.into_iter().collect()))
}

/// A choice of literals, tried in the given order except that a word is
/// moved ahead of any earlier word that is its prefix, so `<=` is never
/// shadowed by `<`.
pub fn one_of<'a>(words: impl IntoIterator<Item = &'a str>) -> Matcher {
    let mut ordered: Vec<&str> = Vec::new();
    for word in words {
        match ordered.iter().position(|earlier| word.starts_with(earlier)) {
            Some(idx) => ordered.insert(idx, word),
            None => ordered.push(word),
        }
    }
    choice(ordered.into_iter().map(literal))
}

/// Matches `matcher` at least `min` and at most `max` times. A `max` below
/// `min` never matches.
pub fn repeat(matcher: Matcher, min: usize, max: Option<usize>) -> Matcher {
    Matcher::from_node(Node::Repeat {
        inner: matcher,
        min,
        max,
    })
}

pub fn one_or_more(matcher: Matcher) -> Matcher {
    repeat(matcher, 1, None)
}

pub fn zero_or_more(matcher: Matcher) -> Matcher {
    repeat(matcher, 0, None)
}

pub fn optional(matcher: Matcher) -> Matcher {
    repeat(matcher, 0, Some(1))
}

/// Consumes input like `matcher`, but drops its values from the result.
pub fn suppress(matcher: Matcher) -> Matcher {
    Matcher::from_node(Node::Suppress(matcher))
}

/// Also records the matched value under `name`.
pub fn name_as(matcher: Matcher, name: &str) -> Matcher {
    Matcher::from_node(Node::Named {
        inner: matcher,
        name: name.to_owned(),
    })
}

/// Reports failures of `matcher` as `expected <label>`.
pub fn labeled(matcher: Matcher, label: &str) -> Matcher {
    Matcher::from_node(Node::Labeled {
        inner: matcher,
        label: label.to_owned(),
    })
}

/// Replace the values `matcher` produces with the result of `action`.
///
/// Applying `with_action` to a matcher that already has actions appends to
/// its pipeline: the new action receives the previous action's result.
pub fn with_action<F, E>(matcher: Matcher, action: F) -> Matcher
where
    F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
    E: Display,
{
    let action = Action::new(action);
    if let Node::WithAction { inner, actions } = matcher.node() {
        let mut actions = actions.clone();
        actions.push(action);
        return Matcher::from_node(Node::WithAction {
            inner: inner.clone(),
            actions,
        });
    }
    Matcher::from_node(Node::WithAction {
        inner: matcher,
        actions: vec![action],
    })
}

/// A placeholder to be bound later with `Matcher::define`, for recursive
/// grammars.
pub fn forward() -> Matcher {
    Matcher::from_node(Node::Forward(OnceCell::new()))
}

impl Matcher {
    /// Sequence with `other`, extending `self` if it already is a sequence.
    pub fn and(self, other: Matcher) -> Matcher {
        if let Node::Sequence(items) = self.node() {
            let mut items = items.clone();
            items.push(other);
            return sequence(items);
        }
        sequence(vec![self, other])
    }

    /// Ordered choice with `other`, extending `self` if it already is a choice.
    pub fn or(self, other: Matcher) -> Matcher {
        if let Node::Choice(items) = self.node() {
            let mut items = items.clone();
            items.push(other);
            return choice(items);
        }
        choice(vec![self, other])
    }

    pub fn one_or_more(self) -> Matcher {
        one_or_more(self)
    }

    pub fn zero_or_more(self) -> Matcher {
        zero_or_more(self)
    }

    pub fn optional(self) -> Matcher {
        optional(self)
    }

    pub fn suppress(self) -> Matcher {
        suppress(self)
    }

    pub fn name_as(self, name: &str) -> Matcher {
        name_as(self, name)
    }

    pub fn labeled(self, label: &str) -> Matcher {
        labeled(self, label)
    }

    pub fn with_action<F, E>(self, action: F) -> Matcher
    where
        F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        with_action(self, action)
    }
}

impl Add for Matcher {
    type Output = Matcher;

    fn add(self, other: Matcher) -> Matcher {
        self.and(other)
    }
}

impl BitOr for Matcher {
    type Output = Matcher;

    fn bitor(self, other: Matcher) -> Matcher {
        self.or(other)
    }
}
