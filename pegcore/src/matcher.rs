use std::sync::{Arc, Weak};

use anyhow::anyhow;
use once_cell::sync::OnceCell;

use crate::action::{run_pipeline, Action};
use crate::charset::CharSet;
use crate::diagnostic::{Expected, Failure, Reason};
use crate::state::State;
use crate::value::Value;

pub(crate) type MatchOutcome = Result<(), Failure>;

/// A grammar expression node.
#[derive(Debug)]
pub(crate) enum Node {
    Literal(String),
    Word {
        leading: CharSet,
        body: CharSet,
    },
    QuotedString {
        quote: char,
        escape: char,
    },
    Sequence(Vec<Matcher>),
    Choice(Vec<Matcher>),
    Repeat {
        inner: Matcher,
        min: usize,
        max: Option<usize>,
    },
    Suppress(Matcher),
    Named {
        inner: Matcher,
        name: String,
    },
    WithAction {
        inner: Matcher,
        actions: Vec<Action>,
    },
    Labeled {
        inner: Matcher,
        label: String,
    },
    /// A late-bound reference. Holds its target weakly so recursive rules
    /// don't leak.
    Forward(OnceCell<Weak<Node>>),
    EndOfInput,
}

/// An immutable grammar expression. Cloning is cheap and shares the tree,
/// so one grammar can serve any number of parse calls, on any thread.
#[derive(Debug, Clone)]
pub struct Matcher(pub(crate) Arc<Node>);

impl Matcher {
    pub(crate) fn from_node(node: Node) -> Self {
        Matcher(Arc::new(node))
    }

    pub(crate) fn node(&self) -> &Node {
        &self.0
    }

    /// Bind a forward reference created with `forward()` to its target.
    ///
    /// The reference does not keep `target` alive; whoever owns the grammar
    /// must hold on to it for as long as it is parsed with.
    pub fn define(&self, target: &Matcher) -> Result<(), anyhow::Error> {
        match self.node() {
            Node::Forward(cell) => cell
                .set(Arc::downgrade(&target.0))
                .map_err(|_| anyhow!("forward reference is already defined")),
            other => Err(anyhow!("cannot define a non-forward matcher: {:?}", other)),
        }
    }

    /// Attempt to match at the current position. A failed attempt leaves the
    /// state exactly as it found it.
    pub(crate) fn try_match(&self, state: &mut State<'_>) -> MatchOutcome {
        let mark = state.mark();
        let outcome = self.node().attempt(state);
        if outcome.is_err() {
            state.reset(mark);
        }
        outcome
    }
}

impl Node {
    fn attempt(&self, state: &mut State<'_>) -> MatchOutcome {
        match self {
            Node::Literal(s) => {
                state.skip_whitespace();
                let start = state.cursor.save();
                if state.cursor.match_str(s) {
                    state.values.push(Value::Text(s.clone()));
                    Ok(())
                } else {
                    Err(Failure::expected(start, Expected::Literal(s.clone())))
                }
            }
            Node::Word { leading, body } => {
                state.skip_whitespace();
                let start = state.cursor.save();
                match state.cursor.peek_char() {
                    Some(c) if leading.contains(c) => {
                        state.cursor.bump();
                    }
                    _ => {
                        return Err(Failure::expected(
                            start,
                            Expected::Word {
                                leading: leading.clone(),
                                body: body.clone(),
                            },
                        ))
                    }
                }
                while let Some(c) = state.cursor.peek_char() {
                    if !body.contains(c) {
                        break;
                    }
                    state.cursor.bump();
                }
                let word = state.slice_from(&start).to_owned();
                state.values.push(Value::Text(word));
                Ok(())
            }
            Node::QuotedString { quote, escape } => quoted_string(state, *quote, *escape),
            Node::Sequence(items) => {
                for item in items {
                    item.try_match(state)?;
                }
                Ok(())
            }
            Node::Choice(alternatives) => {
                let mut failure: Option<Failure> = None;
                for alt in alternatives {
                    match alt.try_match(state) {
                        Ok(()) => return Ok(()),
                        Err(f) if f.is_fatal() => return Err(f),
                        Err(f) => {
                            failure = Some(match failure {
                                Some(prev) => prev.merge(f),
                                None => f,
                            })
                        }
                    }
                }
                Err(failure.unwrap_or_else(|| {
                    Failure::expected(state.cursor.save(), Expected::Label("empty choice".into()))
                }))
            }
            Node::Repeat { inner, min, max } => {
                if max.map_or(false, |max| max < *min) {
                    return Err(Failure::expected(
                        state.cursor.save(),
                        Expected::Label(format!("at least {} repetitions", min)),
                    ));
                }
                let mut count = 0;
                loop {
                    if max.map_or(false, |max| count >= max) {
                        return Ok(());
                    }
                    let before = state.cursor.offset();
                    match inner.try_match(state) {
                        Ok(()) => {
                            count += 1;
                            // An empty match would repeat forever.
                            if state.cursor.offset() == before {
                                return Ok(());
                            }
                        }
                        Err(f) if count < *min || f.is_fatal() => return Err(f),
                        Err(_) => return Ok(()),
                    }
                }
            }
            Node::Suppress(inner) => {
                let keep = state.values.len();
                inner.try_match(state)?;
                state.values.truncate(keep);
                Ok(())
            }
            Node::Named { inner, name } => {
                let first = state.values.len();
                inner.try_match(state)?;
                let value = match &state.values[first..] {
                    [one] => one.clone(),
                    many => Value::List(many.to_vec()),
                };
                state.named.push((name.clone(), value));
                Ok(())
            }
            Node::WithAction { inner, actions } => {
                state.skip_whitespace();
                let start = state.cursor.save();
                let first = state.values.len();
                inner.try_match(state)?;
                let raw = state.values.split_off(first);
                match run_pipeline(actions, &raw) {
                    Ok(value) => {
                        state.values.push(value);
                        Ok(())
                    }
                    Err(msg) => Err(Failure {
                        at: start,
                        reason: Reason::Action(msg),
                    }),
                }
            }
            Node::Labeled { inner, label } => {
                state.skip_whitespace();
                let start = state.cursor.save();
                inner.try_match(state).map_err(|f| match f.reason {
                    Reason::Expected(_) => Failure::expected(start, Expected::Label(label.clone())),
                    _ => f,
                })
            }
            Node::Forward(cell) => {
                let target = match cell.get().and_then(Weak::upgrade) {
                    Some(node) => Matcher(node),
                    None => {
                        return Err(Failure::expected(
                            state.cursor.save(),
                            Expected::Label("a defined forward reference".into()),
                        ))
                    }
                };
                if state.depth >= state.config.max_depth {
                    return Err(Failure {
                        at: state.cursor.save(),
                        reason: Reason::RecursionLimit(state.config.max_depth),
                    });
                }
                state.depth += 1;
                let outcome = target.try_match(state);
                state.depth -= 1;
                outcome
            }
            Node::EndOfInput => {
                state.skip_whitespace();
                if state.cursor.is_at_end() {
                    Ok(())
                } else {
                    Err(Failure::expected(state.cursor.save(), Expected::EndOfInput))
                }
            }
        }
    }
}

/// Scan a quoted string, decoding escaped quotes and escaped escapes. Any
/// other escape pair is kept as written.
fn quoted_string(state: &mut State<'_>, quote: char, escape: char) -> MatchOutcome {
    state.skip_whitespace();
    let start = state.cursor.save();
    if state.cursor.peek_char() != Some(quote) {
        return Err(Failure::expected(start, Expected::Quoted(quote)));
    }
    state.cursor.bump();

    let unterminated = || Failure {
        at: start,
        reason: Reason::UnterminatedString,
    };
    let mut content = String::new();
    loop {
        let c = state.cursor.bump().ok_or_else(unterminated)?;
        if c == escape && escape != quote {
            match state.cursor.peek_char() {
                Some(next) if next == quote || next == escape => {
                    content.push(next);
                    state.cursor.bump();
                }
                Some(_) => content.push(c),
                None => return Err(unterminated()),
            }
        } else if c == quote {
            // With doubled-quote escaping, a second quote continues the string.
            if escape == quote && state.cursor.peek_char() == Some(quote) {
                content.push(quote);
                state.cursor.bump();
            } else {
                break;
            }
        } else {
            content.push(c);
        }
    }
    state.values.push(Value::Text(content));
    Ok(())
}
