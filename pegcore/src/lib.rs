//! A small PEG-style combinator engine: build a `Matcher` from primitives
//! and combinators, then `parse` text with it.
//!
//! ```
//! use pegcore::{literal, parse, word, ALPHANUMS, ALPHAS};
//!
//! let ident = word(ALPHAS, ALPHANUMS).name_as("id");
//! let decl = literal("int") + ident + literal(";").suppress();
//! let result = parse(&decl, "int x1;").unwrap();
//! assert_eq!(result.to_string(), "['int', 'x1']");
//! assert!(result.get("id").unwrap() == &"x1");
//! ```

use log::{debug, trace};

mod action;
mod charset;
mod combinators;
mod config;
mod cursor;
mod diagnostic;
mod matcher;
mod results;
mod span;
mod state;
mod value;

pub use action::{join, to_float, to_int};
pub use charset::{CharSet, ALPHANUMS, ALPHAS, NUMS, PRINTABLES};
pub use combinators::{
    choice, end_of_input, forward, labeled, literal, name_as, one_of, one_or_more, optional,
    quoted_string, repeat, sequence, suppress, with_action, word, word_of, zero_or_more,
};
pub use config::{ParseConfig, DEFAULT_MAX_DEPTH, DEFAULT_WHITESPACE};
pub use cursor::{Checkpoint, Cursor};
pub use diagnostic::{Diagnostic, ErrorKind, Expected};
pub use matcher::Matcher;
pub use results::MatchResult;
pub use span::Span;
pub use value::Value;

use state::State;

/// Match `matcher` against the start of `input` using the default
/// configuration.
///
/// Trailing input is not an error; compose with `end_of_input()` to require
/// the whole input to match.
pub fn parse(matcher: &Matcher, input: &str) -> Result<MatchResult, Diagnostic> {
    parse_with(matcher, input, &ParseConfig::default())
}

pub fn parse_with(
    matcher: &Matcher,
    input: &str,
    config: &ParseConfig,
) -> Result<MatchResult, Diagnostic> {
    trace!("parsing {} bytes", input.len());
    let mut state = State::new(input, config);
    let start = state.cursor.save();
    match matcher.try_match(&mut state) {
        Ok(()) => Ok(state.take_result(&start)),
        Err(failure) => {
            let diagnostic = failure.into_diagnostic();
            debug!(
                "parse failed at {}:{}: {}",
                diagnostic.line, diagnostic.column, diagnostic.expectation
            );
            Err(diagnostic)
        }
    }
}

/// Find every non-overlapping match of `matcher` in `input`, scanning left
/// to right. Input between matches is skipped.
pub fn search(matcher: &Matcher, input: &str) -> Vec<MatchResult> {
    search_with(matcher, input, &ParseConfig::default())
}

pub fn search_with(matcher: &Matcher, input: &str, config: &ParseConfig) -> Vec<MatchResult> {
    trace!("searching {} bytes", input.len());
    let mut state = State::new(input, config);
    let mut found = Vec::new();
    loop {
        state.skip_whitespace();
        if state.cursor.is_at_end() {
            break;
        }
        let start = state.cursor.save();
        match matcher.try_match(&mut state) {
            Ok(()) if state.cursor.offset() > start.offset => {
                found.push(state.take_result(&start));
            }
            _ => {
                state.clear();
                state.cursor.bump();
            }
        }
    }
    trace!("search found {} matches", found.len());
    found
}

impl Matcher {
    pub fn parse(&self, input: &str) -> Result<MatchResult, Diagnostic> {
        parse(self, input)
    }
}
