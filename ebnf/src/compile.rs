use std::collections::BTreeMap;

use pegcore::{
    end_of_input, forward, literal, optional, parse, zero_or_more, MatchResult, Matcher,
};

use crate::error::Error;
use crate::special;
use crate::{Grammar, Rhs};

/// A grammar turned into matchers, one per rule.
///
/// References between rules are late-bound and don't own their targets;
/// this struct owns every rule, so it must outlive any parse that uses one
/// of its matchers.
#[derive(Debug)]
pub struct Compiled {
    rules: BTreeMap<String, Matcher>,
}

impl Compiled {
    pub fn rule(&self, name: &str) -> Option<&Matcher> {
        self.rules.get(name)
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Parse the start of `input` with the named rule.
    pub fn parse(&self, rule: &str, input: &str) -> Result<MatchResult, Error> {
        let matcher = self
            .rule(rule)
            .ok_or_else(|| Error::UndefinedRule(rule.to_owned()))?;
        Ok(parse(matcher, input)?)
    }

    /// Like `parse`, but the rule must account for all of `input`.
    pub fn parse_all(&self, rule: &str, input: &str) -> Result<MatchResult, Error> {
        let matcher = self
            .rule(rule)
            .ok_or_else(|| Error::UndefinedRule(rule.to_owned()))?;
        Ok(parse(&(matcher.clone() + end_of_input()), input)?)
    }
}

pub(crate) fn compile(grammar: &Grammar) -> Result<Compiled, Error> {
    let mut forwards = BTreeMap::new();
    for production in &grammar.rules {
        let name = production.lhs.to_string();
        if forwards.insert(name.clone(), forward()).is_some() {
            return Err(Error::DuplicateRule(name));
        }
    }

    let mut rules = BTreeMap::new();
    for production in &grammar.rules {
        let matcher = compile_rhs(&production.rhs, &forwards)?;
        rules.insert(production.lhs.to_string(), matcher);
    }

    for (name, matcher) in &rules {
        if let Some(reference) = forwards.get(name) {
            reference.define(matcher)?;
        }
    }

    Ok(Compiled { rules })
}

/// References to other rules record their value under the rule's name.
fn compile_rhs(rhs: &Rhs, forwards: &BTreeMap<String, Matcher>) -> Result<Matcher, Error> {
    let matcher = match rhs {
        Rhs::Identifier(iden) => {
            let reference = forwards
                .get(&iden.0)
                .ok_or_else(|| Error::UndefinedRule(iden.0.clone()))?;
            reference.clone().name_as(&iden.0)
        }
        Rhs::Terminal(term) => literal(&term.0),
        Rhs::Special(s) => special::compile(s)?,
        Rhs::Optional(inner) => optional(compile_rhs(inner, forwards)?),
        Rhs::Repeat(inner) => zero_or_more(compile_rhs(inner, forwards)?),
        Rhs::Group(inner) => compile_rhs(inner, forwards)?,
        Rhs::Exception(_, _) => {
            return Err(Error::Unsupported(format!("exception '{}'", rhs)));
        }
        Rhs::Alternation(a, b) => compile_rhs(a, forwards)? | compile_rhs(b, forwards)?,
        Rhs::Concatenation(a, b) => compile_rhs(a, forwards)? + compile_rhs(b, forwards)?,
    };
    Ok(matcher)
}
