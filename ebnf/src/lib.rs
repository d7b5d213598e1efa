//! EBNF grammar definitions, parsed from text and compiled into
//! `pegcore` matchers.
//!
//! Terminals, `,` concatenation, `|` alternation, `[ ]` options, `{ }`
//! repetition and `( )` groups map onto the matching combinators. Special
//! sequences reach the primitives that plain EBNF can't express:
//!
//! - `? word <set> [<set>] ?` where a set is `alphas`, `nums`, `alphanums`,
//!   `printables` or a quoted string of characters, joined with `+`.
//! - `? quoted '<quote>' ['<escape>'] ?`, escape defaulting to `\`.
//! - `? end ?` for end of input.

use std::fmt::{self, Display};
use std::str::FromStr;

mod compile;
mod error;
mod parser;
mod special;

pub use compile::Compiled;
pub use error::Error;

/// A constant identifying production rules.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Identifier(pub String);

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A literal string.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Terminal(pub String);

impl Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.contains('"') {
            write!(f, "'{}'", self.0)
        } else {
            write!(f, "\"{}\"", self.0)
        }
    }
}

impl From<&str> for Terminal {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// The lhs of a production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Lhs(pub Identifier);

impl From<&str> for Lhs {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl Display for Lhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The rhs of a production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Rhs {
    Identifier(Identifier),
    Terminal(Terminal),
    /// The trimmed text between `?` delimiters.
    Special(String),
    Optional(Box<Rhs>),
    Repeat(Box<Rhs>),
    Group(Box<Rhs>),
    Exception(Box<Rhs>, Box<Rhs>),
    Alternation(Box<Rhs>, Box<Rhs>),
    Concatenation(Box<Rhs>, Box<Rhs>),
}

impl Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rhs::Identifier(iden) => write!(f, "{}", iden),
            Rhs::Terminal(term) => write!(f, "{}", term),
            Rhs::Special(s) => write!(f, "? {} ?", s),
            Rhs::Optional(rhs) => write!(f, "[ {} ]", rhs),
            Rhs::Repeat(rhs) => write!(f, "{{ {} }}", rhs),
            Rhs::Group(rhs) => write!(f, "( {} )", rhs),
            Rhs::Exception(rhs1, rhs2) => write!(f, "{} - {}", rhs1, rhs2),
            Rhs::Alternation(rhs1, rhs2) => write!(f, "{} | {}", rhs1, rhs2),
            Rhs::Concatenation(rhs1, rhs2) => write!(f, "{} , {}", rhs1, rhs2),
        }
    }
}

impl FromStr for Rhs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rem, rhs) = parser::rhs(s)?;
        expect_consumed(rem)?;
        Ok(rhs)
    }
}

/// A production rule.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Production {
    pub lhs: Lhs,
    pub rhs: Rhs,
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {} ;", self.lhs, self.rhs)
    }
}

impl FromStr for Production {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rem, rule) = parser::production(s)?;
        expect_consumed(rem)?;
        Ok(rule)
    }
}

/// A set of rules.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Grammar {
    pub rules: Vec<Production>,
}

impl Grammar {
    /// Build a matcher for every rule. Rule references become late-bound,
    /// so rules may refer to each other in any order, recursively.
    pub fn compile(&self) -> Result<Compiled, Error> {
        compile::compile(self)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rem, grammar) = parser::grammar(s)?;
        expect_consumed(rem)?;
        Ok(grammar)
    }
}

fn expect_consumed(rem: &str) -> Result<(), Error> {
    let (rem, _) = parser::ws(rem)?;
    if rem.is_empty() {
        Ok(())
    } else {
        let excerpt: String = rem.chars().take(20).collect();
        Err(Error::ParseError(format!("unexpected input at '{}'", excerpt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use std::string::ToString;

    fn assert_lossless_conversion<T, E>(t: T)
    where
        T: ToString + FromStr<Err = E> + Eq + Debug,
        E: std::error::Error,
    {
        let s = t.to_string();
        let t_parse = T::from_str(&s).unwrap();
        assert_eq!(t, t_parse, "To string:\n{}\n", s);
    }

    #[test]
    fn lossless_rhs() {
        let tests = vec![
            Rhs::Exception(
                Box::new(Rhs::Terminal("hello".into())),
                Box::new(Rhs::Identifier("world".into())),
            ),
            Rhs::Alternation(
                Box::new(Rhs::Identifier("a".into())),
                Box::new(Rhs::Alternation(
                    Box::new(Rhs::Identifier("b".into())),
                    Box::new(Rhs::Concatenation(
                        Box::new(Rhs::Terminal("c".into())),
                        Box::new(Rhs::Terminal("d".into())),
                    )),
                )),
            ),
            Rhs::Concatenation(
                Box::new(Rhs::Terminal("\"".into())),
                Box::new(Rhs::Special("word nums + '.'".into())),
            ),
        ];

        for test in tests {
            assert_lossless_conversion(test);
        }
    }

    #[test]
    fn lossless_rule() {
        let rule = Production {
            lhs: Lhs("a".into()),
            rhs: Rhs::Identifier("b".into()),
        };

        assert_lossless_conversion(rule)
    }

    #[test]
    fn lossless_grammar() {
        let g = Grammar {
            rules: vec![
                Production {
                    lhs: Lhs("a".into()),
                    rhs: Rhs::Identifier("b".into()),
                },
                Production {
                    lhs: Lhs("c".into()),
                    rhs: Rhs::Optional(Box::new(Rhs::Identifier("d".into()))),
                },
            ],
        };

        assert_lossless_conversion(g);
    }

    #[test]
    fn trailing_input_is_an_error() {
        assert!("a = b; c =".parse::<Grammar>().is_err());
        assert!("a b".parse::<Rhs>().is_err());
    }
}
