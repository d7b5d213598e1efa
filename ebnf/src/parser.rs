use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{alpha1, alphanumeric1, char, multispace1},
    combinator::{opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::{Grammar, Identifier, Lhs, Production, Rhs, Terminal};

/// Whitespace and `(* comments *)`.
pub fn ws(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            multispace1,
            recognize(tuple((tag("(*"), take_until("*)"), tag("*)")))),
        ))),
    )(input)
}

pub fn terminal(input: &str) -> IResult<&str, Terminal> {
    let (rem, matched) = preceded(
        ws,
        alt((
            delimited(char('"'), take_until("\""), char('"')),
            delimited(char('\''), take_until("'"), char('\'')),
        )),
    )(input)?;
    Ok((rem, Terminal(matched.to_owned())))
}

pub fn identifier(input: &str) -> IResult<&str, Identifier> {
    let (rem, matched) = preceded(
        ws,
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
    )(input)?;
    Ok((rem, Identifier(matched.to_owned())))
}

pub fn lhs(input: &str) -> IResult<&str, Lhs> {
    let (rem, matched) = identifier(input)?;
    Ok((rem, Lhs(matched)))
}

/// Alternation binds loosest, then concatenation, then exception. Chains
/// nest to the right: `a | b | c` is `a | (b | c)`.
pub fn rhs(input: &str) -> IResult<&str, Rhs> {
    let (rem, items) = separated_list1(preceded(ws, char('|')), rhs_concatenation)(input)?;
    match fold_right(items, Rhs::Alternation) {
        Some(rhs) => Ok((rem, rhs)),
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::SeparatedList))),
    }
}

pub fn production(input: &str) -> IResult<&str, Production> {
    let (rem, (lhs, _, rhs, _)) = tuple((
        lhs,
        preceded(ws, char('=')),
        rhs,
        preceded(ws, alt((char(';'), char('.')))),
    ))(input)?;
    Ok((rem, Production { lhs, rhs }))
}

pub fn grammar(input: &str) -> IResult<&str, Grammar> {
    let (rem, rules) = many0(production)(input)?;
    let (rem, _) = ws(rem)?;
    Ok((rem, Grammar { rules }))
}

fn fold_right(items: Vec<Rhs>, join: fn(Box<Rhs>, Box<Rhs>) -> Rhs) -> Option<Rhs> {
    items.into_iter().rev().fold(None, |acc, item| {
        Some(match acc {
            Some(rest) => join(Box::new(item), Box::new(rest)),
            None => item,
        })
    })
}

fn rhs_concatenation(input: &str) -> IResult<&str, Rhs> {
    let (rem, items) = separated_list1(preceded(ws, char(',')), rhs_exception)(input)?;
    match fold_right(items, Rhs::Concatenation) {
        Some(rhs) => Ok((rem, rhs)),
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::SeparatedList))),
    }
}

fn rhs_exception(input: &str) -> IResult<&str, Rhs> {
    let (rem, (base, except)) =
        pair(rhs_primary, opt(preceded(preceded(ws, char('-')), rhs_primary)))(input)?;
    let rhs = match except {
        Some(except) => Rhs::Exception(Box::new(base), Box::new(except)),
        None => base,
    };
    Ok((rem, rhs))
}

fn rhs_primary(input: &str) -> IResult<&str, Rhs> {
    preceded(
        ws,
        alt((
            rhs_group,
            rhs_repetition,
            rhs_optional,
            rhs_special,
            rhs_terminal,
            rhs_identifier,
        )),
    )(input)
}

fn rhs_identifier(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = identifier(input)?;
    Ok((rem, Rhs::Identifier(matched)))
}

fn rhs_terminal(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = terminal(input)?;
    Ok((rem, Rhs::Terminal(matched)))
}

fn rhs_special(input: &str) -> IResult<&str, Rhs> {
    let (rem, matched) = delimited(char('?'), take_until("?"), char('?'))(input)?;
    Ok((rem, Rhs::Special(matched.trim().to_owned())))
}

fn rhs_group(input: &str) -> IResult<&str, Rhs> {
    let (rem, inner) = delimited(char('('), rhs, preceded(ws, char(')')))(input)?;
    Ok((rem, Rhs::Group(Box::new(inner))))
}

fn rhs_repetition(input: &str) -> IResult<&str, Rhs> {
    let (rem, inner) = delimited(char('{'), rhs, preceded(ws, char('}')))(input)?;
    Ok((rem, Rhs::Repeat(Box::new(inner))))
}

fn rhs_optional(input: &str) -> IResult<&str, Rhs> {
    let (rem, inner) = delimited(char('['), rhs, preceded(ws, char(']')))(input)?;
    Ok((rem, Rhs::Optional(Box::new(inner))))
}
