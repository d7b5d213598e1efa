use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt, value, verify},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use pegcore::{
    end_of_input, quoted_string, word, CharSet, Matcher, ALPHANUMS, ALPHAS, NUMS, PRINTABLES,
};

use crate::error::Error;

/// Build the matcher described by the body of a `? ... ?` special sequence.
pub fn compile(special: &str) -> Result<Matcher, Error> {
    let body = alt((special_word, special_quoted, special_end));
    match all_consuming(terminated(preceded(multispace0, body), multispace0))(special) {
        Ok((_, matcher)) => Ok(matcher),
        Err(_) => Err(Error::InvalidSpecial(special.to_owned())),
    }
}

fn quoted_text(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        alt((
            delimited(char('"'), take_until("\""), char('"')),
            delimited(char('\''), take_until("'"), char('\'')),
        )),
    )(input)
}

fn quoted_char(input: &str) -> IResult<&str, char> {
    map(
        verify(quoted_text, |s: &str| s.chars().count() == 1),
        |s: &str| s.chars().next().unwrap_or_default(),
    )(input)
}

fn set_term(input: &str) -> IResult<&str, CharSet> {
    preceded(
        multispace0,
        alt((
            value(CharSet::from(ALPHANUMS), tag("alphanums")),
            value(CharSet::from(ALPHAS), tag("alphas")),
            value(CharSet::from(NUMS), tag("nums")),
            value(CharSet::from(PRINTABLES), tag("printables")),
            map(quoted_text, CharSet::from),
        )),
    )(input)
}

/// Terms joined with `+`, e.g. `alphanums + '_'`.
fn set(input: &str) -> IResult<&str, CharSet> {
    let (rem, terms) = separated_list1(preceded(multispace0, char('+')), set_term)(input)?;
    let joined = terms
        .iter()
        .fold(CharSet::default(), |acc, term| acc.union(term));
    Ok((rem, joined))
}

fn special_word(input: &str) -> IResult<&str, Matcher> {
    let (rem, (_, _, leading, body)) = tuple((tag("word"), multispace1, set, opt(set)))(input)?;
    let body = body.unwrap_or_else(|| leading.clone());
    Ok((rem, word(leading, body)))
}

fn special_quoted(input: &str) -> IResult<&str, Matcher> {
    let (rem, (_, quote, escape)) = tuple((tag("quoted"), quoted_char, opt(quoted_char)))(input)?;
    Ok((rem, quoted_string(quote, escape.unwrap_or('\\'))))
}

fn special_end(input: &str) -> IResult<&str, Matcher> {
    map(tag("end"), |_| end_of_input())(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegcore::{parse, Value};

    fn first_value(m: &Matcher, input: &str) -> Option<Value> {
        parse(m, input).ok().map(|r| r[0].clone())
    }

    #[test]
    fn word_sets() {
        let ident = compile("word alphas alphanums + '_'").unwrap();
        assert_eq!(first_value(&ident, "new_id2 = 3"), Some("new_id2".into()));
        assert_eq!(first_value(&ident, "_x"), None);

        let number = compile(" word nums+'.' ").unwrap();
        assert_eq!(first_value(&number, "3.14;"), Some("3.14".into()));
    }

    #[test]
    fn quoted_strings() {
        let q = compile(r#"quoted '"'"#).unwrap();
        assert_eq!(
            first_value(&q, r#""say \"hi\"""#),
            Some(r#"say "hi""#.into())
        );

        let sql = compile("quoted \"'\" \"'\"").unwrap();
        assert_eq!(first_value(&sql, "'it''s'"), Some("it's".into()));
    }

    #[test]
    fn end() {
        let end = compile("end").unwrap();
        assert!(parse(&end, "   ").is_ok());
        assert!(parse(&end, " x").is_err());
    }

    #[test]
    fn invalid() {
        let tests = vec!["", "word", "word ", "quoted 'ab'", "letters", "end now"];
        for t in tests {
            assert!(
                matches!(compile(t), Err(Error::InvalidSpecial(_))),
                "special: {:?}",
                t
            );
        }
    }
}
