//! Hand-built grammars for a few small languages.

use pegcore::{
    end_of_input, literal, one_of, one_or_more, quoted_string, word, word_of, CharSet, Matcher,
    ALPHANUMS, ALPHAS, NUMS,
};

/// A subset of the C primitive types.
pub fn c_type() -> Matcher {
    one_of(vec!["float", "double", "int", "unsigned"]).labeled("a C type")
}

/// C identifiers: a letter, then letters, digits or underscores.
pub fn identifier() -> Matcher {
    word(ALPHAS, CharSet::from(ALPHANUMS).with("_"))
}

/// Digits and dots, converted to a float.
pub fn number() -> Matcher {
    word_of(CharSet::from(NUMS).with(".")).with_action(pegcore::to_float())
}

/// `double x = 3.14;` with the type, identifier and number recorded as
/// `type`, `identifier` and `number`. `=` and `;` are suppressed.
pub fn c_assignment() -> Matcher {
    c_type().name_as("type")
        + identifier().name_as("identifier")
        + literal("=").suppress()
        + (number().name_as("number") | identifier().name_as("rhs"))
        + literal(";").suppress()
}

/// `char* s = "...";`, where the string may contain `\"`.
pub fn c_string_definition() -> Matcher {
    literal("char*")
        + identifier().name_as("identifier")
        + literal("=").suppress()
        + quoted_string('"', '\\').name_as("string")
        + literal(";").suppress()
}

/// A run of isotope-like tokens, e.g. `C C He3 C14`.
pub fn isotopes() -> Matcher {
    one_or_more(word_of(ALPHANUMS))
}

/// Look up one of the grammars above by name.
pub fn by_name(name: &str) -> Option<Matcher> {
    let g = match name {
        "c_assignment" => c_assignment(),
        "c_string_definition" => c_string_definition(),
        "isotopes" => isotopes(),
        _ => return None,
    };
    Some(g)
}

pub const NAMES: &[&str] = &["c_assignment", "c_string_definition", "isotopes"];

/// `matcher`, required to consume all of its input.
pub fn complete(matcher: Matcher) -> Matcher {
    matcher + end_of_input()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pegcore::{parse, ErrorKind, Value};

    #[test]
    fn assignment_converts_number() {
        let r = parse(&c_assignment(), "double x = 3.14;").unwrap();
        assert_eq!(r.to_string(), "['double', 'x', 3.14]");
        let rhs = r[2].as_f64().unwrap();
        assert_eq!(rhs * 2.0, 6.28);
        assert_eq!(
            r.dump(),
            "['double', 'x', 3.14]\n- identifier: 'x'\n- number: 3.14\n- type: 'double'"
        );
    }

    #[test]
    fn assignment_from_identifier() {
        let r = parse(&c_assignment(), "int y = x;").unwrap();
        assert_eq!(r.get("rhs"), Some(&Value::from("x")));
        assert_eq!(r.get("number"), None);
    }

    #[test]
    fn assignment_errors() {
        let err = parse(&c_assignment(), "x=7").unwrap_err();
        assert_eq!(err.to_string(), "expected a C type (at char 0), (line:1, col:1)");

        let err = parse(&complete(c_assignment()), "double x = 3.14; random garbage").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput);
        assert_eq!(err.offset, 17);
        assert_eq!(err.column, 18);
    }

    #[test]
    fn string_definition() {
        let r = parse(&c_string_definition(), r#"char* s="he said \"hello friend!\"";"#).unwrap();
        assert_eq!(r.get("identifier"), Some(&Value::from("s")));
        assert_eq!(
            r.get("string"),
            Some(&Value::from(r#"he said "hello friend!""#))
        );
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn isotope_tokens() {
        let r = parse(&isotopes(), "C C He3 C14").unwrap();
        let got: Vec<String> = r.iter().map(ToString::to_string).collect();
        assert_eq!(got, vec!["C", "C", "He3", "C14"]);
    }

    #[test]
    fn lookup() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "grammar: {}", name);
        }
        assert!(by_name("cobol").is_none());
    }
}
