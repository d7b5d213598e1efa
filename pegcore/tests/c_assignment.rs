//! A grammar for a subset of C assignment statements, e.g. `double x = 7;`.

use pegcore::{
    end_of_input, literal, name_as, one_of, parse, quoted_string, suppress, to_float, word,
    word_of, CharSet, ErrorKind, MatchResult, Matcher, Value, ALPHANUMS, ALPHAS, NUMS,
};

fn c_type() -> Matcher {
    literal("float") | literal("double") | literal("int") | literal("unsigned")
}

/// Identifiers start with a letter and continue with letters, digits or
/// underscores.
fn identifier() -> Matcher {
    word(ALPHAS, CharSet::from(ALPHANUMS).with("_"))
}

fn number() -> Matcher {
    word_of(CharSet::from(NUMS).with("."))
}

/// c_assignment = type , identifier , "=" , ( number | identifier ) , ";" ;
fn c_assignment() -> Matcher {
    c_type() + identifier() + literal("=") + (number() | identifier()) + literal(";")
}

fn texts(result: &MatchResult) -> Vec<String> {
    result.iter().map(ToString::to_string).collect()
}

#[test]
fn simple_assignment() {
    let r = parse(&c_assignment(), "double x = 7;").unwrap();
    assert_eq!(texts(&r), vec!["double", "x", "=", "7", ";"]);
    assert_eq!(r.to_string(), "['double', 'x', '=', '7', ';']");
}

#[test]
fn free_format_whitespace() {
    let r = parse(&c_assignment(), " double x=7; ").unwrap();
    assert_eq!(texts(&r), vec!["double", "x", "=", "7", ";"]);

    let r = parse(&c_assignment(), "double x= y;").unwrap();
    assert_eq!(texts(&r), vec!["double", "x", "=", "y", ";"]);
}

#[test]
fn python_assignment_is_rejected() {
    let err = parse(&c_assignment(), "x=7").unwrap_err();
    assert_eq!(err.offset, 0);
    assert_eq!(
        err.expectation,
        "expected 'float' or 'double' or 'int' or 'unsigned'"
    );
    assert_eq!(
        err.to_string(),
        "expected 'float' or 'double' or 'int' or 'unsigned' (at char 0), (line:1, col:1)"
    );
}

#[test]
fn multiple_declarators_are_rejected() {
    let input = "double x = 7, y = 9;";
    let err = parse(&c_assignment(), input).unwrap_err();
    assert_eq!(err.to_string(), "expected ';' (at char 12), (line:1, col:13)");
    assert_eq!(err.marked_line(input), "double x = 7>!<, y = 9;");
}

#[test]
fn named_results() {
    let g = name_as(c_type(), "type")
        + name_as(identifier(), "new_identifier")
        + literal("=")
        + name_as(number() | identifier(), "rhs")
        + literal(";");
    let r = parse(&g, "double x = 7;").unwrap();
    assert_eq!(r.get("type"), Some(&Value::from("double")));
    assert_eq!(r.get("new_identifier"), Some(&Value::from("x")));
    assert_eq!(r.get("rhs"), Some(&Value::from("7")));
}

#[test]
fn suppressed_punctuation() {
    let g = c_type()
        + identifier()
        + suppress(literal("="))
        + (number() | identifier())
        + suppress(literal(";"));
    let r = parse(&g, "double x = 7;").unwrap();
    assert_eq!(texts(&r), vec!["double", "x", "7"]);
}

#[test]
fn string_definition_with_escaped_quotes() {
    let g = literal("char*")
        + identifier()
        + suppress(literal("="))
        + quoted_string('"', '\\')
        + suppress(literal(";"));
    let r = parse(&g, r#"char* s="he said \"hello friend!\"";"#).unwrap();
    assert_eq!(texts(&r), vec!["char*", "s", r#"he said "hello friend!""#]);
}

#[test]
fn parse_action_converts_number() {
    let g = c_type()
        + identifier()
        + suppress(literal("="))
        + (number().with_action(to_float()) | identifier())
        + suppress(literal(";"));
    let r = parse(&g, "double x = 3.14;").unwrap();
    assert_eq!(r[2], Value::Float(3.14));
    assert_eq!(r[2].as_f64().map(|x| x * 2.0), Some(6.28));
}

fn c_statement() -> Matcher {
    one_of(vec!["float", "double", "int", "unsigned"]).name_as("type")
        + identifier().name_as("identifier")
        + suppress(literal("="))
        + (number().with_action(to_float()).name_as("number") | identifier())
        + suppress(literal(";"))
}

#[test]
fn dump_named_results() {
    let r = parse(&c_statement(), "double x = 3.14;").unwrap();
    assert_eq!(
        r.dump(),
        "['double', 'x', 3.14]\n- identifier: 'x'\n- number: 3.14\n- type: 'double'"
    );
}

#[test]
fn trailing_garbage_needs_end_of_input() {
    let input = "double x = 3.14; random syntactically incorrect garbage";
    assert!(parse(&c_statement(), input).is_ok());

    let err = parse(&(c_statement() + end_of_input()), "double x = 3.14; random garbage")
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TrailingInput);
    assert_eq!(
        err.to_string(),
        "expected end of input (at char 17), (line:1, col:18)"
    );
}

#[test]
fn failure_locality() {
    let g = literal("double")
        + word(ALPHAS, ALPHANUMS)
        + literal("=")
        + word(NUMS, CharSet::from(NUMS).with("."))
        + literal(";");
    let input = "double x = 3.14; garbage";
    assert!(parse(&g, input).is_ok());

    let err = parse(&(g + end_of_input()), input).unwrap_err();
    assert_eq!(err.offset, input.find("garbage").unwrap());
}

#[test]
fn grammar_is_reusable() {
    let g = c_statement();
    let first = parse(&g, "int y = 2;").unwrap();
    let second = parse(&g, "int y = 2;").unwrap();
    assert_eq!(first, second);
}

#[test]
fn grammar_is_shared_across_threads() {
    let g = c_statement();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let g = g.clone();
            std::thread::spawn(move || {
                let input = format!("int v{} = {};", i, i);
                parse(&g, &input).map(|r| r.get("number").cloned())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let got = handle.join().unwrap().unwrap();
        assert_eq!(got, Some(Value::Float(i as f64)));
    }
}

#[test]
fn per_line_batch() {
    let input = "int a = 1;\nfloat b = x;\nnot valid\nunsigned c = 3;";
    let g = c_statement() + end_of_input();
    let outcomes: Vec<bool> = input.lines().map(|line| parse(&g, line).is_ok()).collect();
    assert_eq!(outcomes, vec![true, true, false, true]);
}
