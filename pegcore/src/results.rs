use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::ops::Index;

use crate::span::Span;
use crate::value::{list_repr, Value};

/// The outcome of a successful parse: matched values in order, plus the
/// ones recorded under a name.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    values: Vec<Value>,
    named: BTreeMap<String, Value>,
    span: Span,
}

impl MatchResult {
    /// Build a result from values and a log of names in match order; a
    /// repeated name keeps its last value.
    pub(crate) fn new(values: Vec<Value>, named: Vec<(String, Value)>, span: Span) -> Self {
        MatchResult {
            values,
            named: named.into_iter().collect(),
            span,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Named values, sorted by name.
    pub fn named(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The input consumed, from where matching started to the end of the
    /// last token.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// The value list followed by one `- name: value` line per name.
    pub fn dump(&self) -> String {
        let mut out = list_repr(&self.values);
        for (name, value) in &self.named {
            out.push_str(&format!("\n- {}: {}", name, value.repr()));
        }
        out
    }
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", list_repr(&self.values))
    }
}

impl Index<usize> for MatchResult {
    type Output = Value;

    fn index(&self, idx: usize) -> &Value {
        &self.values[idx]
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchResult {
        MatchResult::new(
            vec!["double".into(), "x".into(), Value::Float(3.14)],
            vec![
                ("type".to_owned(), "double".into()),
                ("number".to_owned(), Value::Float(1.0)),
                ("identifier".to_owned(), "x".into()),
                ("number".to_owned(), Value::Float(3.14)),
            ],
            Span { start: 0, end: 15 },
        )
    }

    #[test]
    fn last_name_wins() {
        let r = sample();
        assert_eq!(r.get("number"), Some(&Value::Float(3.14)));
        assert_eq!(r.get("missing"), None);
    }

    #[test]
    fn display_and_dump() {
        let r = sample();
        assert_eq!(r.to_string(), "['double', 'x', 3.14]");
        assert_eq!(
            r.dump(),
            "['double', 'x', 3.14]\n- identifier: 'x'\n- number: 3.14\n- type: 'double'"
        );
    }

    #[test]
    fn positional_access() {
        let r = sample();
        assert_eq!(r.len(), 3);
        assert_eq!(r[1], Value::from("x"));
        let texts: Vec<&str> = r.iter().filter_map(Value::as_str).collect();
        assert_eq!(texts, vec!["double", "x"]);
    }
}
