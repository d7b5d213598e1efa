use std::fmt::{self, Display};

/// A matched value. Raw matches are always `Text`; parse actions may turn
/// them into anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Like `Display`, but quotes text the way it is shown in result lists.
    pub fn repr(&self) -> String {
        match self {
            Value::Text(s) => format!("'{}'", s),
            Value::List(l) => list_repr(l),
            other => other.to_string(),
        }
    }
}

pub(crate) fn list_repr(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::repr).collect();
    format!("[{}]", items.join(", "))
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(l) => write!(f, "{}", list_repr(l)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_repr() {
        let v = Value::List(vec!["x".into(), Value::Float(3.14), Value::Int(2)]);
        assert_eq!(v.repr(), "['x', 3.14, 2]");
        assert_eq!(Value::from("x").to_string(), "x");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::from("2").as_i64(), None);
        assert!(Value::from("abc") == "abc");
    }
}
