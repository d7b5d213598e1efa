use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use crate::value::Value;

/// A parse action: turns the values produced by a successful match into a
/// single new value, or rejects them.
#[derive(Clone)]
pub(crate) struct Action(Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>);

impl Action {
    pub fn new<F, E>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        Action(Arc::new(move |values| f(values).map_err(|e| e.to_string())))
    }

    fn apply(&self, values: &[Value]) -> Result<Value, String> {
        (self.0)(values)
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Action")
    }
}

/// Run a pipeline of actions in order; each one after the first sees only
/// the previous result.
pub(crate) fn run_pipeline(actions: &[Action], values: &[Value]) -> Result<Value, String> {
    let (first, rest) = match actions.split_first() {
        Some(split) => split,
        None => return Err("empty action pipeline".to_owned()),
    };
    let mut value = first.apply(values)?;
    for action in rest {
        value = action.apply(std::slice::from_ref(&value))?;
    }
    Ok(value)
}

fn first(values: &[Value]) -> Result<&Value, String> {
    values
        .first()
        .ok_or_else(|| "no matched value to convert".to_owned())
}

/// Converts the first matched value to a float.
pub fn to_float() -> impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static {
    |values: &[Value]| -> Result<Value, String> {
        let v = first(values)?;
        if let Some(x) = v.as_f64() {
            return Ok(Value::Float(x));
        }
        let s = v.to_string();
        s.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("invalid float literal '{}'", s))
    }
}

/// Converts the first matched value to an integer.
pub fn to_int() -> impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static {
    |values: &[Value]| -> Result<Value, String> {
        let v = first(values)?;
        if let Some(i) = v.as_i64() {
            return Ok(Value::Int(i));
        }
        let s = v.to_string();
        s.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("invalid integer literal '{}'", s))
    }
}

/// Concatenates all matched values into one text value.
pub fn join(separator: &str) -> impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static {
    let separator = separator.to_owned();
    move |values: &[Value]| -> Result<Value, String> {
        let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
        Ok(Value::Text(parts.join(&separator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_conversions() {
        assert_eq!(to_float()(&[Value::from("3.14")]), Ok(Value::Float(3.14)));
        assert_eq!(to_int()(&[Value::from("42")]), Ok(Value::Int(42)));
        assert_eq!(
            to_float()(&[Value::from("3.1.4")]),
            Err("invalid float literal '3.1.4'".to_owned())
        );
        assert!(to_int()(&[]).is_err());
        assert_eq!(join("")(&[Value::from("C"), Value::from("14")]), Ok(Value::from("C14")));
    }

    #[test]
    fn pipeline_threads_values() {
        let double = Action::new(|v: &[Value]| -> Result<Value, String> {
            Ok(Value::Float(v[0].as_f64().unwrap_or(0.0) * 2.0))
        });
        let got = run_pipeline(&[Action::new(to_float()), double], &[Value::from("3.5")]);
        assert_eq!(got, Ok(Value::Float(7.0)));
    }
}
