//! Defines the [`Value`] enum, representing any data a template can resolve,
//! bind or render.

mod from;
mod function;
mod markup;
#[cfg(feature = "serde")]
mod ser;

pub use std::collections::BTreeMap as Map;
use std::fmt::Write;
use std::mem;
pub use std::vec::Vec as List;

pub use crate::value::function::Function;
pub use crate::value::markup::Markup;
#[cfg(feature = "serde")]
pub use crate::value::ser::to_value;
use crate::{Error, Result};

/// Data to be resolved or rendered, represented as a recursive enum.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
    /// A callable invoked when encountered along a variable path.
    Function(Function),
    /// An opaque value produced by an output mode.
    Markup(Markup),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            (Self::Function(s), Self::Function(o)) => s.ptr_eq(o),
            (Self::Markup(s), Self::Markup(o)) => s.ptr_eq(o),
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::None
    }
}

impl Value {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
            Value::Markup(_) => "markup",
        }
    }

    /// Returns whether the value counts as true in a conditional.
    ///
    /// `None`, `false`, zero, `NaN` and the empty string are false, every
    /// other value is true. Note that empty lists and maps are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Function(_) | Value::Markup(_) => true,
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the property with the given name.
    ///
    /// Maps are indexed by key, lists by a decimal index, and strings and
    /// lists expose their `length`. A property that doesn't exist returns
    /// `None`, which is distinct from a property holding [`Value::None`].
    pub fn property(&self, name: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(name).cloned(),
            Value::List(list) if name == "length" => Some(Value::from(list.len())),
            Value::List(list) => name.parse::<usize>().ok().and_then(|i| list.get(i)).cloned(),
            Value::String(s) if name == "length" => Some(Value::from(s.chars().count())),
            _ => None,
        }
    }

    /// Renders the value as text, flattening lists.
    pub(crate) fn write_text(&self, buf: &mut String) -> Result<()> {
        match self {
            Value::None => {}
            Value::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => write!(buf, "{}", i).map_err(|e| Error::render(e.to_string()))?,
            Value::Float(f) => write_float(buf, *f),
            Value::String(s) => buf.push_str(s),
            Value::List(list) => {
                for item in list {
                    item.write_text(buf)?;
                }
            }
            Value::Markup(markup) => {
                write!(buf, "{}", markup).map_err(|e| Error::render(e.to_string()))?
            }
            value => {
                return Err(Error::render(format!(
                    "expected renderable value, but found {}",
                    value.human()
                )))
            }
        }
        Ok(())
    }

    /// Renders the value as text, flattening lists.
    pub fn to_text(&self) -> Result<String> {
        let mut buf = String::new();
        self.write_text(&mut buf)?;
        Ok(buf)
    }
}

fn write_float(buf: &mut String, f: f64) {
    if f.is_infinite() {
        buf.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        // Writing to a string cannot fail.
        let _ = write!(buf, "{}", f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_truthiness() {
        for v in [
            Value::None,
            Value::Bool(false),
            Value::Integer(0),
            Value::Float(0.0),
            Value::Float(f64::NAN),
            Value::from(""),
        ] {
            assert!(!v.is_truthy(), "{:?}", v);
        }
        for v in [
            Value::Bool(true),
            Value::Integer(-1),
            Value::Float(0.5),
            Value::from("0"),
            Value::List(List::new()),
            Value::Map(Map::new()),
        ] {
            assert!(v.is_truthy(), "{:?}", v);
        }
    }

    #[test]
    fn value_property() {
        let v = Value::from([("a", Value::None), ("b", Value::from(1))]);
        assert_eq!(v.property("a"), Some(Value::None));
        assert_eq!(v.property("b"), Some(Value::from(1)));
        assert_eq!(v.property("c"), None);

        let v = Value::from(vec!["x", "y"]);
        assert_eq!(v.property("1"), Some(Value::from("y")));
        assert_eq!(v.property("2"), None);
        assert_eq!(v.property("length"), Some(Value::from(2)));

        assert_eq!(Value::from("héllo").property("length"), Some(Value::from(5)));
        assert_eq!(Value::Integer(3).property("length"), None);
        assert_eq!(Value::None.property("x"), None);
    }

    #[test]
    fn value_to_text() {
        let v = Value::from(vec![
            Value::from("a"),
            Value::from(vec![Value::from(1), Value::from(2.5)]),
            Value::None,
            Value::Bool(true),
        ]);
        assert_eq!(v.to_text().unwrap(), "a12.5true");
        assert_eq!(Value::Float(4.0).to_text().unwrap(), "4");
        assert_eq!(Value::Float(f64::INFINITY).to_text().unwrap(), "Infinity");
    }

    #[test]
    fn value_to_text_err_map() {
        let err = Value::Map(Map::new()).to_text().unwrap_err();
        assert_eq!(err.to_string(), "expected renderable value, but found map");
    }

    #[test]
    fn value_from_conversions() {
        assert_eq!(Value::from('é'), Value::String(String::from("é")));
        assert_eq!(Value::from(u64::MAX), Value::Integer(i64::MAX));
        assert_eq!(Value::from(Some(3u8)), Value::Integer(3));
        assert_eq!(Value::from(None::<bool>), Value::None);
        assert_eq!(
            Value::from([("a", 1)]),
            Value::Map(Map::from([(String::from("a"), Value::Integer(1))]))
        );
    }
}
