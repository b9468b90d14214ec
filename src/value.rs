//! Dynamic AST value produced by matching a value-generating rule.
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// The result of a successful match of a value-generating rule.
///
/// This stands in for the host language's dynamically-typed tree node: most
/// grammars only ever need `Text` and `List`, but `Node` lets a reducer wrap
/// an arbitrary downstream type without the engine knowing about it.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<Value>),
    Node(Rc<dyn Any>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Value {
        Value::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::List(items) => write!(f, "List({items:?})"),
            Value::Node(_) => write!(f, "Node(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

/// A sequence reducer: combines the values of a sequence's value-generating
/// subrules (in order) into a single value.
pub type Reducer = Rc<dyn Fn(&[Value]) -> Value>;

/// A text extractor: turns a matched substring into a value. Used by
/// `TextValue`; the default extractor wraps the substring verbatim.
pub type Extractor = Rc<dyn Fn(&str) -> Value>;

pub fn default_extractor() -> Extractor {
    Rc::new(|s: &str| Value::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extractor_wraps_substring_verbatim() {
        let value = default_extractor()("hello");
        assert_eq!(value.as_text(), Some("hello"));
    }

    #[test]
    fn equality_ignores_node_variant() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::text("a"), Value::text("b"));
    }
}
