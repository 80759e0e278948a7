//! The tagged value that flows through every dynamic call.
//!
//! Arguments are passed as ordered `&[Value]` sequences and methods return a single `Value`. Rust types cross the
//! boundary through [`IntoValue`](crate::conversions::IntoValue) and [`FromValue`](crate::conversions::FromValue).
//!
//! ## Notes
//! - Data variants compare structurally. `Object` compares by identity (same allocation) and `Callback` compares by
//!   bound target identity plus method name.
//! - `Display` renders strings without quotes so values can be printed the way generated code prints them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bayrell_core::kinds::{self, ValueKind};

use crate::callback::Callback;
use crate::object::Object;

/// A shared, live object instance.
pub type ObjectRef = Arc<dyn Object>;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Vector(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(ObjectRef),
    Callback(Callback),
}

impl Value {
    /// Wrap a concrete object in a shared `Value::Object`.
    pub fn object<T: Object + 'static>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Return the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Vector(_) => ValueKind::Vector,
            Value::Map(_) => ValueKind::Map,
            Value::Object(_) => ValueKind::Object,
            Value::Callback(_) => ValueKind::Callback,
        }
    }

    /// Return the canonical kind spelling (e.g. `"string"`).
    pub fn type_name(&self) -> &'static str {
        kinds::as_str(self.kind())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Value::Callback(c) => Some(c),
            _ => None,
        }
    }
}

/// Return true if two object references point at the same instance.
pub(crate) fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => same_object(a, b),
            (Value::Callback(a), Value::Callback(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
            Value::Object(o) => write!(f, "<object {}>", o.class_name()),
            Value::Callback(c) => write!(f, "<callback {c}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DispatchResult;

    #[derive(Debug)]
    struct Empty;

    impl Object for Empty {
        fn class_name(&self) -> &str {
            "Empty"
        }

        fn has_method(&self, _name: &str) -> bool {
            false
        }

        fn call_method(&self, name: &str, _args: &[Value]) -> DispatchResult<Value> {
            Err(crate::DispatchError::undefined_method("Empty", name))
        }
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Str("x".into()).type_name(), "string");
        assert_eq!(Value::Vector(vec![]).type_name(), "vector");
        assert_eq!(Value::object(Empty).type_name(), "object");
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Value::object(Empty);
        let b = Value::object(Empty);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn int_and_float_are_distinct() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn display_nested() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), Value::Bool(true));
        map.insert("a".to_string(), Value::Vector(vec![Value::Int(1), Value::Str("two".into())]));
        assert_eq!(Value::Map(map).to_string(), "{a: [1, two], b: true}");
        assert_eq!(Value::object(Empty).to_string(), "<object Empty>");
    }
}
