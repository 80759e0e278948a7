//! Conversions between Rust values and runtime [`Value`]s.
//!
//! [`IntoValue`] is infallible and used for arguments and return values. [`FromValue`] is fallible and used to
//! decode arguments; the helpers [`expect_arity`] and [`arg`] turn decoding failures into the canonical
//! `ArgumentCountError` / `TypeError` dispatch errors that generated method bodies return.
//!
//! ## Examples
//! ```rust
//! use bayrell_rtl::conversions::{arg, expect_arity};
//! use bayrell_rtl::{DispatchResult, Value};
//!
//! fn repeat(args: &[Value]) -> DispatchResult<Value> {
//!     expect_arity("repeat", args, 2)?;
//!     let text: String = arg("repeat", args, 0)?;
//!     let times: i64 = arg("repeat", args, 1)?;
//!     Ok(Value::Str(text.repeat(times.max(0) as usize)))
//! }
//!
//! assert_eq!(repeat(&[Value::from("ab"), Value::from(2i64)]), Ok(Value::Str("abab".into())));
//! assert_eq!(
//!     repeat(&[Value::Int(1), Value::Int(2)]).unwrap_err().to_string(),
//!     "repeat(): Argument #1 must be of type string, int given"
//! );
//! ```

use std::collections::BTreeMap;

use crate::callback::Callback;
use crate::errors::{DispatchError, DispatchResult, ValueTypeError};
use crate::value::{ObjectRef, Value};

/// Convert a Rust value into a runtime [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Decode a runtime [`Value`] into a Rust value.
pub trait FromValue: Sized {
    /// Kind spelling reported when decoding fails.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Result<Self, ValueTypeError>;
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    f64 => Float,
    String => Str,
    &str => Str,
}

/// Saturates at `i64::MAX`.
impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        Value::from(self)
    }
}

impl From<ObjectRef> for Value {
    fn from(v: ObjectRef) -> Self {
        Value::Object(v)
    }
}

impl From<Callback> for Value {
    fn from(v: Callback) -> Self {
        Value::Callback(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Vector(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for &Value {
    fn into_value(self) -> Value {
        self.clone()
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

impl IntoValue for ObjectRef {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl IntoValue for Callback {
    fn into_value(self) -> Value {
        Value::Callback(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Vector(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for BTreeMap<String, T> {
    fn into_value(self) -> Value {
        Value::Map(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "mixed";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_int().ok_or_else(|| mismatch::<Self>(value))
    }
}

/// Ints outside the `i32` range are rejected.
impl FromValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value
            .as_int()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

/// Negative ints are rejected.
impl FromValue for usize {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value
            .as_int()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

/// Ints widen to floats; floats never narrow to ints.
impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_str().map(str::to_string).ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for ObjectRef {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_object().cloned().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl FromValue for Callback {
    const EXPECTED: &'static str = "callback";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        value.as_callback().cloned().ok_or_else(|| mismatch::<Self>(value))
    }
}

/// `null` decodes to `None`; anything else must decode as `T`.
impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Element mismatches report the element's expected kind.
impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "vector";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Vector(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    const EXPECTED: &'static str = "map";

    fn from_value(value: &Value) -> Result<Self, ValueTypeError> {
        match value {
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

fn mismatch<T: FromValue>(found: &Value) -> ValueTypeError {
    ValueTypeError::new(T::EXPECTED, found.kind())
}

/// Check that `method` received exactly `expected` arguments.
pub fn expect_arity(method: &str, args: &[Value], expected: usize) -> DispatchResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(DispatchError::ArgumentCount {
            method: method.to_string(),
            expected,
            found: args.len(),
        })
    }
}

/// Decode the argument at `index` (0-based) for `method`.
///
/// ## Errors
/// - `ArgumentCount` if the argument is missing.
/// - `ArgumentType` (with a 1-based position) if it has the wrong kind.
pub fn arg<T: FromValue>(method: &str, args: &[Value], index: usize) -> DispatchResult<T> {
    let value = args.get(index).ok_or_else(|| DispatchError::ArgumentCount {
        method: method.to_string(),
        expected: index + 1,
        found: args.len(),
    })?;
    T::from_value(value).map_err(|err| DispatchError::ArgumentType {
        method: method.to_string(),
        index: index + 1,
        expected: err.expected,
        found: err.found,
    })
}
