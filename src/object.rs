//! Instance-level dynamic dispatch.
//!
//! [`Object`] is the host method-dispatch mechanism for live instances: given a method name and an ordered argument
//! list it performs the call, or reports [`DispatchError::UndefinedMethod`] when the instance has no such method.
//! Implementations are normally generated by `#[runtime_class]`; hand-written ones are fine as long as
//! `has_method` and `call_method` agree.
//!
//! ## Examples
//! ```rust
//! use bayrell_rtl::{DispatchError, DispatchResult, Object, Value};
//!
//! #[derive(Debug)]
//! struct Counter(i64);
//!
//! impl Object for Counter {
//!     fn class_name(&self) -> &str {
//!         "Counter"
//!     }
//!
//!     fn has_method(&self, name: &str) -> bool {
//!         name == "get"
//!     }
//!
//!     fn call_method(&self, name: &str, _args: &[Value]) -> DispatchResult<Value> {
//!         match name {
//!             "get" => Ok(Value::Int(self.0)),
//!             _ => Err(DispatchError::undefined_method(self.class_name(), name)),
//!         }
//!     }
//! }
//!
//! let counter = Counter(3);
//! assert_eq!(counter.call_method("get", &[]), Ok(Value::Int(3)));
//! ```

use std::fmt;

use crate::errors::DispatchResult;
use crate::value::Value;

/// A live object that can receive dynamically named method calls.
///
/// Objects are shared (`Arc<dyn Object>`) and may be called from several threads at once, so methods take `&self`.
/// Types that need mutation use their own interior synchronization.
pub trait Object: Send + Sync + fmt::Debug {
    /// Canonical name of the object's class, used in error messages and `Display` output.
    fn class_name(&self) -> &str;

    /// Return true if `call_method(name, ..)` would reach a method rather than fail with `UndefinedMethod`.
    fn has_method(&self, name: &str) -> bool;

    /// Invoke `name` with the given positional arguments.
    fn call_method(&self, name: &str, args: &[Value]) -> DispatchResult<Value>;
}
