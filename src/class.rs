//! Class descriptors: the metadata a registry hands out for a class name.
//!
//! A [`ClassDescriptor`] lists the methods a class declares. Static methods carry their implementation and can be
//! called without an instance; instance methods are only *declared* here (their bodies live in the type's
//! [`Object`](crate::Object) implementation), so calling one through the class fails with
//! [`DispatchError::NonStaticCall`].
//!
//! ## Examples
//! ```rust
//! use bayrell_rtl::{ClassBuilder, Value};
//!
//! let class = ClassBuilder::new("Math")
//!     .static_method("answer", |_args| Ok(Value::Int(42)))
//!     .instance_method("describe")
//!     .build();
//!
//! assert!(class.has_method("answer"));
//! assert!(class.has_method("describe"));
//! assert_eq!(class.call_static("answer", &[]), Ok(Value::Int(42)));
//! assert!(class.call_static("describe", &[]).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::{DispatchError, DispatchResult};
use crate::value::Value;

/// Implementation of a static method.
pub type StaticFn = Arc<dyn Fn(&[Value]) -> DispatchResult<Value> + Send + Sync>;

/// Shared handle to a registered class.
pub type ClassHandle = Arc<ClassDescriptor>;

/// Whether a method needs an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Static,
    Instance,
}

/// One entry of a class's method table.
#[derive(Clone)]
pub enum MethodEntry {
    Static(StaticFn),
    Instance,
}

impl MethodEntry {
    pub fn kind(&self) -> MethodKind {
        match self {
            MethodEntry::Static(_) => MethodKind::Static,
            MethodEntry::Instance => MethodKind::Instance,
        }
    }
}

impl fmt::Debug for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind(), f)
    }
}

/// Name and method table of a class.
#[derive(Clone)]
pub struct ClassDescriptor {
    name: String,
    methods: HashMap<String, MethodEntry>,
}

impl ClassDescriptor {
    /// The class name. Descriptors handed out by a [`Registry`](crate::Registry) carry the canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return true if the class declares `name`, static or instance.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method_kind(&self, name: &str) -> Option<MethodKind> {
        self.methods.get(name).map(MethodEntry::kind)
    }

    /// Declared method names, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Call a static method of this class.
    ///
    /// ## Errors
    /// - [`DispatchError::UndefinedMethod`] if the class has no method `method`.
    /// - [`DispatchError::NonStaticCall`] if `method` is an instance method.
    /// - Whatever the method body returns, unchanged.
    pub fn call_static(&self, method: &str, args: &[Value]) -> DispatchResult<Value> {
        match self.methods.get(method) {
            Some(MethodEntry::Static(body)) => body(args),
            Some(MethodEntry::Instance) => Err(DispatchError::NonStaticCall {
                class: self.name.clone(),
                method: method.to_string(),
            }),
            None => Err(DispatchError::undefined_method(self.name.as_str(), method)),
        }
    }

    pub(crate) fn renamed(mut self, name: String) -> Self {
        self.name = name;
        self
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}

/// Builder for [`ClassDescriptor`].
///
/// Declaring the same method name twice keeps the last declaration.
#[derive(Debug)]
pub struct ClassBuilder {
    descriptor: ClassDescriptor,
}

impl ClassBuilder {
    /// Start a class named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            descriptor: ClassDescriptor {
                name: name.into(),
                methods: HashMap::new(),
            },
        }
    }

    /// Add a static method.
    pub fn static_method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
    {
        self.descriptor
            .methods
            .insert(name.into(), MethodEntry::Static(Arc::new(body)));
        self
    }

    /// Declare an instance method.
    pub fn instance_method(mut self, name: impl Into<String>) -> Self {
        self.descriptor.methods.insert(name.into(), MethodEntry::Instance);
        self
    }

    pub fn build(self) -> ClassDescriptor {
        self.descriptor
    }
}

/// A Rust type that describes itself as a runtime class.
///
/// Generated by `#[runtime_class]`; see [`Registry::register_class`](crate::Registry::register_class).
pub trait RuntimeClass {
    /// Name the class is registered under.
    const CLASS_NAME: &'static str;

    /// Build the class descriptor.
    fn describe() -> ClassDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassDescriptor {
        ClassBuilder::new("Sample")
            .static_method("echo", |args| Ok(args.first().cloned().unwrap_or_default()))
            .instance_method("poke")
            .build()
    }

    #[test]
    fn method_kinds() {
        let class = sample();
        assert_eq!(class.method_kind("echo"), Some(MethodKind::Static));
        assert_eq!(class.method_kind("poke"), Some(MethodKind::Instance));
        assert_eq!(class.method_kind("nope"), None);
        assert_eq!(class.method_names(), vec!["echo", "poke"]);
    }

    #[test]
    fn call_static_forwards_args() {
        let class = sample();
        assert_eq!(class.call_static("echo", &[Value::Int(5)]), Ok(Value::Int(5)));
        assert_eq!(class.call_static("echo", &[]), Ok(Value::Null));
    }

    #[test]
    fn instance_method_through_class_is_non_static_call() {
        let err = sample().call_static("poke", &[]).unwrap_err();
        assert_eq!(
            err,
            DispatchError::NonStaticCall {
                class: "Sample".into(),
                method: "poke".into()
            }
        );
    }

    #[test]
    fn unknown_method_is_undefined() {
        let err = sample().call_static("nope", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Call to undefined method Sample::nope()");
    }

    #[test]
    fn later_declaration_wins() {
        let class = ClassBuilder::new("Twice")
            .instance_method("x")
            .static_method("x", |_| Ok(Value::Bool(true)))
            .build();
        assert_eq!(class.method_kind("x"), Some(MethodKind::Static));
    }

    #[test]
    fn debug_lists_methods_without_bodies() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("Sample"));
        assert!(debug.contains("echo"));
    }
}
