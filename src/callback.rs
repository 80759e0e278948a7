//! Callable references: bind "what to call" now, supply arguments later.
//!
//! A [`Callback`] pairs a resolved [`Target`] (a registered class or a live object) with a method name. It is
//! validated once at construction and can then be invoked any number of times, from any thread, with different
//! argument lists.
//!
//! ## Construction
//!
//! | target passed            | resolution                            | checked at construction                  |
//! |--------------------------|---------------------------------------|------------------------------------------|
//! | `Value::Str(identifier)` | looked up in the [`ClassRegistry`]    | class exists, class declares the method  |
//! | `Value::Object(object)`  | stored as is                          | nothing (or `has_method`, if configured) |
//! | anything else            | -                                     | fails with `InvalidTarget`               |
//!
//! ## Invocation
//!
//! [`Callback::invoke`] collects its arguments into a vector and [`Callback::invoke_args`] takes a slice; both
//! forward to the same dispatch routine. Errors from the called method come back unchanged.
//!
//! ## Examples
//! ```rust
//! use bayrell_rtl::{invoke, Callback, ClassBuilder, Registry, Value};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         ClassBuilder::new("Greeter")
//!             .static_method("hello", |args| Ok(Value::Str(format!("Hello, {}", args[0]))))
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let hello = Callback::new(&registry, "Greeter", "hello").unwrap();
//! assert_eq!(hello.invoke(["World"]), Ok(Value::from("Hello, World")));
//! assert_eq!(invoke!(hello, "Rust"), Ok(Value::from("Hello, Rust")));
//! assert!(Callback::new(&registry, "Nope", "hello").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use bayrell_core::names;

use crate::class::ClassHandle;
use crate::config::{CallbackConfig, InstanceValidation};
use crate::conversions::IntoValue;
use crate::errors::{CallbackError, CallbackResult, DispatchResult};
use crate::registry::ClassRegistry;
use crate::value::{ObjectRef, Value, same_object};

/// What a callback dispatches to.
#[derive(Clone)]
pub enum Target {
    /// A class resolved by name; only its static methods are callable.
    Class(ClassHandle),
    /// A live instance supplied by the caller.
    Instance(ObjectRef),
}

impl Target {
    /// Name of the target's class.
    pub fn class_name(&self) -> &str {
        match self {
            Target::Class(class) => class.name(),
            Target::Instance(object) => object.class_name(),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Class(class) => f.debug_tuple("Class").field(&class.name()).finish(),
            Target::Instance(object) => f.debug_tuple("Instance").field(object).finish(),
        }
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Target::Class(a), Target::Class(b)) => Arc::ptr_eq(a, b),
            (Target::Instance(a), Target::Instance(b)) => same_object(a, b),
            _ => false,
        }
    }
}

/// An immutable, reusable reference to `target.method(...)`.
///
/// Cloning is cheap and yields an equal callback bound to the same target.
#[derive(Clone, PartialEq)]
pub struct Callback {
    target: Target,
    method: Arc<str>,
}

impl Callback {
    /// Build a callback from a class name or an object instance, with the default configuration.
    ///
    /// ## Errors
    /// - [`CallbackError::InvalidTarget`] if `class_or_instance` is neither a string nor an object.
    /// - [`CallbackError::ClassNotFound`] if a class name does not resolve.
    /// - [`CallbackError::InvalidMethodName`] if `method_name` is empty.
    /// - [`CallbackError::MethodNotFound`] if the resolved class does not declare `method_name`.
    pub fn new<R>(registry: &R, class_or_instance: impl Into<Value>, method_name: &str) -> CallbackResult<Self>
    where
        R: ClassRegistry + ?Sized,
    {
        Self::with_config(registry, class_or_instance, method_name, &CallbackConfig::default())
    }

    /// Like [`Callback::new`], with explicit settings.
    ///
    /// With [`InstanceValidation::Eager`], instance targets are also checked and fail with
    /// [`CallbackError::MethodNotFound`].
    #[tracing::instrument(level = "debug", skip_all, fields(method = method_name))]
    pub fn with_config<R>(
        registry: &R,
        class_or_instance: impl Into<Value>,
        method_name: &str,
        config: &CallbackConfig,
    ) -> CallbackResult<Self>
    where
        R: ClassRegistry + ?Sized,
    {
        match class_or_instance.into() {
            Value::Str(identifier) => Self::bind_class(registry, &identifier, method_name),
            Value::Object(object) => Self::bind_instance(object, method_name, config),
            other => Err(CallbackError::InvalidTarget { found: other.kind() }),
        }
    }

    /// Build a callback to a static method of a registered class.
    pub fn for_class<R>(registry: &R, class_name: &str, method_name: &str) -> CallbackResult<Self>
    where
        R: ClassRegistry + ?Sized,
    {
        Self::bind_class(registry, class_name, method_name)
    }

    /// Build a callback to a method of a live object. The method is looked up when invoked.
    pub fn for_instance(object: ObjectRef, method_name: &str) -> CallbackResult<Self> {
        Self::bind_instance(object, method_name, &CallbackConfig::default())
    }

    fn bind_class<R>(registry: &R, identifier: &str, method_name: &str) -> CallbackResult<Self>
    where
        R: ClassRegistry + ?Sized,
    {
        let class = registry
            .resolve(identifier)
            .ok_or_else(|| CallbackError::ClassNotFound {
                name: identifier.to_string(),
            })?;
        check_method_name(method_name)?;
        if !registry.has_method(&class, method_name) {
            return Err(CallbackError::MethodNotFound {
                class: class.name().to_string(),
                method: method_name.to_string(),
            });
        }
        tracing::debug!(class = class.name(), "resolved callback class");
        Ok(Self {
            target: Target::Class(class),
            method: Arc::from(method_name),
        })
    }

    fn bind_instance(object: ObjectRef, method_name: &str, config: &CallbackConfig) -> CallbackResult<Self> {
        check_method_name(method_name)?;
        if config.instance_validation == InstanceValidation::Eager && !object.has_method(method_name) {
            return Err(CallbackError::MethodNotFound {
                class: object.class_name().to_string(),
                method: method_name.to_string(),
            });
        }
        tracing::debug!(class = object.class_name(), "bound callback instance");
        Ok(Self {
            target: Target::Instance(object),
            method: Arc::from(method_name),
        })
    }

    /// Invoke with arguments given individually; they are collected in order before dispatch.
    ///
    /// For heterogeneous arguments use the [`invoke!`](crate::invoke) macro.
    pub fn invoke<I>(&self, args: I) -> DispatchResult<Value>
    where
        I: IntoIterator,
        I::Item: IntoValue,
    {
        let args: Vec<Value> = args.into_iter().map(IntoValue::into_value).collect();
        self.dispatch(&args)
    }

    /// Invoke with an already materialized argument sequence.
    pub fn invoke_args(&self, args: &[Value]) -> DispatchResult<Value> {
        self.dispatch(args)
    }

    fn dispatch(&self, args: &[Value]) -> DispatchResult<Value> {
        tracing::trace!(callback = %self, argc = args.len(), "invoking callback");
        match &self.target {
            Target::Class(class) => class.call_static(&self.method, args),
            Target::Instance(object) => object.call_method(&self.method, args),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    /// Name of the target's class.
    pub fn class_name(&self) -> &str {
        self.target.class_name()
    }

    /// True if the callback was built from a class name.
    pub fn is_class_target(&self) -> bool {
        matches!(self.target, Target::Class(_))
    }
}

fn check_method_name(method_name: &str) -> CallbackResult<()> {
    if names::is_blank_method_name(method_name) {
        return Err(CallbackError::InvalidMethodName);
    }
    Ok(())
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("target", &self.target)
            .field("method", &&*self.method)
            .finish()
    }
}

/// `Class::method` for class targets, `Class->method` for instance targets.
impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_class_target() { "::" } else { "->" };
        write!(f, "{}{}{}", self.class_name(), sep, self.method)
    }
}

/// Invoke a [`Callback`] with a spread of heterogeneous arguments.
///
/// Each argument is converted with [`IntoValue`](crate::conversions::IntoValue), in order.
///
/// ```rust
/// use bayrell_rtl::{invoke, Callback, ClassBuilder, Registry, Value};
///
/// let mut registry = Registry::new();
/// registry
///     .register(ClassBuilder::new("Args").static_method("count", |args| Ok(Value::Int(args.len() as i64))).build())
///     .unwrap();
/// let count = Callback::new(&registry, "Args", "count").unwrap();
///
/// assert_eq!(invoke!(count), Ok(Value::Int(0)));
/// assert_eq!(invoke!(count, "a", 2i64, true, Value::Null), Ok(Value::Int(4)));
/// ```
#[macro_export]
macro_rules! invoke {
    ($callback:expr $(, $arg:expr)* $(,)?) => {
        $callback.invoke_args(&[$($crate::conversions::IntoValue::into_value($arg)),*])
    };
}
