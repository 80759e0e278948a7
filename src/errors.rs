//! Error types raised by the runtime.
//!
//! Three families, matching the three places things can go wrong:
//! - [`CallbackError`]: building a [`Callback`](crate::Callback) failed. The callback is never created.
//! - [`DispatchError`]: the host dispatch mechanism (a class's static method table or an object's
//!   [`Object::call_method`](crate::Object::call_method)) rejected or failed a call. `Callback` passes these through
//!   untouched.
//! - [`RegistryError`]: registering a class descriptor failed.
//!
//! Message text and canonical kind names come from `bayrell_core::errors` so generated code and the runtime agree.

use bayrell_core::errors::{self as vocab, ErrorKind};
use bayrell_core::kinds::{self, ValueKind};
use miette::Diagnostic;
use thiserror::Error;

/// Result of building a callback.
pub type CallbackResult<T> = Result<T, CallbackError>;

/// Result of dispatching a method call.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Construction-time failure of a [`Callback`](crate::Callback).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CallbackError {
    #[error("{}", invalid_target_message(.found))]
    #[diagnostic(
        code(bayrell::callback::invalid_target),
        help("pass a class name string or an object instance")
    )]
    InvalidTarget { found: ValueKind },

    #[error("{}", vocab::class_not_found(.name))]
    #[diagnostic(
        code(bayrell::callback::class_not_found),
        help("register the class in the registry passed to the callback")
    )]
    ClassNotFound { name: String },

    #[error("{}", vocab::method_not_found(.class, .method))]
    #[diagnostic(code(bayrell::callback::method_not_found))]
    MethodNotFound { class: String, method: String },

    #[error("method name must not be empty")]
    #[diagnostic(code(bayrell::callback::invalid_method_name))]
    InvalidMethodName,
}

impl CallbackError {
    /// Return the canonical error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallbackError::InvalidTarget { .. } => ErrorKind::InvalidTarget,
            CallbackError::ClassNotFound { .. } => ErrorKind::ClassNotFound,
            CallbackError::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            CallbackError::InvalidMethodName => ErrorKind::InvalidMethodName,
        }
    }

    /// Return the canonical kind name (e.g. `"ClassNotFoundError"`).
    pub fn kind_name(&self) -> &'static str {
        vocab::as_str(self.kind())
    }
}

/// Failure reported by the host dispatch mechanism, or raised by an invoked method body.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DispatchError {
    #[error("{}", vocab::undefined_method(.target, .method))]
    #[diagnostic(code(bayrell::dispatch::undefined_method))]
    UndefinedMethod { target: String, method: String },

    #[error("{}", vocab::non_static_call(.class, .method))]
    #[diagnostic(
        code(bayrell::dispatch::non_static_call),
        help("bind the callback to an object instance to call instance methods")
    )]
    NonStaticCall { class: String, method: String },

    #[error("{}", argument_count_message(.method, .expected, .found))]
    #[diagnostic(code(bayrell::dispatch::argument_count))]
    ArgumentCount {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("{}", argument_type_message(.method, .index, .expected, .found))]
    #[diagnostic(code(bayrell::dispatch::argument_type))]
    ArgumentType {
        method: String,
        /// 1-based argument position.
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{message}")]
    #[diagnostic(code(bayrell::dispatch::raised))]
    Raised { message: String },
}

impl DispatchError {
    /// Error for a call to a method the target does not have.
    pub fn undefined_method(target: impl Into<String>, method: impl Into<String>) -> Self {
        DispatchError::UndefinedMethod {
            target: target.into(),
            method: method.into(),
        }
    }

    /// Error raised by a method body. This is what user-level method implementations return.
    pub fn raise(message: impl Into<String>) -> Self {
        DispatchError::Raised {
            message: message.into(),
        }
    }

    /// Return the canonical error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::UndefinedMethod { .. } => ErrorKind::UndefinedMethod,
            DispatchError::NonStaticCall { .. } => ErrorKind::NonStaticCall,
            DispatchError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            DispatchError::ArgumentType { .. } => ErrorKind::ArgumentType,
            DispatchError::Raised { .. } => ErrorKind::Raised,
        }
    }

    /// Return the canonical kind name (e.g. `"UndefinedMethodError"`).
    pub fn kind_name(&self) -> &'static str {
        vocab::as_str(self.kind())
    }
}

/// Failure to register a class descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RegistryError {
    #[error("class {name} is already registered")]
    #[diagnostic(
        code(bayrell::registry::duplicate_class),
        help("use `DuplicatePolicy::Replace` to allow re-registration")
    )]
    DuplicateClass { name: String },

    #[error("invalid class name '{name}'")]
    #[diagnostic(
        code(bayrell::registry::invalid_class_name),
        help("class names are identifiers separated by '.' or '\\'")
    )]
    InvalidClassName { name: String },

    #[error("invalid method name '{method}' in class {class}")]
    #[diagnostic(code(bayrell::registry::invalid_method_name))]
    InvalidMethodName { class: String, method: String },
}

impl RegistryError {
    /// Return the canonical error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::DuplicateClass { .. } => ErrorKind::DuplicateClass,
            RegistryError::InvalidClassName { .. } => ErrorKind::InvalidClassName,
            RegistryError::InvalidMethodName { .. } => ErrorKind::InvalidMethodName,
        }
    }

    /// Return the canonical error name (e.g. `"DuplicateClassError"`).
    pub fn kind_name(&self) -> &'static str {
        vocab::as_str(self.kind())
    }
}

fn invalid_target_message(found: &ValueKind) -> String {
    vocab::invalid_target(kinds::as_str(*found))
}

fn argument_count_message(method: &str, expected: &usize, found: &usize) -> String {
    vocab::argument_count(method, *expected, *found)
}

fn argument_type_message(method: &str, index: &usize, expected: &str, found: &str) -> String {
    vocab::argument_type(method, *index, expected, found)
}

/// A [`Value`](crate::Value) did not have the kind a conversion expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueTypeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: &'static str, found: ValueKind) -> Self {
        Self {
            expected,
            found: kinds::as_str(found),
        }
    }
}
