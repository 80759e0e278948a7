#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! Bayrell runtime: dynamic dispatch support for code generated by the Bayrell compiler.
//!
//! Generated programs register their classes in an explicitly constructed [`Registry`] and pass method references
//! around as [`Callback`] values. A callback binds a target (a class looked up by name, or a live object) and a method
//! name once, then can be invoked any number of times with ordered [`Value`] arguments.
//!
//! ## Crate layout
//!
//! - [`value`] / [`conversions`]: the dynamic value type and Rust conversions.
//! - [`class`] / [`object`]: class descriptors (static methods) and the `Object` trait (instance methods).
//! - [`registry`]: the `ClassRegistry` lookup trait and the in-memory `Registry`.
//! - [`callback`]: `Callback`, the callable reference.
//! - [`config`], [`errors`].
//!
//! ## Panic Policy
//!
//! Library code returns `Result`s (`CallbackResult`, `DispatchResult`, `Result<_, RegistryError>`) and never unwraps.
//! Errors raised by invoked methods pass through callbacks untouched.

// Lets `#[runtime_class]` expansions refer to `::bayrell_rtl` from inside this crate's own tests.
extern crate self as bayrell_rtl;

pub mod callback;
pub mod class;
pub mod config;
pub mod conversions;
pub mod errors;
pub mod object;
pub mod prelude;
pub mod registry;
pub mod value;

pub use callback::{Callback, Target};
pub use class::{ClassBuilder, ClassDescriptor, ClassHandle, MethodEntry, MethodKind, RuntimeClass, StaticFn};
pub use config::{CallbackConfig, DuplicatePolicy, InstanceValidation, RegistryConfig};
pub use conversions::{FromValue, IntoValue};
pub use errors::{CallbackError, CallbackResult, DispatchError, DispatchResult, RegistryError, ValueTypeError};
pub use object::Object;
pub use registry::{ClassRegistry, Registry};
pub use value::{ObjectRef, Value};

pub use bayrell_derive::runtime_class;
