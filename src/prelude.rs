//! Prelude module for common runtime imports.
//!
//! Import this in generated code to get access to the dispatch surface:
//!
//! ```ignore
//! use bayrell_rtl::prelude::*;
//! ```

pub use crate::callback::Callback;
pub use crate::class::{ClassBuilder, RuntimeClass};
pub use crate::conversions::{FromValue, IntoValue};
pub use crate::errors::{CallbackError, DispatchError, DispatchResult};
pub use crate::object::Object;
pub use crate::registry::{ClassRegistry, Registry};
pub use crate::value::{ObjectRef, Value};

pub use crate::invoke;
pub use bayrell_derive::runtime_class;
