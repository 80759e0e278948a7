//! Canonical error vocabulary shared by the runtime and generated dispatch code.
//!
//! Error *types* live in `bayrell_rtl`; this module owns their stable identities ([`ErrorKind`]), canonical names
//! (`ClassNotFoundError`, ...) and the user-facing message text, so every producer formats them the same way.
//!
//! ## Examples
//! ```rust
//! use bayrell_core::errors::{self, ErrorKind};
//!
//! assert_eq!(errors::as_str(ErrorKind::ClassNotFound), "ClassNotFoundError");
//! assert_eq!(errors::from_str("MethodNotFoundError"), Some(ErrorKind::MethodNotFound));
//! assert_eq!(errors::class_not_found("Nope"), "Class Nope not found");
//! ```

use crate::registry::{self, VocabInfo};

/// Stable identity of every error the runtime can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Callback construction.
    InvalidTarget,
    ClassNotFound,
    MethodNotFound,
    InvalidMethodName,
    // Host dispatch.
    UndefinedMethod,
    NonStaticCall,
    ArgumentCount,
    ArgumentType,
    Raised,
    // Registry.
    DuplicateClass,
    InvalidClassName,
}

/// Metadata for an error kind.
pub type ErrorKindInfo = VocabInfo<ErrorKind>;

/// Registry of error kinds.
pub const ERROR_KINDS: &[ErrorKindInfo] = &[
    info(
        ErrorKind::InvalidTarget,
        "InvalidTargetError",
        &[],
        "A callback target is neither a class name nor an object instance.",
    ),
    info(
        ErrorKind::ClassNotFound,
        "ClassNotFoundError",
        &[],
        "A class identifier does not resolve to any registered class.",
    ),
    info(
        ErrorKind::MethodNotFound,
        "MethodNotFoundError",
        &[],
        "A resolved class does not declare the requested method.",
    ),
    info(
        ErrorKind::InvalidMethodName,
        "InvalidMethodNameError",
        &[],
        "A callback was constructed with an empty method name.",
    ),
    info(
        ErrorKind::UndefinedMethod,
        "UndefinedMethodError",
        &["BadMethodCallException"],
        "Dispatch reached a target that has no method with the requested name.",
    ),
    info(
        ErrorKind::NonStaticCall,
        "NonStaticCallError",
        &[],
        "An instance-only method was invoked on a class rather than on an instance.",
    ),
    info(
        ErrorKind::ArgumentCount,
        "ArgumentCountError",
        &[],
        "A method received the wrong number of arguments.",
    ),
    info(
        ErrorKind::ArgumentType,
        "TypeError",
        &["ArgumentTypeError"],
        "A method argument has a value of the wrong kind.",
    ),
    info(
        ErrorKind::Raised,
        "RuntimeException",
        &[],
        "An error raised by the body of an invoked method.",
    ),
    info(
        ErrorKind::DuplicateClass,
        "DuplicateClassError",
        &[],
        "A class name is registered twice under the reject policy.",
    ),
    info(
        ErrorKind::InvalidClassName,
        "InvalidClassNameError",
        &[],
        "A class name is empty or contains a segment that is not an identifier.",
    ),
];

/// Return the canonical spelling for an error kind (e.g. `"ClassNotFoundError"`).
#[inline]
pub fn as_str(kind: ErrorKind) -> &'static str {
    info_for(kind).canonical
}

/// Return the user-facing description for an error kind.
#[inline]
pub fn description(kind: ErrorKind) -> &'static str {
    info_for(kind).description
}

/// Resolve a spelling to an error kind.
///
/// Matching is case-sensitive.
pub fn from_str(name: &str) -> Option<ErrorKind> {
    registry::find_by_name(ERROR_KINDS, name)
}

/// Return full metadata for an error kind.
///
/// ## Panics
/// - If the registry is missing an entry for `kind` (programming error).
pub fn info_for(kind: ErrorKind) -> &'static ErrorKindInfo {
    registry::find_by_id(ERROR_KINDS, kind).expect("INVARIANT: every ErrorKind has an ERROR_KINDS entry")
}

// ---- Canonical messages ----

/// `Wrong object name: expected a class name or an object, found {found}`
pub fn invalid_target(found: &str) -> String {
    format!("Wrong object name: expected a class name or an object, found {found}")
}

/// `Class {name} not found`
pub fn class_not_found(name: &str) -> String {
    format!("Class {name} not found")
}

/// `Method '{method}' not found in {class}`
pub fn method_not_found(class: &str, method: &str) -> String {
    format!("Method '{method}' not found in {class}")
}

/// `Call to undefined method {target}::{method}()`
pub fn undefined_method(target: &str, method: &str) -> String {
    format!("Call to undefined method {target}::{method}()")
}

/// `Non-static method {class}::{method}() cannot be called statically`
pub fn non_static_call(class: &str, method: &str) -> String {
    format!("Non-static method {class}::{method}() cannot be called statically")
}

/// `{method}() expects exactly {expected} argument(s), {found} given`
pub fn argument_count(method: &str, expected: usize, found: usize) -> String {
    let noun = if expected == 1 { "argument" } else { "arguments" };
    format!("{method}() expects exactly {expected} {noun}, {found} given")
}

/// `{method}(): Argument #{index} must be of type {expected}, {found} given`
///
/// `index` is 1-based.
pub fn argument_type(method: &str, index: usize, expected: &str, found: &str) -> String {
    format!("{method}(): Argument #{index} must be of type {expected}, {found} given")
}

const fn info(
    id: ErrorKind,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> ErrorKindInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
