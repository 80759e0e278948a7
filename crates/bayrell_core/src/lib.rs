//! Provide shared, pure vocabulary and naming rules for the Bayrell runtime.
//!
//! This crate is intentionally small and dependency-free. It holds the pieces that both:
//! - the runtime (`bayrell_rtl`) uses when it raises errors and resolves classes, and
//! - the `#[runtime_class]` macro (`bayrell_derive`) relies on so generated dispatch code reports the same names,
//!
//! agree on.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no runtime types.
//! - Current scope: canonical error-kind names and messages, value-kind names, class-name canonicalization.

pub mod errors;
pub mod kinds;
pub mod names;
pub mod registry;
