//! Value-kind vocabulary.
//!
//! The runtime's `Value` enum reports its variant through [`ValueKind`]; messages such as
//! `Argument #1 must be of type string, int given` use the canonical spellings below.

use crate::registry::{self, VocabInfo};

/// Stable identity of each runtime value variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Vector,
    Map,
    Object,
    Callback,
}

/// Metadata for a value kind.
pub type ValueKindInfo = VocabInfo<ValueKind>;

/// Registry of value kinds.
pub const VALUE_KINDS: &[ValueKindInfo] = &[
    info(ValueKind::Null, "null", &["none"], "The absent value."),
    info(ValueKind::Bool, "bool", &["boolean"], "A boolean."),
    info(ValueKind::Int, "int", &["integer"], "A signed 64-bit integer."),
    info(ValueKind::Float, "float", &["double"], "A 64-bit floating point number."),
    info(ValueKind::Str, "string", &["str"], "A UTF-8 string."),
    info(ValueKind::Vector, "vector", &["array", "list"], "An ordered sequence of values."),
    info(ValueKind::Map, "map", &["dict"], "A string-keyed map of values, ordered by key."),
    info(ValueKind::Object, "object", &[], "A live object instance."),
    info(ValueKind::Callback, "callback", &["callable"], "A bound callable reference."),
];

/// Return the canonical spelling for a value kind (e.g. `"string"`).
#[inline]
pub fn as_str(kind: ValueKind) -> &'static str {
    info_for(kind).canonical
}

/// Resolve a spelling (canonical or alias) to a value kind.
pub fn from_str(name: &str) -> Option<ValueKind> {
    registry::find_by_name(VALUE_KINDS, name)
}

/// Return full metadata for a value kind.
///
/// ## Panics
/// - If the registry is missing an entry for `kind` (programming error).
pub fn info_for(kind: ValueKind) -> &'static ValueKindInfo {
    registry::find_by_id(VALUE_KINDS, kind).expect("INVARIANT: every ValueKind has a VALUE_KINDS entry")
}

const fn info(
    id: ValueKind,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> ValueKindInfo {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
