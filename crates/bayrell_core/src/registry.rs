//! Shareable metadata for the vocabulary tables in this crate.
//!
//! Every table (`errors::ERROR_KINDS`, `kinds::VALUE_KINDS`) is a `const` slice of [`VocabInfo`], so lookups are
//! deterministic and tooling can enumerate them.

/// Shared metadata shape for "registry-first" vocabulary items.
///
/// ## Notes
/// - `canonical` is the spelling used in messages; `aliases` are accepted when parsing names back.
/// - This type is `Copy` so tables can live in `const` items.
///
/// ## Examples
/// ```rust
/// use bayrell_core::registry::VocabInfo;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color {
///     Red,
/// }
///
/// const RED: VocabInfo<Color> = VocabInfo {
///     id: Color::Red,
///     canonical: "red",
///     aliases: &["rouge"],
///     description: "The color red.",
/// };
/// assert!(RED.matches("rouge"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id> VocabInfo<Id> {
    /// Return true if `name` is the canonical spelling or one of the aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.canonical == name || self.aliases.contains(&name)
    }
}

/// Find the entry for `id` in a vocabulary table.
pub(crate) fn find_by_id<Id: PartialEq + Copy>(
    table: &'static [VocabInfo<Id>],
    id: Id,
) -> Option<&'static VocabInfo<Id>> {
    table.iter().find(|info| info.id == id)
}

/// Resolve a spelling to an id, preferring canonical spellings over aliases.
pub(crate) fn find_by_name<Id: Copy>(table: &'static [VocabInfo<Id>], name: &str) -> Option<Id> {
    if let Some(info) = table.iter().find(|info| info.canonical == name) {
        return Some(info.id);
    }
    table.iter().find(|info| info.aliases.contains(&name)).map(|info| info.id)
}
