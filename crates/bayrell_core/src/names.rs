//! Class-name canonicalization and identifier rules.
//!
//! Class identifiers are namespaced. Generated code may spell them with dots (`Runtime.Lib.Greeter`) or with the
//! host namespace separator (`Runtime\Lib\Greeter`, optionally fully qualified as `\Runtime\Lib\Greeter`). All of
//! these name the same class; the canonical form is the dotted one without a leading separator.
//!
//! ## Examples
//! ```rust
//! use bayrell_core::names;
//!
//! assert_eq!(names::canonical_class_name("\\Runtime\\Greeter").as_deref(), Some("Runtime.Greeter"));
//! assert_eq!(names::canonical_class_name("Runtime..Greeter"), None);
//! ```

/// Separator used by the canonical form.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator accepted from host-namespace spellings.
pub const HOST_NAMESPACE_SEPARATOR: char = '\\';

/// Return true if `s` is a valid identifier: a letter or `_`, followed by letters, digits or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Convert a class identifier to its canonical dotted form.
///
/// Surrounding whitespace and a single leading separator are ignored. Returns `None` when the identifier is
/// empty, has an empty segment, or has a segment that is not an identifier.
pub fn canonical_class_name(identifier: &str) -> Option<String> {
    let trimmed = identifier.trim();
    let body = trimmed
        .strip_prefix(HOST_NAMESPACE_SEPARATOR)
        .or_else(|| trimmed.strip_prefix(NAMESPACE_SEPARATOR))
        .unwrap_or(trimmed);
    if body.is_empty() {
        return None;
    }

    let mut canonical = String::with_capacity(body.len());
    for (i, segment) in body
        .split(|c: char| c == NAMESPACE_SEPARATOR || c == HOST_NAMESPACE_SEPARATOR)
        .enumerate()
    {
        if !is_identifier(segment) {
            return None;
        }
        if i > 0 {
            canonical.push(NAMESPACE_SEPARATOR);
        }
        canonical.push_str(segment);
    }
    Some(canonical)
}

/// Return true if a method name is empty or all whitespace.
pub fn is_blank_method_name(name: &str) -> bool {
    name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("hello"));
        assert!(is_identifier("_private2"));
        assert!(is_identifier("Grüße"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("dash-ed"));
    }

    #[test]
    fn canonical_forms_agree() {
        let expected = Some("Runtime.Lib.Greeter".to_string());
        assert_eq!(canonical_class_name("Runtime.Lib.Greeter"), expected);
        assert_eq!(canonical_class_name("Runtime\\Lib\\Greeter"), expected);
        assert_eq!(canonical_class_name("\\Runtime\\Lib\\Greeter"), expected);
        assert_eq!(canonical_class_name("  Runtime.Lib\\Greeter "), expected);
    }

    #[test]
    fn single_segment_is_canonical() {
        assert_eq!(canonical_class_name("Greeter").as_deref(), Some("Greeter"));
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert_eq!(canonical_class_name(""), None);
        assert_eq!(canonical_class_name("\\"), None);
        assert_eq!(canonical_class_name("Runtime."), None);
        assert_eq!(canonical_class_name("\\\\Runtime"), None);
        assert_eq!(canonical_class_name("Runtime.9Lib"), None);
    }

    #[test]
    fn blank_method_names() {
        assert!(is_blank_method_name(""));
        assert!(is_blank_method_name("  \t"));
        assert!(!is_blank_method_name("hello"));
    }
}
