//! Raw field identifier normalisation.
//!
//! PDF form writers disambiguate repeated widgets by appending an array
//! index (`CIN_C[0]`, `CIN_C[1]`). Those suffixes carry no meaning for the
//! canonical schema, so lookups always go through [`strip_index_suffix`].
//!
//! # Reserved identifiers
//!
//! System and bookkeeping fields (hidden state, session ids, form version
//! stamps, reader hints, signature widgets) are recognised by substring and
//! never reach the canonical field set. See [`RESERVED_SUBSTRINGS`].

use std::sync::LazyLock;

use regex::Regex;

/// Lower-case substrings that mark a raw identifier as a system field.
pub const RESERVED_SUBSTRINGS: &[&str] = &[
    "hidden", "sid", "call_id", "form_id", "version", "reader", "sign",
];

/// Suffix marking a canonical field as a fallback source for its primary.
pub const ALT_SUFFIX: &str = "_alt";

static INDEX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]$").unwrap());

/// Remove one trailing `[<digits>]` array-index suffix.
///
/// "CIN_C[0]" → "CIN_C", "Attachment_C[12]" → "Attachment_C",
/// "a[0][1]" → "a[0]". Identifiers without a suffix are returned unchanged.
pub fn strip_index_suffix(identifier: &str) -> &str {
    match INDEX_SUFFIX.find(identifier) {
        Some(m) => &identifier[..m.start()],
        None => identifier,
    }
}

/// Whether an identifier names a system field that must be dropped.
///
/// The check is case-insensitive and matches anywhere in the identifier,
/// so `Signature_C`, `HiddenState` and `FormVersion` are all reserved.
pub fn is_reserved(identifier: &str) -> bool {
    let lower = identifier.to_lowercase();
    RESERVED_SUBSTRINGS.iter().any(|r| lower.contains(r))
}

/// Primary name for an alt field, or `None` when `name` is itself primary.
///
/// Repeated suffixes are all removed: "city_alt_alt" → "city". This keeps
/// consolidation idempotent since no output name ever ends in `_alt`.
pub fn alt_base(name: &str) -> Option<&str> {
    let mut base = name.strip_suffix(ALT_SUFFIX)?;
    while let Some(shorter) = base.strip_suffix(ALT_SUFFIX) {
        base = shorter;
    }
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_index() {
        assert_eq!(strip_index_suffix("CIN_C[0]"), "CIN_C");
        assert_eq!(strip_index_suffix("Attachment_C[12]"), "Attachment_C");
    }

    #[test]
    fn strips_only_the_last_index() {
        assert_eq!(strip_index_suffix("a[0][1]"), "a[0]");
    }

    #[test]
    fn leaves_plain_identifiers() {
        assert_eq!(strip_index_suffix("CIN_C"), "CIN_C");
        assert_eq!(strip_index_suffix(""), "");
    }

    #[test]
    fn ignores_non_numeric_brackets() {
        assert_eq!(strip_index_suffix("field[x]"), "field[x]");
        assert_eq!(strip_index_suffix("field[]"), "field[]");
        assert_eq!(strip_index_suffix("field[0]tail"), "field[0]tail");
    }

    #[test]
    fn reserved_is_case_insensitive() {
        assert!(is_reserved("HiddenState"));
        assert!(is_reserved("Signature_C"));
        assert!(is_reserved("FORM_ID"));
        assert!(is_reserved("FormVersion"));
        assert!(is_reserved("ReaderExtensions"));
        assert!(is_reserved("session_sid"));
        assert!(is_reserved("Call_ID_1"));
    }

    #[test]
    fn regular_fields_not_reserved() {
        assert!(!is_reserved("CIN_C"));
        assert!(!is_reserved("CompanyName_C"));
        assert!(!is_reserved("DateOfAccAuditedFrom_D"));
    }

    #[test]
    fn reserved_substring_inside_word() {
        // "Residence" contains "sid".
        assert!(is_reserved("ResidenceAddress"));
    }

    #[test]
    fn alt_base_strips_suffix() {
        assert_eq!(alt_base("company_city_alt"), Some("company_city"));
        assert_eq!(alt_base("company_city"), None);
    }

    #[test]
    fn alt_base_strips_repeated_suffix() {
        assert_eq!(alt_base("company_city_alt_alt"), Some("company_city"));
    }

    #[test]
    fn alt_base_of_bare_suffix() {
        assert_eq!(alt_base("_alt"), Some(""));
    }
}
