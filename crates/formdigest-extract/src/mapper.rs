//! Raw form fields → canonical field names.

use formdigest_core::field_key::{is_reserved, strip_index_suffix};
use formdigest_core::{CanonicalFieldSet, FieldMappingTable, RawFieldSet};
use tracing::debug;

/// Rename and filter raw fields into a [`CanonicalFieldSet`].
///
/// Blank values and reserved identifiers are dropped; index suffixes are
/// stripped before lookup; unknown identifiers pass through under their
/// stripped name. When two raw identifiers land on the same canonical name
/// the one later in reader order wins.
pub fn map_fields(raw: &RawFieldSet, table: &FieldMappingTable) -> CanonicalFieldSet {
    let mut mapped = CanonicalFieldSet::new();

    for (identifier, value) in raw.iter() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let stripped = strip_index_suffix(identifier);
        if is_reserved(stripped) {
            debug!(identifier, "skipping reserved field");
            continue;
        }

        let canonical = table.canonical_name(stripped);
        if let Some(previous) = mapped.insert(canonical, value) {
            debug!(
                identifier,
                canonical,
                replaced = %previous,
                "canonical field overwritten by later raw field"
            );
        }
    }

    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawFieldSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn renames_known_identifiers() {
        let table = FieldMappingTable::builtin();
        let out = map_fields(&raw(&[("CIN_C", "U12345MH2020PTC000001")]), &table);
        assert_eq!(out.get("company_cin"), Some("U12345MH2020PTC000001"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn index_suffix_maps_like_bare_identifier() {
        let table = FieldMappingTable::builtin();
        let with_suffix = map_fields(&raw(&[("CompanyName_C[0]", "Acme")]), &table);
        let bare = map_fields(&raw(&[("CompanyName_C", "Acme")]), &table);
        assert_eq!(with_suffix, bare);
        assert_eq!(with_suffix.get("company_name"), Some("Acme"));
    }

    #[test]
    fn unknown_identifier_passes_through_stripped() {
        let table = FieldMappingTable::builtin();
        let out = map_fields(&raw(&[("Remarks_C[3]", "none")]), &table);
        assert_eq!(out.get("Remarks_C"), Some("none"));
    }

    #[test]
    fn empty_table_keeps_stripped_identifiers() {
        let table = FieldMappingTable::empty();
        let out = map_fields(&raw(&[("CIN_C[0]", "U1"), ("HiddenState", "x")]), &table);
        assert_eq!(out.get("CIN_C"), Some("U1"));
        assert!(out.get("company_cin").is_none());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn blank_values_are_skipped() {
        let table = FieldMappingTable::builtin();
        let out = map_fields(&raw(&[("CIN_C", "   "), ("PAN_C", "")]), &table);
        assert!(out.is_empty());
    }

    #[test]
    fn values_are_trimmed() {
        let table = FieldMappingTable::builtin();
        let out = map_fields(&raw(&[("PAN_C", "  ABCDE1234F \n")]), &table);
        assert_eq!(out.get("auditor_pan"), Some("ABCDE1234F"));
    }

    #[test]
    fn reserved_identifiers_never_survive() {
        let table = FieldMappingTable::builtin();
        let out = map_fields(
            &raw(&[
                ("HiddenField", "x"),
                ("SID[0]", "x"),
                ("call_id", "x"),
                ("Form_ID", "x"),
                ("FormVersion", "x"),
                ("ReaderExt", "x"),
                ("DigitalSignature_C", "x"),
                ("CIN_C", "kept"),
            ]),
            &table,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("company_cin"), Some("kept"));
    }

    #[test]
    fn blocklist_checks_raw_name_not_canonical_name() {
        // A mapping onto a "sign"-like canonical name is not blocked.
        let table = FieldMappingTable::builtin().with_overrides([("Dsc_C", "signatory")]);
        let out = map_fields(&raw(&[("Dsc_C", "Jane")]), &table);
        assert_eq!(out.get("signatory"), Some("Jane"));
    }

    #[test]
    fn later_raw_field_wins_conflict() {
        let table = FieldMappingTable::builtin().with_overrides([("FilingDate_C", "form_date")]);
        let out = map_fields(
            &raw(&[("current_date", "01/01/2024"), ("FilingDate_C", "02/01/2024")]),
            &table,
        );
        assert_eq!(out.get("form_date"), Some("02/01/2024"));
    }

    #[test]
    fn empty_input_maps_to_empty_set() {
        let out = map_fields(&RawFieldSet::new(), &FieldMappingTable::builtin());
        assert!(out.is_empty());
    }
}
