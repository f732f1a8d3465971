//! Merge `_alt` synonym fields into their primaries.

use formdigest_core::CanonicalFieldSet;
use formdigest_core::field_key::alt_base;

/// Fold every `<name>_alt` entry into `<name>`.
///
/// A primary keeps its own non-empty value; an absent or empty primary takes
/// the alt's value. Alt names are never emitted, so the result contains no
/// `_alt` entries and consolidating it again changes nothing. When several
/// alts compete for one primary, the first in name order wins.
pub fn consolidate(fields: &CanonicalFieldSet) -> CanonicalFieldSet {
    let mut primaries = CanonicalFieldSet::new();
    let mut alts: Vec<(&str, &str)> = Vec::new();

    for (name, value) in fields.iter() {
        match alt_base(name) {
            Some(base) => alts.push((base, value)),
            None => {
                primaries.insert(name, value);
            }
        }
    }

    for (base, value) in alts {
        if !primaries.contains(base) {
            primaries.insert(base, value);
        }
    }

    primaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> CanonicalFieldSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn alt_fills_absent_primary() {
        let out = consolidate(&set(&[("company_city_alt", "Pune")]));
        assert_eq!(out.get("company_city"), Some("Pune"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn primary_beats_alt() {
        let out = consolidate(&set(&[
            ("company_city", "Mumbai"),
            ("company_city_alt", "Pune"),
        ]));
        assert_eq!(out.get("company_city"), Some("Mumbai"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn alt_fills_empty_primary() {
        let out = consolidate(&set(&[("agm_date", ""), ("agm_date_alt", "30/09/2023")]));
        assert_eq!(out.get("agm_date"), Some("30/09/2023"));
    }

    #[test]
    fn alt_names_never_survive() {
        let out = consolidate(&set(&[
            ("auditor_email_alt", "a@example.com"),
            ("company_pincode_alt", "411001"),
            ("company_name", "Acme"),
        ]));
        assert!(out.names().all(|n| !n.ends_with("_alt")));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn first_alt_in_name_order_wins() {
        let out = consolidate(&set(&[
            ("city_alt", "first"),
            ("city_alt_alt", "second"),
        ]));
        assert_eq!(out.get("city"), Some("first"));
    }

    #[test]
    fn idempotent() {
        let inputs = [
            set(&[]),
            set(&[("a", "1"), ("a_alt", "2"), ("b_alt", "3")]),
            set(&[("x_alt_alt", "deep"), ("y", ""), ("y_alt", "fill")]),
            set(&[("_alt", "bare"), ("plain", "v")]),
        ];
        for input in &inputs {
            let once = consolidate(input);
            let twice = consolidate(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn unrelated_fields_pass_through() {
        let input = set(&[("resolution_number", "R-12"), ("director_din", "0001")]);
        assert_eq!(consolidate(&input), input);
    }
}
