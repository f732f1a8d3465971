//! Raw identifier → canonical field name table for ADT-1 forms.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("cannot read mapping file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("mapping overrides must be a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Built-in renames, grouped by form section.
///
/// Names ending in `_alt` are synonym sources merged into their primary
/// during consolidation.
const BUILTIN: &[(&str, &str)] = &[
    // Company
    ("CIN_C", "company_cin"),
    ("CompanyName_C", "company_name"),
    ("EmailId_C", "company_email"),
    ("GLN_C", "company_gln"),
    ("permaddress1a_C", "company_address_line1"),
    ("permaddress2a_C", "company_address_line2"),
    ("permaddress2b_C", "company_address_line2_alt"),
    ("permaddress3a_C", "company_address_line3"),
    ("cityname_C", "company_city"),
    ("City_C", "company_city_alt"),
    ("pincode_C", "company_pincode"),
    ("Pin_C", "company_pincode_alt"),
    ("statename_C", "company_state"),
    ("State_P", "company_state_alt"),
    ("countryname_C", "company_country"),
    ("Country_C", "company_country_alt"),
    // Auditor
    ("PAN_C", "auditor_pan"),
    ("NameAuditorFirm_C", "auditor_firm_name"),
    ("MemberShNum", "auditor_membership_number"),
    ("AuditorNumber", "number_of_auditors"),
    ("auditoraddress1a_C", "auditor_address_line1"),
    ("auditoraddress2a_C", "auditor_address_line2"),
    ("auditoraddress3a_C", "auditor_address_line3"),
    ("auditorcityname_C", "auditor_city"),
    ("auditorpincode_C", "auditor_pincode"),
    ("auditorstatename_C", "auditor_state"),
    ("auditorcountryname_C", "auditor_country"),
    ("auditoremailid_C", "auditor_email"),
    ("email", "auditor_email_alt"),
    // Appointment
    ("appointmentdate_C", "appointment_date"),
    ("agmdate_C", "agm_date"),
    ("DateAnnualGenMeet_D", "agm_date_alt"),
    ("periodfrom_C", "period_from"),
    ("periodto_C", "period_to"),
    ("DateOfAccAuditedFrom_D", "audit_period_from"),
    ("DateOfAccAuditedTo_D", "audit_period_to"),
    ("nofinyears_C", "number_of_financial_years"),
    ("NumOfFinanYearApp", "number_of_financial_years_alt"),
    ("CurrDate", "current_date"),
    ("current_date", "form_date"),
    ("DateOfAppSect_D", "appointment_section_date"),
    ("DateReceipt_D", "receipt_date"),
    // Additional
    ("DINOfDir_C", "director_din"),
    ("ResoNum", "resolution_number"),
    ("serialNumber", "certificate_serial_number"),
    ("Attachment_C", "attachments"),
];

/// Read-only rename table consulted by the field mapper.
///
/// Build once at startup with [`builtin`](Self::builtin), optionally extend
/// with [`with_overrides`](Self::with_overrides), then share by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappingTable {
    renames: HashMap<String, String>,
}

impl Default for FieldMappingTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldMappingTable {
    /// The ADT-1 table.
    pub fn builtin() -> Self {
        Self {
            renames: BUILTIN
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// An empty table: every identifier passes through unchanged.
    pub fn empty() -> Self {
        Self {
            renames: HashMap::new(),
        }
    }

    /// Add or replace renames.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (raw, canonical) in overrides {
            self.renames.insert(raw.into(), canonical.into());
        }
        self
    }

    /// Extend the built-in table with a JSON object of `raw: canonical` pairs.
    pub fn with_overrides_json(self, json: &str) -> Result<Self, MappingError> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(self.with_overrides(overrides))
    }

    /// Load overrides from a JSON file on top of the built-in table.
    pub fn load_with_overrides(path: &Path) -> Result<Self, MappingError> {
        let json = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::builtin().with_overrides_json(&json)?;
        info!(path = %path.display(), entries = table.len(), "loaded field mapping overrides");
        Ok(table)
    }

    /// Canonical name for a stripped raw identifier, if the table has one.
    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.renames.get(identifier).map(String::as_str)
    }

    /// Canonical name with pass-through for unknown identifiers.
    pub fn canonical_name<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.lookup(identifier).unwrap_or(identifier)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}
