//! Canonical structured document for an ADT-1 filing.
//!
//! Serialised as the `structured_data` section of an extraction record.
//! Every declared field is always present: missing values are carried as
//! [`FieldValue::NotSpecified`] and serialise as the literal
//! `"Not specified"`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::context::{AppointmentType, RegulatorySection};

/// Sentinel text written for fields with no real value.
pub const NOT_SPECIFIED: &str = "Not specified";

pub const DOCUMENT_TYPE: &str = "ADT-1 Form - Notice of Auditor Appointment";
pub const PURPOSE: &str =
    "This document notifies the Registrar of Companies about the appointment of an auditor";
pub const LEGAL_FRAMEWORK: &str = "Filed under the Companies Act, 2013";

/// A string field that is either present on the form or explicitly unspecified.
///
/// Keeps "missing" apart from a form that literally says "Not specified";
/// the two only collapse when serialised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    Given(String),
    #[default]
    NotSpecified,
}

impl FieldValue {
    pub fn given(value: impl Into<String>) -> Self {
        Self::Given(value.into())
    }

    pub fn as_given(&self) -> Option<&str> {
        match self {
            Self::Given(v) => Some(v),
            Self::NotSpecified => None,
        }
    }

    pub fn is_specified(&self) -> bool {
        matches!(self, Self::Given(_))
    }

    /// Text as it appears in the output, sentinel included.
    pub fn as_str(&self) -> &str {
        self.as_given().unwrap_or(NOT_SPECIFIED)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::NotSpecified, Self::given)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Digital-signature indicator in the compliance section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStatus {
    Present,
    NotVerified,
}

impl SignatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::NotVerified => "Not verified",
        }
    }
}

impl fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SignatureStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryContext {
    pub purpose: &'static str,
    pub legal_framework: &'static str,
    pub appointment_nature: AppointmentType,
    pub compliance_sections: Vec<RegulatorySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyInformation {
    pub name: FieldValue,
    pub cin: FieldValue,
    #[serde(rename = "type")]
    pub company_type: FieldValue,
    pub email: FieldValue,
    pub address: FieldValue,
    pub state: FieldValue,
    pub pincode: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditorInformation {
    pub firm_name: FieldValue,
    pub pan: FieldValue,
    pub membership_number: FieldValue,
    pub email: FieldValue,
    pub address: FieldValue,
    pub qualification: FieldValue,
    /// Defaults to "1": a single auditor unless the form says otherwise.
    pub number_of_auditors: String,
    pub joint_appointment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDetails {
    pub appointment_date: FieldValue,
    pub audit_period_start: FieldValue,
    pub audit_period_end: FieldValue,
    pub financial_years_count: FieldValue,
    pub agm_date: FieldValue,
    pub agm_conducted: bool,
    pub resolution_number: FieldValue,
    pub director_din: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceInformation {
    pub form_filing_date: FieldValue,
    pub receipt_date: FieldValue,
    pub certificate_serial: FieldValue,
    pub attachments: Vec<String>,
    pub digital_signature: SignatureStatus,
}

/// Uninterpolated sentence templates for downstream summarisers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTemplate {
    pub executive_summary: &'static str,
    pub key_parties: &'static str,
    pub timeline: &'static str,
    pub compliance_status: &'static str,
}

impl Default for SummaryTemplate {
    fn default() -> Self {
        Self {
            executive_summary: "This ADT-1 form represents the {appointment_nature} of {auditor_firm_name} as auditor for {company_name} (CIN: {company_cin}) for the financial period from {audit_period_start} to {audit_period_end}.",
            key_parties: "Company: {company_name}, Auditor: {auditor_firm_name}",
            timeline: "Appointment effective from {appointment_date}, covering {financial_years_count} financial year(s)",
            compliance_status: "Form filed on {form_filing_date} with certificate serial {certificate_serial}",
        }
    }
}

/// The assembled `structured_data` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalDocument {
    pub document_type: &'static str,
    pub summary_context: SummaryContext,
    pub company_information: CompanyInformation,
    pub auditor_information: AuditorInformation,
    pub appointment_details: AppointmentDetails,
    pub compliance_information: ComplianceInformation,
    pub key_narrative_points: Vec<String>,
    pub summary_template: SummaryTemplate,
}
