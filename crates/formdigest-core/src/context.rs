//! Facts inferred from a form's free-text layer.

use std::fmt;

use serde::{Serialize, Serializer};

/// Nature of the auditor appointment. Exactly one applies per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentType {
    FirstAppointment,
    Reappointment,
    CasualVacancy,
    #[default]
    Unknown,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstAppointment => "First Appointment",
            Self::Reappointment => "Reappointment",
            Self::CasualVacancy => "Casual Vacancy",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Legal form of the filing company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyType {
    PrivateLimited,
    PublicLimited,
    OnePerson,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateLimited => "Private Limited Company",
            Self::PublicLimited => "Public Limited Company",
            Self::OnePerson => "One Person Company",
        }
    }
}

/// Companies Act, 2013 sections referenced by the filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulatorySection {
    /// Section 139: appointment of auditors.
    Section139,
    /// Section 140: removal of auditors.
    Section140,
}

impl RegulatorySection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Section139 => "Section 139 - Appointment of Auditors",
            Self::Section140 => "Section 140 - Removal of Auditors",
        }
    }
}

/// Professional qualification of the appointed auditor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditorQualification {
    CharteredAccountant,
}

impl AuditorQualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CharteredAccountant => "Chartered Accountant",
        }
    }
}

macro_rules! label_impls {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    )*};
}

label_impls!(AppointmentType, CompanyType, RegulatorySection, AuditorQualification);

/// Everything the context inferencer derives from raw text.
///
/// Booleans are always meaningful; optional facts are `None` when no rule
/// matched. `agm_date` is only ever `Some` when `agm_conducted` is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextFacts {
    pub appointment_type: AppointmentType,
    pub company_type: Option<CompanyType>,
    pub regulatory_sections: Vec<RegulatorySection>,
    pub agm_conducted: bool,
    pub agm_date: Option<String>,
    pub auditor_qualification: Option<AuditorQualification>,
    pub joint_auditors: bool,
}
