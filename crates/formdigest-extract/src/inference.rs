//! Rule-based context inference over a form's free-text layer.
//!
//! Rules are plain data: an ordered list of `(needle, outcome)` pairs per
//! fact. Mutually exclusive facts take the first matching rule; multi-valued
//! facts collect every match in list order. Needles match as literal,
//! case-insensitive substrings (Unicode simple case folding, so `ſ` matches
//! `s`), with one regex for the AGM date.

use std::sync::LazyLock;

use formdigest_core::{
    AppointmentType, AuditorQualification, CompanyType, ContextFacts, RegulatorySection,
};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// A lower-case needle and the outcome it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub needle: &'static str,
    pub outcome: T,
}

const fn rule<T>(needle: &'static str, outcome: T) -> Rule<T> {
    Rule { needle, outcome }
}

/// Priority order matters: a form mentioning both a first appointment and a
/// reappointment is a first appointment.
pub const APPOINTMENT_RULES: &[Rule<AppointmentType>] = &[
    rule("first appointment", AppointmentType::FirstAppointment),
    rule("reappointment", AppointmentType::Reappointment),
    rule("casual vacancy", AppointmentType::CasualVacancy),
];

pub const COMPANY_RULES: &[Rule<CompanyType>] = &[
    rule("private limited", CompanyType::PrivateLimited),
    rule("public limited", CompanyType::PublicLimited),
    rule("one person company", CompanyType::OnePerson),
];

pub const SECTION_RULES: &[Rule<RegulatorySection>] = &[
    rule("section 139", RegulatorySection::Section139),
    rule("section 140", RegulatorySection::Section140),
];

pub const QUALIFICATION_RULES: &[Rule<AuditorQualification>] = &[rule(
    "chartered accountant",
    AuditorQualification::CharteredAccountant,
)];

pub const JOINT_AUDITOR_NEEDLE: &str = "joint auditor";

/// A rule list compiled to case-insensitive literal matchers.
#[derive(Debug)]
pub struct RuleSet<T> {
    matchers: Vec<(Regex, T)>,
}

impl<T: Copy> RuleSet<T> {
    pub fn new(rules: &[Rule<T>]) -> Result<Self, regex::Error> {
        let matchers = rules
            .iter()
            .map(|r| Ok((needle_regex(r.needle)?, r.outcome)))
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { matchers })
    }

    /// First rule whose needle occurs in `text`.
    pub fn first_match(&self, text: &str) -> Option<T> {
        self.matchers
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, outcome)| *outcome)
    }

    /// Every rule whose needle occurs in `text`, in rule order.
    pub fn all_matches(&self, text: &str) -> Vec<T> {
        self.matchers
            .iter()
            .filter(|(re, _)| re.is_match(text))
            .map(|(_, outcome)| *outcome)
            .collect()
    }
}

fn needle_regex(needle: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
}

static APPOINTMENTS: LazyLock<RuleSet<AppointmentType>> =
    LazyLock::new(|| RuleSet::new(APPOINTMENT_RULES).unwrap());
static COMPANIES: LazyLock<RuleSet<CompanyType>> =
    LazyLock::new(|| RuleSet::new(COMPANY_RULES).unwrap());
static SECTIONS: LazyLock<RuleSet<RegulatorySection>> =
    LazyLock::new(|| RuleSet::new(SECTION_RULES).unwrap());
static QUALIFICATIONS: LazyLock<RuleSet<AuditorQualification>> =
    LazyLock::new(|| RuleSet::new(QUALIFICATION_RULES).unwrap());
static JOINT_AUDITOR: LazyLock<Regex> =
    LazyLock::new(|| needle_regex(JOINT_AUDITOR_NEEDLE).unwrap());

/// "annual general meeting" followed on the same line by a d/m/yyyy date.
static AGM_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)annual general meeting.*?(\d{1,2}[/-]\d{1,2}[/-]\d{4})").unwrap()
});

/// Date token following the first "annual general meeting" that has one.
pub fn find_agm_date(text: &str) -> Option<&str> {
    AGM_DATE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Derive [`ContextFacts`] from raw document text. Never fails.
pub fn infer_context(raw_text: &str) -> ContextFacts {
    let agm_date = find_agm_date(raw_text).map(str::to_string);
    let facts = ContextFacts {
        appointment_type: APPOINTMENTS.first_match(raw_text).unwrap_or_default(),
        company_type: COMPANIES.first_match(raw_text),
        regulatory_sections: SECTIONS.all_matches(raw_text),
        agm_conducted: agm_date.is_some(),
        agm_date,
        auditor_qualification: QUALIFICATIONS.first_match(raw_text),
        joint_auditors: JOINT_AUDITOR.is_match(raw_text),
    };

    debug!(
        appointment_type = %facts.appointment_type,
        company_type = ?facts.company_type,
        sections = facts.regulatory_sections.len(),
        agm_conducted = facts.agm_conducted,
        joint_auditors = facts.joint_auditors,
        "inferred context"
    );
    facts
}
