//! Prompt blocks rendered from an assembled document.

use formdigest_core::CanonicalDocument;
use serde::Serialize;

/// Rendered prompt blocks for downstream summarisers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmPrompts {
    pub executive_summary_prompt: String,
    pub compliance_summary_prompt: String,
    pub business_summary_prompt: String,
}

impl LlmPrompts {
    /// `(key, text)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("executive_summary_prompt", self.executive_summary_prompt.as_str()),
            ("compliance_summary_prompt", self.compliance_summary_prompt.as_str()),
            ("business_summary_prompt", self.business_summary_prompt.as_str()),
        ]
        .into_iter()
    }
}

pub fn render_prompts(doc: &CanonicalDocument) -> LlmPrompts {
    LlmPrompts {
        executive_summary_prompt: executive_prompt(doc),
        compliance_summary_prompt: compliance_prompt(doc),
        business_summary_prompt: business_prompt(doc),
    }
}

fn executive_prompt(doc: &CanonicalDocument) -> String {
    let company = &doc.company_information;
    let auditor = &doc.auditor_information;
    let appointment = &doc.appointment_details;
    let key_points = doc
        .key_narrative_points
        .iter()
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the collected data, generate a concise executive summary:\n\
         \n\
         Company: {name} (CIN: {cin})\n\
         Auditor: {firm} (PAN: {pan})\n\
         Appointment Type: {nature}\n\
         Audit Period: {start} to {end}\n\
         Financial Years: {years}\n\
         \n\
         Key Points:\n\
         {key_points}",
        name = company.name,
        cin = company.cin,
        firm = auditor.firm_name,
        pan = auditor.pan,
        nature = doc.summary_context.appointment_nature,
        start = appointment.audit_period_start,
        end = appointment.audit_period_end,
        years = appointment.financial_years_count,
    )
}

fn compliance_prompt(doc: &CanonicalDocument) -> String {
    let compliance = &doc.compliance_information;
    let sections = doc
        .summary_context
        .compliance_sections
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Generate a compliance-focused summary for this file:\n\
         \n\
         Form Filing Date: {filed}\n\
         Certificate Serial: {serial}\n\
         Legal Framework: {framework}\n\
         Applicable Sections: {sections}\n\
         Digital Signature: {signature}\n\
         Attachments: {attachments} file(s)",
        filed = compliance.form_filing_date,
        serial = compliance.certificate_serial,
        framework = doc.summary_context.legal_framework,
        signature = compliance.digital_signature,
        attachments = compliance.attachments.len(),
    )
}

fn business_prompt(doc: &CanonicalDocument) -> String {
    let company = &doc.company_information;
    let auditor = &doc.auditor_information;
    let appointment = &doc.appointment_details;

    format!(
        "Create a business-oriented summary of this auditor appointment:\n\
         \n\
         Company: {name}\n\
         Business Type: {company_type}\n\
         Location: {state}\n\
         \n\
         Auditor Firm: {firm}\n\
         Joint Appointment: {joint}\n\
         \n\
         Timeline: {start} to {end}\n\
         AGM Date: {agm}",
        name = company.name,
        company_type = company.company_type,
        state = company.state,
        firm = auditor.firm_name,
        joint = if auditor.joint_appointment { "Yes" } else { "No" },
        start = appointment.audit_period_start,
        end = appointment.audit_period_end,
        agm = appointment.agm_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use formdigest_core::{CanonicalFieldSet, ContextFacts, RegulatorySection};

    fn doc(pairs: &[(&str, &str)], context: ContextFacts) -> CanonicalDocument {
        let fields: CanonicalFieldSet = pairs.iter().copied().collect();
        assemble(&fields, &context)
    }

    #[test]
    fn executive_lists_key_points() {
        let d = doc(
            &[("company_name", "Acme"), ("company_cin", "U1"), ("auditor_firm_name", "Rao & Co")],
            ContextFacts::default(),
        );
        let p = render_prompts(&d).executive_summary_prompt;
        assert!(p.starts_with("Based on the collected data"));
        assert!(p.contains("Company: Acme (CIN: U1)"));
        assert!(p.contains("Auditor: Rao & Co (PAN: Not specified)"));
        assert!(p.contains("Appointment Type: Unknown"));
        assert!(p.ends_with(
            "Key Points:\n- The company Acme has appointed an auditor\n- The appointed auditor is Rao & Co"
        ));
    }

    #[test]
    fn compliance_joins_sections_and_counts_attachments() {
        let context = ContextFacts {
            regulatory_sections: vec![RegulatorySection::Section139, RegulatorySection::Section140],
            ..ContextFacts::default()
        };
        let d = doc(&[("attachments", "resolution.pdf, consent.pdf")], context);
        let p = render_prompts(&d).compliance_summary_prompt;
        assert!(p.contains(
            "Applicable Sections: Section 139 - Appointment of Auditors, Section 140 - Removal of Auditors"
        ));
        assert!(p.contains("Digital Signature: Not verified"));
        assert!(p.contains("Attachments: 2 file(s)"));
        assert!(p.contains("Legal Framework: Filed under the Companies Act, 2013"));
    }

    #[test]
    fn business_reports_joint_flag() {
        let context = ContextFacts {
            joint_auditors: true,
            ..ContextFacts::default()
        };
        let p = render_prompts(&doc(&[], context)).business_summary_prompt;
        assert!(p.contains("Joint Appointment: Yes"));
        assert!(p.contains("Business Type: Not specified"));
        assert!(p.ends_with("AGM Date: Not specified"));

        let p = render_prompts(&doc(&[], ContextFacts::default())).business_summary_prompt;
        assert!(p.contains("Joint Appointment: No"));
    }

    #[test]
    fn iter_in_output_order() {
        let prompts = render_prompts(&doc(&[], ContextFacts::default()));
        let keys: Vec<_> = prompts.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "executive_summary_prompt",
                "compliance_summary_prompt",
                "business_summary_prompt"
            ]
        );
    }
}
