//! Vertical card display for extraction records.
//!
//! Renders one record as grouped label/value rows, skipping anything still
//! at its "Not specified" default.

use std::io::{self, Write};

use formdigest_core::FieldValue;
use formdigest_extract::{ExtractionRecord, LlmPrompts};

const MAX_LIST_ITEMS: usize = 10;

type Row = (&'static str, String);

// ── Public API ──

/// Write a record as a card grouped by document section.
pub fn write_record_card(out: &mut impl Write, record: &ExtractionRecord) -> io::Result<()> {
    let doc = &record.structured_data;
    let meta = &record.extraction_metadata;
    let title = doc
        .company_information
        .name
        .as_given()
        .unwrap_or(&meta.pdf_file);

    writeln!(out, "=== {title} ===")?;
    writeln!(
        out,
        "{} | {} | {} of {} fields kept",
        doc.document_type,
        doc.summary_context.appointment_nature,
        meta.processed_fields,
        meta.total_fields_extracted
    )?;
    writeln!(out)?;

    let company = &doc.company_information;
    let mut rows = Vec::new();
    given(&mut rows, "name", &company.name);
    given(&mut rows, "cin", &company.cin);
    given(&mut rows, "type", &company.company_type);
    given(&mut rows, "email", &company.email);
    given(&mut rows, "address", &company.address);
    given(&mut rows, "state", &company.state);
    given(&mut rows, "pincode", &company.pincode);
    write_section(out, "Company", &rows)?;

    let auditor = &doc.auditor_information;
    let mut rows = Vec::new();
    given(&mut rows, "firm_name", &auditor.firm_name);
    given(&mut rows, "pan", &auditor.pan);
    given(&mut rows, "membership_number", &auditor.membership_number);
    given(&mut rows, "email", &auditor.email);
    given(&mut rows, "address", &auditor.address);
    given(&mut rows, "qualification", &auditor.qualification);
    if !rows.is_empty() {
        rows.push(("number_of_auditors", auditor.number_of_auditors.clone()));
    }
    flag(&mut rows, "joint_appointment", auditor.joint_appointment);
    write_section(out, "Auditor", &rows)?;

    let appointment = &doc.appointment_details;
    let mut rows = Vec::new();
    given(&mut rows, "appointment_date", &appointment.appointment_date);
    given(&mut rows, "audit_period_start", &appointment.audit_period_start);
    given(&mut rows, "audit_period_end", &appointment.audit_period_end);
    given(&mut rows, "financial_years_count", &appointment.financial_years_count);
    given(&mut rows, "agm_date", &appointment.agm_date);
    flag(&mut rows, "agm_conducted", appointment.agm_conducted);
    given(&mut rows, "resolution_number", &appointment.resolution_number);
    given(&mut rows, "director_din", &appointment.director_din);
    write_section(out, "Appointment", &rows)?;

    let compliance = &doc.compliance_information;
    let mut rows = Vec::new();
    given(&mut rows, "form_filing_date", &compliance.form_filing_date);
    given(&mut rows, "receipt_date", &compliance.receipt_date);
    given(&mut rows, "certificate_serial", &compliance.certificate_serial);
    if !compliance.attachments.is_empty() {
        rows.push(("attachments", compliance.attachments.join(", ")));
    }
    let sections: Vec<&str> = doc
        .summary_context
        .compliance_sections
        .iter()
        .map(|s| s.as_str())
        .collect();
    if !sections.is_empty() {
        rows.push(("sections", sections.join("; ")));
    }
    write_section(out, "Compliance", &rows)?;

    write_list(out, "Key Points", &doc.key_narrative_points)
}

/// Write the three rendered prompt blocks.
pub fn write_prompts(out: &mut impl Write, prompts: &LlmPrompts) -> io::Result<()> {
    for (key, text) in prompts.iter() {
        writeln!(out, "--- {key} ---")?;
        writeln!(out, "{text}")?;
        writeln!(out)?;
    }
    Ok(())
}

// ── Section rendering ──

fn given(rows: &mut Vec<Row>, label: &'static str, value: &FieldValue) {
    if let Some(v) = value.as_given() {
        rows.push((label, v.to_string()));
    }
}

fn flag(rows: &mut Vec<Row>, label: &'static str, value: bool) {
    if value {
        rows.push((label, "yes".into()));
    }
}

fn write_section(out: &mut impl Write, header: &str, rows: &[Row]) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(out, "{header}")?;
    for (label, value) in rows {
        writeln!(out, "  {:<26} {}", label, value)?;
    }
    writeln!(out)
}

fn write_list(out: &mut impl Write, header: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "{header} ({}):", items.len())?;
    for item in items.iter().take(MAX_LIST_ITEMS) {
        writeln!(out, "  - {item}")?;
    }
    if items.len() > MAX_LIST_ITEMS {
        writeln!(out, "  ... and {} more", items.len() - MAX_LIST_ITEMS)?;
    }
    writeln!(out)
}
