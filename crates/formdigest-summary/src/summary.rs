//! The one-paragraph appointment summary.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::SummaryError;

/// Render the summary paragraph for one record (the full extraction record,
/// with its `structured_data` object).
pub fn summarize(record: &Value) -> Result<String, SummaryError> {
    let name = text_at(record, &["company_information", "name"])?;
    let cin = text_at(record, &["company_information", "cin"])?;
    let firm = text_at(record, &["auditor_information", "firm_name"])?;
    let pan = text_at(record, &["auditor_information", "pan"])?;
    let joint = bool_at(record, &["auditor_information", "joint_appointment"])?;
    let nature = text_at(record, &["summary_context", "appointment_nature"])?;
    let section = first_section(record)?;
    let start = text_at(record, &["appointment_details", "audit_period_start"])?;
    let end = text_at(record, &["appointment_details", "audit_period_end"])?;
    let years = text_at(record, &["appointment_details", "financial_years_count"])?;
    let filed_on = filing_day(record)?;
    let serial = text_at(record, &["compliance_information", "certificate_serial"])?;

    debug!(company = %name, joint, "rendering summary");

    Ok(format!(
        "{name} (CIN: {cin}) has appointed {firm} (PAN: {pan}) as auditors to fill a {nature} . \
         The appointment covers an audit period from {start} to {end}, spanning {years} financial years. \
         This {joint}appointment was formalized under {section} of the Companies Act, 2013, \
         with the form filed on {filed_on} (Certificate Serial: {serial}).",
        nature = nature.to_lowercase(),
        joint = if joint { "joint " } else { "" },
    ))
}

/// Read a record JSON file and summarize it.
pub fn summarize_file(path: &Path) -> Result<String, SummaryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SummaryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record: Value = serde_json::from_str(&raw)?;
    let summary = summarize(&record)?;
    info!(path = %path.display(), "summarized record");
    Ok(summary)
}

// ── Navigation ──

fn dotted(path: &[&str]) -> String {
    std::iter::once("structured_data")
        .chain(path.iter().copied())
        .collect::<Vec<_>>()
        .join(".")
}

fn value_at<'a>(record: &'a Value, path: &[&str]) -> Result<&'a Value, SummaryError> {
    let mut current = record
        .get("structured_data")
        .ok_or_else(|| SummaryError::MissingKey("structured_data".into()))?;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get(key)
            .ok_or_else(|| SummaryError::MissingKey(dotted(&path[..=depth])))?;
    }
    Ok(current)
}

/// Strings as-is; numbers rendered as written.
fn text_at(record: &Value, path: &[&str]) -> Result<String, SummaryError> {
    match value_at(record, path)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(SummaryError::WrongType {
            path: dotted(path),
            expected: "a string",
        }),
    }
}

fn bool_at(record: &Value, path: &[&str]) -> Result<bool, SummaryError> {
    value_at(record, path)?
        .as_bool()
        .ok_or_else(|| SummaryError::WrongType {
            path: dotted(path),
            expected: "a boolean",
        })
}

fn first_section(record: &Value) -> Result<String, SummaryError> {
    let path = ["summary_context", "compliance_sections"];
    let sections = value_at(record, &path)?
        .as_array()
        .ok_or_else(|| SummaryError::WrongType {
            path: dotted(&path),
            expected: "an array",
        })?;
    match sections.first() {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SummaryError::WrongType {
            path: format!("{}[0]", dotted(&path)),
            expected: "a string",
        }),
        None => Err(SummaryError::EmptyValue(dotted(&path))),
    }
}

/// Date part of the filing timestamp (first whitespace-separated token).
fn filing_day(record: &Value) -> Result<String, SummaryError> {
    let path = ["compliance_information", "form_filing_date"];
    let filed = text_at(record, &path)?;
    filed
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| SummaryError::EmptyValue(dotted(&path)))
}
