//! The full extraction record written per document.

use chrono::{DateTime, SecondsFormat, Utc};
use formdigest_core::{CanonicalDocument, CanonicalFieldSet, DocumentInput, FieldMappingTable};
use serde::Serialize;
use tracing::info;

use crate::assemble::assemble;
use crate::consolidate::consolidate;
use crate::inference::infer_context;
use crate::mapper::map_fields;
use crate::prompts::{LlmPrompts, render_prompts};

pub const EXTRACTION_PURPOSE: &str = "LLM Summary Generation";

/// Characters of raw text kept in `raw_text_sample`.
pub const TEXT_SAMPLE_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionMetadata {
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub pdf_file: String,
    pub extraction_purpose: &'static str,
    /// Raw fields before mapping and filtering.
    pub total_fields_extracted: usize,
    /// Canonical fields after consolidation.
    pub processed_fields: usize,
}

/// One document's output, serialised as the record JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    pub extraction_metadata: ExtractionMetadata,
    pub structured_data: CanonicalDocument,
    pub llm_prompts: LlmPrompts,
    pub raw_fields: CanonicalFieldSet,
    pub raw_text_sample: String,
}

impl ExtractionRecord {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run the whole pipeline for one document: map → consolidate → infer →
/// assemble → render prompts. Never fails; an empty input yields a record
/// of sentinel defaults.
pub fn extract(
    input: &DocumentInput,
    table: &FieldMappingTable,
    extracted_at: DateTime<Utc>,
) -> ExtractionRecord {
    let mapped = map_fields(&input.raw_fields, table);
    let fields = consolidate(&mapped);
    let context = infer_context(&input.raw_text);
    let document = assemble(&fields, &context);
    let prompts = render_prompts(&document);

    info!(
        document = %input.name,
        raw_fields = input.raw_fields.len(),
        mapped = mapped.len(),
        processed = fields.len(),
        narrative_points = document.key_narrative_points.len(),
        "extracted document"
    );

    ExtractionRecord {
        extraction_metadata: ExtractionMetadata {
            timestamp: extracted_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            pdf_file: input.name.clone(),
            extraction_purpose: EXTRACTION_PURPOSE,
            total_fields_extracted: input.raw_fields.len(),
            processed_fields: fields.len(),
        },
        structured_data: document,
        llm_prompts: prompts,
        raw_text_sample: text_sample(&input.raw_text),
        raw_fields: fields,
    }
}

/// First [`TEXT_SAMPLE_CHARS`] characters, with "..." when truncated.
pub fn text_sample(text: &str) -> String {
    match text.char_indices().nth(TEXT_SAMPLE_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
