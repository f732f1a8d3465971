//! Directory batch runs: PDFs → record JSON, record JSON → summary text.
//!
//! Each document is independent. A failure is recorded as a
//! [`DocumentOutcome::Failed`] and the run moves on; only an empty or
//! unlistable input directory fails the whole run.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, bail};
use chrono::Utc;
use formdigest_core::{DocumentInput, FieldMappingTable};
use formdigest_extract::{ExtractionRecord, extract};
use tracing::{info, warn};

/// What happened to one input file.
#[derive(Debug)]
pub enum DocumentOutcome {
    Written { source: PathBuf, output: PathBuf },
    Failed { source: PathBuf, reason: String },
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

// ── Listing ──

/// Files in `dir` with the given extension (case-insensitive), in name order.
pub fn list_files(dir: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches_ext = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches_ext && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Newest modification time first; ties keep name order.
pub fn sort_newest_first(files: &mut [PathBuf]) {
    files.sort_by_cached_key(|p| {
        let modified = std::fs::metadata(p)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        std::cmp::Reverse(modified)
    });
}

fn output_path(output_dir: &Path, source: &Path, extension: &str) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    output_dir.join(format!("{}.{extension}", stem.to_string_lossy()))
}

// ── Extraction ──

/// Extract every PDF in `input_dir` into `<stem>.json` under `output_dir`.
///
/// `load` turns a path into a [`DocumentInput`]; `on_record` sees each
/// record after it is written.
pub fn run_extract_batch<L, F>(
    input_dir: &Path,
    output_dir: &Path,
    table: &FieldMappingTable,
    load: L,
    mut on_record: F,
) -> anyhow::Result<BatchReport>
where
    L: Fn(&Path) -> DocumentInput,
    F: FnMut(&ExtractionRecord),
{
    let mut pdfs = list_files(input_dir, "pdf")?;
    if pdfs.is_empty() {
        bail!("no PDF files found in {}", input_dir.display());
    }
    sort_newest_first(&mut pdfs);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    info!(count = pdfs.len(), input = %input_dir.display(), "extracting batch");

    let mut report = BatchReport::default();
    for source in pdfs {
        let input = load(&source);
        let record = extract(&input, table, Utc::now());
        let output = output_path(output_dir, &source, "json");

        let written = record
            .to_json_pretty()
            .map_err(anyhow::Error::from)
            .and_then(|json| {
                std::fs::write(&output, json)
                    .with_context(|| format!("writing {}", output.display()))
            });

        match written {
            Ok(()) => {
                info!(
                    source = %source.display(),
                    output = %output.display(),
                    processed = record.extraction_metadata.processed_fields,
                    "wrote record"
                );
                on_record(&record);
                report.outcomes.push(DocumentOutcome::Written { source, output });
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "failed to write record");
                report.outcomes.push(DocumentOutcome::Failed {
                    source,
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch extraction finished"
    );
    Ok(report)
}

// ── Summaries ──

/// Summarize every `*.json` record in `input_dir` into `<stem>.txt`.
pub fn run_summary_batch(input_dir: &Path, output_dir: &Path) -> anyhow::Result<BatchReport> {
    let records = list_files(input_dir, "json")?;
    if records.is_empty() {
        bail!("no JSON files found in {}", input_dir.display());
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    info!(count = records.len(), input = %input_dir.display(), "summarizing batch");

    let mut report = BatchReport::default();
    for source in records {
        let output = output_path(output_dir, &source, "txt");
        let written = formdigest_summary::summarize_file(&source)
            .map_err(anyhow::Error::from)
            .and_then(|summary| {
                std::fs::write(&output, summary)
                    .with_context(|| format!("writing {}", output.display()))
            });

        match written {
            Ok(()) => {
                info!(source = %source.display(), output = %output.display(), "wrote summary");
                report.outcomes.push(DocumentOutcome::Written { source, output });
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "failed to summarize record");
                report.outcomes.push(DocumentOutcome::Failed {
                    source,
                    reason: format!("{e:#}"),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch summaries finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    use formdigest_core::RawFieldSet;
    use serde_json::Value;

    fn fixture_input(path: &Path) -> DocumentInput {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let raw_fields: RawFieldSet = [
            ("CompanyName_C[0]", "Acme Private Limited"),
            ("CIN_C[0]", "U72900MH2015PTC000001"),
            ("NameAuditorFirm_C[0]", "Rao & Associates"),
            ("PAN_C[0]", "AAAFR1234K"),
            ("DateOfAccAuditedFrom_D[0]", "01/04/2023"),
            ("DateOfAccAuditedTo_D[0]", "31/03/2028"),
            ("NumOfFinanYearApp[0]", "5"),
            ("current_date[0]", "15/10/2023 10:22"),
            ("serialNumber", "SRN-001"),
        ]
        .into_iter()
        .collect();
        DocumentInput {
            name,
            raw_fields,
            raw_text: "First appointment under section 139".into(),
        }
    }

    fn touch(path: &Path, age_secs: u64) {
        let file = File::create(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .unwrap();
    }

    #[test]
    fn extract_batch_writes_one_record_per_pdf() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        touch(&input.path().join("a.pdf"), 10);
        touch(&input.path().join("b.PDF"), 5);
        touch(&input.path().join("notes.txt"), 1);

        let out_dir = output.path().join("structured_data");
        let mut seen = Vec::new();
        let report = run_extract_batch(
            input.path(),
            &out_dir,
            &FieldMappingTable::builtin(),
            fixture_input,
            |r| seen.push(r.extraction_metadata.pdf_file.clone()),
        )
        .unwrap();

        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 2);
        // Newest first.
        assert_eq!(seen, vec!["b.PDF", "a.pdf"]);

        let json: Value =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join("a.json")).unwrap())
                .unwrap();
        assert_eq!(json["extraction_metadata"]["pdf_file"], "a.pdf");
        assert_eq!(
            json["structured_data"]["company_information"]["name"],
            "Acme Private Limited"
        );
        assert!(out_dir.join("b.json").exists());
    }

    #[test]
    fn extract_batch_records_write_failures_and_continues() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        touch(&input.path().join("a.pdf"), 10);
        touch(&input.path().join("b.pdf"), 5);
        // A directory where the record file should go makes that write fail.
        std::fs::create_dir(output.path().join("b.json")).unwrap();

        let report = run_extract_batch(
            input.path(),
            output.path(),
            &FieldMappingTable::builtin(),
            fixture_input,
            |_| {},
        )
        .unwrap();

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.outcomes[0],
            DocumentOutcome::Failed { source, .. } if source.ends_with("b.pdf")
        ));
        assert!(output.path().join("a.json").is_file());
    }

    #[test]
    fn extract_batch_without_pdfs_fails() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let err = run_extract_batch(
            input.path(),
            output.path(),
            &FieldMappingTable::builtin(),
            fixture_input,
            |_| {},
        )
        .unwrap_err();
        assert!(err.to_string().contains("no PDF files"));
    }

    #[test]
    fn missing_input_dir_fails() {
        let output = tempfile::tempdir().unwrap();
        let missing = output.path().join("nope");
        assert!(run_summary_batch(&missing, output.path()).is_err());
    }

    #[test]
    fn extract_then_summarize() {
        let input = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        touch(&input.path().join("acme.pdf"), 1);

        let records = work.path().join("structured_data");
        let summaries = work.path().join("summary");
        run_extract_batch(
            input.path(),
            &records,
            &FieldMappingTable::builtin(),
            fixture_input,
            |_| {},
        )
        .unwrap();
        std::fs::write(records.join("broken.json"), "{}").unwrap();

        let report = run_summary_batch(&records, &summaries).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 1);
        // Name order: acme before broken.
        assert!(matches!(&report.outcomes[1], DocumentOutcome::Failed { .. }));

        let summary = std::fs::read_to_string(summaries.join("acme.txt")).unwrap();
        assert!(summary.starts_with(
            "Acme Private Limited (CIN: U72900MH2015PTC000001) has appointed Rao & Associates"
        ));
        assert!(summary.contains("to fill a first appointment ."));
        assert!(summary.contains("with the form filed on 15/10/2023 (Certificate Serial: SRN-001)."));
        assert!(!summaries.join("broken.txt").exists());
    }

    #[test]
    fn summary_batch_without_json_fails() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let err = run_summary_batch(input.path(), output.path()).unwrap_err();
        assert!(err.to_string().contains("no JSON files"));
    }
}
