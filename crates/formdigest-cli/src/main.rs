mod batch;
mod display;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use batch::DocumentOutcome;
use chrono::Utc;
use clap::{Parser, Subcommand};
use formdigest_core::FieldMappingTable;
use formdigest_extract::extract;
use formdigest_reader::read_input;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formdigest", version)]
#[command(about = "ADT-1 auditor appointment forms to structured JSON and summaries", long_about = None)]
struct Cli {
    /// JSON object of extra raw field → canonical name renames
    #[arg(long, global = true, env = "FORMDIGEST_MAPPING")]
    mapping: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one PDF and print its record
    Extract {
        /// PDF file to read
        pdf: PathBuf,

        /// Write the record JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract every PDF in a directory
    Batch {
        #[arg(long, env = "FORMDIGEST_INPUT_DIR", default_value = "pdf")]
        input_dir: PathBuf,

        #[arg(long, env = "FORMDIGEST_OUTPUT_DIR", default_value = "structured_data")]
        output_dir: PathBuf,

        /// Print the rendered prompts for each record
        #[arg(long)]
        show_prompts: bool,
    },
    /// Write a summary paragraph for every record JSON in a directory
    Summarize {
        #[arg(long, env = "FORMDIGEST_INPUT_DIR", default_value = "structured_data")]
        input_dir: PathBuf,

        #[arg(long, env = "FORMDIGEST_OUTPUT_DIR", default_value = "summary")]
        output_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("formdigest v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Extract { pdf, output } => {
            let table = load_mapping(cli.mapping.as_deref())?;
            cmd_extract(&pdf, output.as_deref(), &table)
        }
        Commands::Batch {
            input_dir,
            output_dir,
            show_prompts,
        } => {
            let table = load_mapping(cli.mapping.as_deref())?;
            cmd_batch(&input_dir, &output_dir, &table, show_prompts)
        }
        Commands::Summarize {
            input_dir,
            output_dir,
        } => cmd_summarize(&input_dir, &output_dir),
    }
}

fn load_mapping(path: Option<&Path>) -> anyhow::Result<FieldMappingTable> {
    match path {
        Some(path) => FieldMappingTable::load_with_overrides(path)
            .with_context(|| format!("loading mapping overrides from {}", path.display())),
        None => Ok(FieldMappingTable::builtin()),
    }
}

// ── Commands ──

fn cmd_extract(pdf: &Path, output: Option<&Path>, table: &FieldMappingTable) -> anyhow::Result<()> {
    if !pdf.is_file() {
        bail!("PDF not found: {}", pdf.display());
    }

    let input = read_input(pdf);
    let record = extract(&input, table, Utc::now());
    let json = record.to_json_pretty().context("serialising record")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            info!(output = %path.display(), "wrote record");
        }
        None => println!("{json}"),
    }

    let mut err = std::io::stderr().lock();
    display::write_record_card(&mut err, &record)?;

    let value = serde_json::to_value(&record).context("serialising record")?;
    match formdigest_summary::summarize(&value) {
        Ok(summary) => writeln!(err, "Summary\n  {summary}\n")?,
        Err(e) => warn!(error = %e, "record is missing data for a summary"),
    }
    Ok(())
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    table: &FieldMappingTable,
    show_prompts: bool,
) -> anyhow::Result<()> {
    let report = batch::run_extract_batch(input_dir, output_dir, table, read_input, |record| {
        if show_prompts {
            let mut out = std::io::stdout().lock();
            let shown = writeln!(out, "=== {} ===", record.extraction_metadata.pdf_file)
                .and_then(|()| display::write_prompts(&mut out, &record.llm_prompts));
            if let Err(e) = shown {
                warn!(error = %e, "failed to print prompts");
            }
        }
    })?;

    print_tally(&report, "extracted");
    Ok(())
}

fn cmd_summarize(input_dir: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let report = batch::run_summary_batch(input_dir, output_dir)?;
    print_tally(&report, "summarized");
    Ok(())
}

fn print_tally(report: &batch::BatchReport, verb: &str) {
    for outcome in &report.outcomes {
        match outcome {
            DocumentOutcome::Written { source, output } => {
                println!("  ok    {} -> {}", source.display(), output.display())
            }
            DocumentOutcome::Failed { source, reason } => {
                println!("  FAIL  {}: {reason}", source.display())
            }
        }
    }
    println!(
        "{verb} {}/{} file(s), {} failed",
        report.succeeded(),
        report.total(),
        report.failed()
    );
}
