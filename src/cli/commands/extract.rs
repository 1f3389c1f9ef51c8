//! Extract Command
//!
//! Runs the extraction pipeline over saved model output.
//!
//! Usage:
//!   codeweave extract reply.md
//!   codeweave extract - --format json < reply.md
//!   codeweave extract reply.md --out-dir generated/

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::Output;
use crate::extraction::{CodeBlockProcessor, ProcessingOutcome, write_blocks};
use crate::types::{CodeweaveError, ExtractionLog, ProcessedCodeBlock, ProcessingStats, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractReport<'a> {
    code_blocks: &'a [ProcessedCodeBlock],
    processing_stats: &'a ProcessingStats,
    extraction_log: &'a ExtractionLog,
}

pub fn run(input: Option<&Path>, format: &str, out_dir: Option<PathBuf>) -> Result<()> {
    let text = read_input(input)?;
    let outcome = CodeBlockProcessor::new().process(&text);

    match format {
        "json" => print_json(&outcome)?,
        "text" => print_text(&outcome),
        other => {
            return Err(CodeweaveError::InvalidRequest(format!(
                "Unknown format '{}'. Valid values: text, json",
                other
            )));
        }
    }

    if let Some(dir) = out_dir {
        let written = write_blocks(&dir, &outcome.blocks)?;
        // Keep stdout clean for JSON consumers
        if format != "json" {
            let output = Output::new();
            output.success(&format!("Wrote {} file(s) to {}", written.len(), dir.display()));
            for path in &written {
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

/// `None` or `-` reads stdin
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_json(outcome: &ProcessingOutcome) -> Result<()> {
    let report = ExtractReport {
        code_blocks: &outcome.blocks,
        processing_stats: &outcome.stats,
        extraction_log: &outcome.log,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(outcome: &ProcessingOutcome) {
    let output = Output::new();

    if outcome.blocks.is_empty() {
        output.warning("No code blocks found");
    }
    for (idx, block) in outcome.blocks.iter().enumerate() {
        output.block(idx, block);
    }

    output.stats(&outcome.stats);
    output.field("method", outcome.method);
    output.field("time", format!("{} ms", outcome.log.processing_time_ms));
}
