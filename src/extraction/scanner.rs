//! Fence Scanner
//!
//! Finds triple-backtick code regions in model output. A fence must open
//! with a language tag of ASCII word characters; an optional `:` and the
//! rest of the line name the file. Fences without a tag are not matched,
//! by either the primary or the fallback scan.

use once_cell::sync::Lazy;

use regex::{Captures, Regex};

use super::ids::BlockIdGenerator;
use crate::constants::ids;
use crate::types::{CodeBlockMetadata, ProcessedCodeBlock, RawCodeBlock};

/// Opening fence + tag, optional `:filename` line, lazy body, closing fence
static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```([A-Za-z0-9_]+):?([^\n]*)\n([\s\S]*?)```").expect("fence pattern is valid")
});

/// Lazily scan `text` for fenced blocks, left to right, non-overlapping
pub fn scan_fences(text: &str) -> impl Iterator<Item = RawCodeBlock> + '_ {
    FENCE.captures_iter(text).map(|caps| raw_block(&caps))
}

/// Eager form of [`scan_fences`]
pub fn scan(text: &str) -> Vec<RawCodeBlock> {
    scan_fences(text).collect()
}

/// Single-pass backstop used when the full pipeline keeps nothing.
///
/// Same grammar as [`scan`], but blocks go straight to the result with
/// synthetic metadata: no language rules, no validation.
pub fn fallback_scan(text: &str) -> Vec<ProcessedCodeBlock> {
    let id_gen = BlockIdGenerator::new(ids::FALLBACK_PREFIX);

    FENCE
        .captures_iter(text)
        .enumerate()
        .map(|(idx, caps)| {
            let raw = raw_block(&caps);
            ProcessedCodeBlock {
                // Fallback ids count from 1
                id: id_gen.id_for(idx + 1),
                metadata: CodeBlockMetadata::synthetic(&raw.code),
                language: raw.language,
                filename: raw.filename,
                code: raw.code,
            }
        })
        .collect()
}

fn raw_block(caps: &Captures<'_>) -> RawCodeBlock {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let filename = group(2).trim();
    RawCodeBlock {
        language: group(1).to_string(),
        filename: (!filename.is_empty()).then(|| filename.to_string()),
        code: group(3).trim().to_string(),
        raw_match: group(0).to_string(),
    }
}
