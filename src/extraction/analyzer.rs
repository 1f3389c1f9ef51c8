//! Metadata Analyzer
//!
//! Turns a scanned block into a [`ProcessedCodeBlock`] by running the
//! language rule table over its code. Deterministic for a given
//! `(code, language)`; only the id differs between runs.

use super::ids::BlockIdGenerator;
use super::rules::rules_for;
use crate::types::{CodeBlockMetadata, Complexity, ProcessedCodeBlock, RawCodeBlock, count_lines};

/// Derive metadata for `code` using the rules registered for `language`
pub fn analyze(code: &str, language: &str) -> CodeBlockMetadata {
    let rules = rules_for(language);
    let line_count = count_lines(code);

    CodeBlockMetadata {
        line_count,
        has_imports: rules.has_imports(code),
        has_exports: rules.has_exports(code),
        has_comments: rules.has_comments(code),
        estimated_complexity: Complexity::from_line_count(line_count),
        dependencies: rules.dependencies(code),
    }
}

/// Analyze one raw block, assigning it the id for sequence position `index`
pub fn analyze_block(raw: RawCodeBlock, index: usize, id_gen: &BlockIdGenerator) -> ProcessedCodeBlock {
    let metadata = analyze(&raw.code, &raw.language);
    ProcessedCodeBlock {
        id: id_gen.id_for(index),
        language: raw.language,
        filename: raw.filename,
        code: raw.code,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javascript_block() {
        let meta = analyze("const x = 1;", "javascript");
        assert_eq!(meta.line_count, 1);
        assert!(!meta.has_imports);
        assert!(!meta.has_exports);
        assert!(!meta.has_comments);
        assert_eq!(meta.estimated_complexity, Complexity::Low);
        assert!(meta.dependencies.is_empty());
    }

    #[test]
    fn test_python_block() {
        let meta = analyze("import os\nprint(os.name)", "python");
        assert_eq!(meta.line_count, 2);
        assert!(meta.has_imports);
        assert_eq!(meta.dependencies, vec!["os"]);
    }

    #[test]
    fn test_language_tag_is_case_insensitive() {
        let code = "import React from 'react';\nexport default function App() {}";
        assert_eq!(analyze(code, "JavaScript"), analyze(code, "javascript"));
    }

    #[test]
    fn test_rust_block() {
        let code = "use std::fmt;\n\n/// Doc\npub struct Point;";
        let meta = analyze(code, "rust");
        assert!(meta.has_imports);
        assert!(meta.has_exports);
        assert!(meta.has_comments);
        assert!(meta.dependencies.is_empty());
    }

    #[test]
    fn test_complexity_tiers() {
        let medium = vec!["x"; 31].join("\n");
        let high = vec!["x"; 101].join("\n");
        assert_eq!(analyze(&medium, "text").estimated_complexity, Complexity::Medium);
        assert_eq!(analyze(&high, "text").estimated_complexity, Complexity::High);
    }

    #[test]
    fn test_empty_code_counts_one_line() {
        assert_eq!(analyze("", "python").line_count, 1);
    }

    #[test]
    fn test_analyze_block_keeps_identity() {
        let raw = RawCodeBlock {
            language: "go".to_string(),
            filename: Some("main.go".to_string()),
            code: "import \"fmt\"".to_string(),
            raw_match: String::new(),
        };
        let id_gen = BlockIdGenerator::with_run("code", 42);
        let block = analyze_block(raw, 0, &id_gen);

        assert!(block.id.starts_with("code_42_0_"));
        assert_eq!(block.filename.as_deref(), Some("main.go"));
        assert_eq!(block.metadata.dependencies, vec!["fmt"]);
    }
}
