//! Property tests for the extraction pipeline

use std::collections::HashSet;

use proptest::prelude::*;

use codeweave::extraction::{analyze, build_stats, scan, validate};
use codeweave::types::{CodeBlockMetadata, Complexity, ProcessedCodeBlock};
use codeweave::{CodeBlockProcessor, process};

fn language() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "javascript",
        "typescript",
        "python",
        "java",
        "go",
        "html",
        "css",
        "json",
        "sql",
        "rust",
        "text",
    ])
}

/// Fence bodies: anything except backticks
fn body() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 =(){};:<>#/\"'\n]{0,80}"
}

/// Bodies the default rule always keeps
fn word_body() -> impl Strategy<Value = String> {
    "[a-z]{3,12}( [a-z]{1,8}){0,4}"
}

fn fenced(language: &str, code: &str) -> String {
    format!("```{}\n{}\n```\n", language, code)
}

proptest! {
    #[test]
    fn prop_no_fence_no_blocks(text in "[^`]{0,200}") {
        let (blocks, stats) = process(&text);
        prop_assert!(blocks.is_empty());
        prop_assert_eq!(stats.total_blocks, 0);
    }

    #[test]
    fn prop_each_valid_fence_yields_a_block(codes in prop::collection::vec(word_body(), 1..8)) {
        let text: String = codes
            .iter()
            .map(|code| format!("Some prose.\n{}", fenced("text", code)))
            .collect();

        let outcome = CodeBlockProcessor::new().process(&text);
        prop_assert_eq!(outcome.blocks.len(), codes.len());
        for (block, code) in outcome.blocks.iter().zip(&codes) {
            prop_assert_eq!(&block.code, code);
            prop_assert_eq!(&block.language, "text");
        }
    }

    #[test]
    fn prop_scan_recovers_trimmed_code(lang in language(), code in body()) {
        let blocks = scan(&fenced(lang, &code));
        prop_assert_eq!(blocks.len(), 1);
        prop_assert_eq!(blocks[0].code.as_str(), code.trim());
        prop_assert_eq!(blocks[0].language.as_str(), lang);
    }

    #[test]
    fn prop_analyze_is_deterministic(lang in language(), code in body()) {
        let first = analyze(&code, lang);
        prop_assert_eq!(&first, &analyze(&code, lang));
        prop_assert_eq!(first.line_count, code.split('\n').count());
        prop_assert_eq!(first.estimated_complexity, Complexity::from_line_count(first.line_count));
    }

    #[test]
    fn prop_stats_histogram_matches_total(
        fences in prop::collection::vec((language(), body()), 0..10)
    ) {
        let text: String = fences.iter().map(|(lang, code)| fenced(lang, code)).collect();
        let (blocks, stats) = process(&text);

        let dist = stats.complexity_distribution;
        prop_assert_eq!(dist.low + dist.medium + dist.high, stats.total_blocks);
        prop_assert_eq!(stats.total_blocks, blocks.len());
        prop_assert!(stats.languages.len() <= stats.total_blocks);
        prop_assert_eq!(
            stats.total_lines,
            blocks.iter().map(|b| b.metadata.line_count).sum::<usize>()
        );
    }

    #[test]
    fn prop_stats_languages_distinct(
        fences in prop::collection::vec((language(), word_body()), 0..10)
    ) {
        let blocks: Vec<ProcessedCodeBlock> = fences
            .iter()
            .enumerate()
            .map(|(idx, (lang, code))| ProcessedCodeBlock {
                id: format!("code_0_{}", idx),
                language: lang.to_string(),
                filename: None,
                code: code.clone(),
                metadata: analyze(code, lang),
            })
            .collect();

        let stats = build_stats(&blocks);
        let distinct: HashSet<&str> = fences.iter().map(|(lang, _)| *lang).collect();
        prop_assert_eq!(stats.languages.len(), distinct.len());

        // First-seen order
        let mut expected: Vec<&str> = Vec::new();
        for (lang, _) in &fences {
            if !expected.contains(lang) {
                expected.push(*lang);
            }
        }
        prop_assert_eq!(stats.languages, expected);
    }

    #[test]
    fn prop_blank_code_always_rejected(lang in language(), blank in "[ \t\n]{0,10}") {
        let block = ProcessedCodeBlock {
            id: "code_0_0".to_string(),
            language: lang.to_string(),
            filename: None,
            metadata: CodeBlockMetadata::synthetic(&blank),
            code: blank,
        };
        prop_assert!(validate(&block).is_err());
    }

    #[test]
    fn prop_complexity_is_monotonic(a in 0usize..500, b in 0usize..500) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |c: Complexity| match c {
            Complexity::Low => 0,
            Complexity::Medium => 1,
            Complexity::High => 2,
        };
        prop_assert!(rank(Complexity::from_line_count(lo)) <= rank(Complexity::from_line_count(hi)));
    }
}
