use crate::types::{ProcessedCodeBlock, ProcessingStats};

/// Reduce a final block list into its aggregate statistics
pub fn build_stats(blocks: &[ProcessedCodeBlock]) -> ProcessingStats {
    let mut stats = ProcessingStats {
        total_blocks: blocks.len(),
        ..Default::default()
    };

    for block in blocks {
        if !stats.languages.contains(&block.language) {
            stats.languages.push(block.language.clone());
        }

        let meta = &block.metadata;
        stats.total_lines += meta.line_count;
        stats.blocks_with_files += usize::from(block.filename.is_some());
        stats.blocks_with_imports += usize::from(meta.has_imports);
        stats.blocks_with_exports += usize::from(meta.has_exports);
        stats
            .complexity_distribution
            .record(meta.estimated_complexity);
        stats
            .all_dependencies
            .extend(meta.dependencies.iter().cloned());
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::analyzer::analyze;

    fn block(language: &str, filename: Option<&str>, code: &str) -> ProcessedCodeBlock {
        ProcessedCodeBlock {
            id: format!("code_0_{language}"),
            language: language.to_string(),
            filename: filename.map(str::to_string),
            code: code.to_string(),
            metadata: analyze(code, language),
        }
    }

    #[test]
    fn test_empty() {
        let stats = build_stats(&[]);
        assert_eq!(stats, ProcessingStats::default());
    }

    #[test]
    fn test_aggregates() {
        let long = vec!["x = 1"; 40].join("\n");
        let blocks = vec![
            block("python", Some("a.py"), "import os\nimport sys"),
            block("javascript", None, "const fs = require('fs');\nexport default fs;"),
            block("python", None, &long),
        ];

        let stats = build_stats(&blocks);
        assert_eq!(stats.total_blocks, 3);
        assert_eq!(stats.languages, vec!["python", "javascript"]);
        assert_eq!(stats.total_lines, 2 + 2 + 40);
        assert_eq!(stats.blocks_with_files, 1);
        assert_eq!(stats.blocks_with_imports, 2);
        assert_eq!(stats.blocks_with_exports, 1);
        assert_eq!(stats.complexity_distribution.low, 2);
        assert_eq!(stats.complexity_distribution.medium, 1);
        assert_eq!(stats.complexity_distribution.total(), stats.total_blocks);
        assert_eq!(stats.all_dependencies, vec!["os", "sys", "fs"]);
    }

    #[test]
    fn test_dependencies_not_deduplicated() {
        let blocks = vec![
            block("python", None, "import os"),
            block("python", None, "import os"),
        ];
        assert_eq!(build_stats(&blocks).all_dependencies, vec!["os", "os"]);
    }
}
