use console::style;

use crate::types::{Complexity, ProcessedCodeBlock, ProcessingStats};

/// Styled terminal output for CLI commands
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("  {:<18} {}", style(label).dim(), value);
    }

    /// One-line summary of a block followed by its code
    pub fn block(&self, index: usize, block: &ProcessedCodeBlock) {
        let meta = &block.metadata;
        let title = block
            .filename
            .clone()
            .unwrap_or_else(|| format!("Code Block {}", index + 1));
        let tier = match meta.estimated_complexity {
            Complexity::Low => style(meta.estimated_complexity.as_str()).green(),
            Complexity::Medium => style(meta.estimated_complexity.as_str()).yellow(),
            Complexity::High => style(meta.estimated_complexity.as_str()).red(),
        };

        self.section(&format!("{} ({})", title, block.language));
        self.field("id", &block.id);
        self.field("lines", meta.line_count);
        self.field("complexity", tier);
        self.field(
            "signals",
            format!(
                "imports={} exports={} comments={}",
                meta.has_imports, meta.has_exports, meta.has_comments
            ),
        );
        if !meta.dependencies.is_empty() {
            self.field("dependencies", meta.dependencies.join(", "));
        }
        println!();
        println!("{}", block.code);
    }

    pub fn stats(&self, stats: &ProcessingStats) {
        let dist = &stats.complexity_distribution;

        self.header("Processing Stats");
        self.field("blocks", stats.total_blocks);
        self.field("languages", stats.languages.join(", "));
        self.field("total lines", stats.total_lines);
        self.field("with filename", stats.blocks_with_files);
        self.field("with imports", stats.blocks_with_imports);
        self.field("with exports", stats.blocks_with_exports);
        self.field(
            "complexity",
            format!("low {} / medium {} / high {}", dist.low, dist.medium, dist.high),
        );
        if !stats.all_dependencies.is_empty() {
            self.field("dependencies", stats.all_dependencies.join(", "));
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
