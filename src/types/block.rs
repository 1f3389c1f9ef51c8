//! Code block data model
//!
//! Types flowing through the extraction pipeline, from the raw fence match
//! to the aggregate statistics returned alongside a chat reply. Everything
//! here serializes to the camelCase wire format the chat client consumes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::complexity;

// =============================================================================
// Complexity Tier
// =============================================================================

/// Coarse complexity classification derived from line count alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Step function: `> 100` lines is high, `> 30` is medium, anything else low
    pub fn from_line_count(lines: usize) -> Self {
        if lines > complexity::HIGH_LINE_THRESHOLD {
            Complexity::High
        } else if lines > complexity::MEDIUM_LINE_THRESHOLD {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Complexity::Low),
            "medium" => Ok(Complexity::Medium),
            "high" => Ok(Complexity::High),
            _ => Err(format!(
                "Unknown complexity: {}. Valid values: low, medium, high",
                s
            )),
        }
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// A fenced region exactly as the scanner found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCodeBlock {
    /// Language tag following the opening fence
    pub language: String,
    /// Inline filename after the tag (`lang:path`), if any
    pub filename: Option<String>,
    /// Trimmed code between the fences
    pub code: String,
    /// The full matched text including both fences
    pub raw_match: String,
}

/// Structural signals derived from a `(code, language)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlockMetadata {
    pub line_count: usize,
    pub has_imports: bool,
    pub has_exports: bool,
    pub has_comments: bool,
    pub estimated_complexity: Complexity,
    pub dependencies: Vec<String>,
}

impl CodeBlockMetadata {
    /// Minimal metadata for blocks that bypass the analyzer.
    ///
    /// Only the line count and its tier are filled in; no language rule is
    /// consulted.
    pub fn synthetic(code: &str) -> Self {
        let line_count = count_lines(code);
        Self {
            line_count,
            estimated_complexity: Complexity::from_line_count(line_count),
            ..Default::default()
        }
    }
}

/// Newline-delimited line count, including a trailing partial line
pub fn count_lines(code: &str) -> usize {
    code.split('\n').count()
}

/// An extracted block with its generated id and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedCodeBlock {
    pub id: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub code: String,
    pub metadata: CodeBlockMetadata,
}

// =============================================================================
// Statistics
// =============================================================================

/// Block count per complexity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComplexityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ComplexityDistribution {
    pub fn record(&mut self, tier: Complexity) {
        match tier {
            Complexity::Low => self.low += 1,
            Complexity::Medium => self.medium += 1,
            Complexity::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Corpus-level aggregate over one result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub total_blocks: usize,
    /// Distinct languages, first-seen order
    pub languages: Vec<String>,
    pub total_lines: usize,
    pub blocks_with_files: usize,
    pub blocks_with_imports: usize,
    pub blocks_with_exports: usize,
    pub complexity_distribution: ComplexityDistribution,
    /// Every block's dependencies concatenated in block order (not deduplicated)
    pub all_dependencies: Vec<String>,
}

// =============================================================================
// Extraction Log
// =============================================================================

/// Which path produced the final block list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Scanner, analyzer and validator all ran
    Enhanced,
    /// Primary path came up empty; the single-pass scanner supplied the result
    Fallback,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMethod::Enhanced => write!(f, "enhanced"),
            ExtractionMethod::Fallback => write!(f, "fallback"),
        }
    }
}

/// Summary of one pipeline run, surfaced to the debug view on request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionLog {
    pub timestamp: DateTime<Utc>,
    pub input_length: usize,
    pub blocks_found: usize,
    pub languages: Vec<String>,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    pub method: ExtractionMethod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complexity_thresholds() {
        assert_eq!(Complexity::from_line_count(1), Complexity::Low);
        assert_eq!(Complexity::from_line_count(30), Complexity::Low);
        assert_eq!(Complexity::from_line_count(31), Complexity::Medium);
        assert_eq!(Complexity::from_line_count(100), Complexity::Medium);
        assert_eq!(Complexity::from_line_count(101), Complexity::High);
    }

    #[test]
    fn test_complexity_parse() {
        assert_eq!("HIGH".parse::<Complexity>().unwrap(), Complexity::High);
        assert!("extreme".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("a"), 1);
        assert_eq!(count_lines("a\nb"), 2);
        assert_eq!(count_lines("a\nb\n"), 3);
    }

    #[test]
    fn test_block_wire_format() {
        let block = ProcessedCodeBlock {
            id: "code_1_0_abc123".to_string(),
            language: "rust".to_string(),
            filename: None,
            code: "fn main() {}".to_string(),
            metadata: CodeBlockMetadata::synthetic("fn main() {}"),
        };

        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("filename").is_none());
        assert_eq!(value["metadata"]["lineCount"], json!(1));
        assert_eq!(value["metadata"]["estimatedComplexity"], json!("low"));
        assert_eq!(value["metadata"]["hasImports"], json!(false));
    }

    #[test]
    fn test_stats_wire_format() {
        let stats = ProcessingStats::default();
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalBlocks"], json!(0));
        assert_eq!(
            value["complexityDistribution"],
            json!({"low": 0, "medium": 0, "high": 0})
        );
        assert_eq!(value["allDependencies"], json!([]));
    }

    #[test]
    fn test_extraction_log_wire_format() {
        let log = ExtractionLog {
            timestamp: Utc::now(),
            input_length: 42,
            blocks_found: 1,
            languages: vec!["sql".to_string()],
            processing_time_ms: 3,
            method: ExtractionMethod::Fallback,
        };

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["processingTime"], json!(3));
        assert_eq!(value["inputLength"], json!(42));
        assert_eq!(value["blocksFound"], json!(1));
        assert_eq!(value["method"], json!("fallback"));
        assert!(value.get("processingTimeMs").is_none());
    }
}
