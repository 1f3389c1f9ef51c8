//! Code block extraction pipeline
//!
//! Scanner → Analyzer → Validator → (fallback Scanner) → Statistics.
//!
//! [`CodeBlockProcessor`] is the only entry point the service layer uses.
//! Every stage is pure; the processor owns no state beyond its observer, so
//! one instance can serve concurrent requests.

pub mod analyzer;
pub mod export;
pub mod ids;
pub mod observer;
pub mod rules;
pub mod scanner;
pub mod stats;
pub mod validator;

use std::time::Instant;

use chrono::Utc;

pub use analyzer::analyze;
pub use export::{bundle, download_name, file_extension, write_blocks};
pub use observer::{NoopObserver, PipelineEvent, PipelineObserver, TracingObserver};
pub use scanner::{fallback_scan, scan};
pub use stats::build_stats;
pub use validator::{Rejection, validate};

use crate::constants::ids as id_prefix;
use crate::types::{ExtractionLog, ExtractionMethod, ProcessedCodeBlock, ProcessingStats};
use ids::BlockIdGenerator;

static TRACING_OBSERVER: TracingObserver = TracingObserver;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub blocks: Vec<ProcessedCodeBlock>,
    pub stats: ProcessingStats,
    pub method: ExtractionMethod,
    pub log: ExtractionLog,
}

pub struct CodeBlockProcessor<'a> {
    observer: &'a dyn PipelineObserver,
}

impl Default for CodeBlockProcessor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlockProcessor<'static> {
    /// Processor reporting through `tracing`
    pub fn new() -> Self {
        Self {
            observer: &TRACING_OBSERVER,
        }
    }
}

impl<'a> CodeBlockProcessor<'a> {
    pub fn with_observer(observer: &'a dyn PipelineObserver) -> Self {
        Self { observer }
    }

    pub fn process(&self, raw_text: &str) -> ProcessingOutcome {
        let started = Instant::now();
        self.observer.on_event(&PipelineEvent::RunStarted {
            input_length: raw_text.len(),
        });

        let id_gen = BlockIdGenerator::new(id_prefix::ENHANCED_PREFIX);
        let mut blocks = Vec::new();

        for (index, raw) in scanner::scan_fences(raw_text).enumerate() {
            self.observer.on_event(&PipelineEvent::BlockExtracted(&raw));

            let block = analyzer::analyze_block(raw, index, &id_gen);
            self.observer.on_event(&PipelineEvent::BlockAnalyzed(&block));

            match validator::validate(&block) {
                Ok(()) => {
                    self.observer.on_event(&PipelineEvent::BlockAccepted(&block));
                    blocks.push(block);
                }
                Err(reason) => {
                    self.observer.on_event(&PipelineEvent::BlockRejected {
                        block: &block,
                        reason,
                    });
                }
            }
        }

        let mut method = ExtractionMethod::Enhanced;
        if blocks.is_empty() && !raw_text.is_empty() {
            self.observer.on_event(&PipelineEvent::FallbackTriggered);
            blocks = scanner::fallback_scan(raw_text);
            method = ExtractionMethod::Fallback;
        }

        let stats = build_stats(&blocks);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.observer.on_event(&PipelineEvent::RunCompleted {
            method,
            stats: &stats,
            elapsed_ms,
        });

        let log = ExtractionLog {
            timestamp: Utc::now(),
            input_length: raw_text.len(),
            blocks_found: blocks.len(),
            languages: stats.languages.clone(),
            processing_time_ms: elapsed_ms,
            method,
        };

        ProcessingOutcome {
            blocks,
            stats,
            method,
            log,
        }
    }
}

/// Run the pipeline with the default observer
pub fn process(raw_text: &str) -> (Vec<ProcessedCodeBlock>, ProcessingStats) {
    let outcome = CodeBlockProcessor::new().process(raw_text);
    (outcome.blocks, outcome.stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::observer::EventRecorder;
    use crate::types::Complexity;

    #[test]
    fn test_javascript_with_filename() {
        let text = "Here:\n```javascript:app.js\nconst x = 1;\n```";
        let (blocks, stats) = process(text);

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert!(block.id.starts_with("code_"));
        assert_eq!(block.language, "javascript");
        assert_eq!(block.filename.as_deref(), Some("app.js"));
        assert_eq!(block.code, "const x = 1;");
        assert_eq!(block.metadata.line_count, 1);
        assert!(!block.metadata.has_imports);
        assert!(!block.metadata.has_exports);
        assert!(!block.metadata.has_comments);
        assert_eq!(block.metadata.estimated_complexity, Complexity::Low);

        assert_eq!(stats.total_blocks, 1);
        assert_eq!(stats.languages, vec!["javascript"]);
        assert_eq!(stats.blocks_with_files, 1);
        assert_eq!(stats.complexity_distribution.low, 1);
    }

    #[test]
    fn test_empty_block_dropped_python_kept() {
        let text = "```python\nimport os\nprint(os.name)\n```\n```text\n\n```";
        let (blocks, stats) = process(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "python");
        assert!(blocks[0].metadata.has_imports);
        assert_eq!(blocks[0].metadata.dependencies, vec!["os"]);
        assert_eq!(stats.all_dependencies, vec!["os"]);
    }

    #[test]
    fn test_prose_only() {
        let outcome = CodeBlockProcessor::new().process("No code in this answer.");
        assert!(outcome.blocks.is_empty());
        assert_eq!(outcome.stats.total_blocks, 0);
        assert_eq!(outcome.stats.complexity_distribution.total(), 0);
        // Fallback ran and found nothing either
        assert_eq!(outcome.method, ExtractionMethod::Fallback);
    }

    #[test]
    fn test_empty_input_skips_fallback() {
        let recorder = EventRecorder::new();
        let outcome = CodeBlockProcessor::with_observer(&recorder).process("");

        assert!(outcome.blocks.is_empty());
        assert_eq!(outcome.method, ExtractionMethod::Enhanced);
        assert_eq!(recorder.kinds(), vec!["run_started", "run_completed"]);
    }

    #[test]
    fn test_fallback_rescues_implausible_blocks() {
        let text = "```javascript\nhello world\n```";
        let outcome = CodeBlockProcessor::with_observer(&NoopObserver).process(text);

        assert_eq!(outcome.method, ExtractionMethod::Fallback);
        assert_eq!(outcome.blocks.len(), 1);
        assert!(outcome.blocks[0].id.starts_with("simple_"));
        assert_eq!(outcome.blocks[0].code, "hello world");
        assert_eq!(outcome.stats.complexity_distribution.low, 1);
        assert_eq!(outcome.log.blocks_found, 1);
    }

    #[test]
    fn test_fallback_keeps_blank_code_blocks() {
        let outcome = CodeBlockProcessor::with_observer(&NoopObserver).process("```text\n\n```");
        assert_eq!(outcome.method, ExtractionMethod::Fallback);
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.blocks[0].code, "");
        assert_eq!(outcome.stats.total_blocks, 1);

        let outcome = CodeBlockProcessor::with_observer(&NoopObserver).process("no fences here");
        assert_eq!(outcome.method, ExtractionMethod::Fallback);
        assert!(outcome.blocks.is_empty());
    }

    #[test]
    fn test_event_order() {
        let recorder = EventRecorder::new();
        let text = "```rust\nfn main() {}\n```\n```html\nplain\n```";
        CodeBlockProcessor::with_observer(&recorder).process(text);

        assert_eq!(
            recorder.kinds(),
            vec![
                "run_started",
                "block_extracted",
                "block_analyzed",
                "block_accepted",
                "block_extracted",
                "block_analyzed",
                "block_rejected",
                "run_completed",
            ]
        );
    }

    #[test]
    fn test_ids_unique_and_indexed() {
        let text = "```go\nfunc a() {}\n```\n```go\nfunc b() {}\n```";
        let (blocks, _) = process(text);

        assert_eq!(blocks.len(), 2);
        assert_ne!(blocks[0].id, blocks[1].id);
        assert_eq!(blocks[0].id.split('_').nth(2), Some("0"));
        assert_eq!(blocks[1].id.split('_').nth(2), Some("1"));
    }

    #[test]
    fn test_log_matches_outcome() {
        let text = "```sql\nSELECT 1;\n```";
        let outcome = CodeBlockProcessor::new().process(text);
        assert_eq!(outcome.log.input_length, text.len());
        assert_eq!(outcome.log.blocks_found, 1);
        assert_eq!(outcome.log.languages, vec!["sql"]);
        assert_eq!(outcome.log.method, ExtractionMethod::Enhanced);
    }
}
