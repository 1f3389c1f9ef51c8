//! Pipeline observation hooks
//!
//! The orchestrator reports what it does through a [`PipelineObserver`]
//! instead of logging directly. The default observer forwards events to
//! `tracing`.

use tracing::debug;

use super::validator::Rejection;
use crate::types::{ExtractionMethod, ProcessedCodeBlock, ProcessingStats, RawCodeBlock};

#[derive(Debug)]
pub enum PipelineEvent<'a> {
    RunStarted { input_length: usize },
    BlockExtracted(&'a RawCodeBlock),
    BlockAnalyzed(&'a ProcessedCodeBlock),
    BlockRejected {
        block: &'a ProcessedCodeBlock,
        reason: Rejection,
    },
    BlockAccepted(&'a ProcessedCodeBlock),
    FallbackTriggered,
    RunCompleted {
        method: ExtractionMethod,
        stats: &'a ProcessingStats,
        elapsed_ms: u64,
    },
}

impl PipelineEvent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineEvent::RunStarted { .. } => "run_started",
            PipelineEvent::BlockExtracted(_) => "block_extracted",
            PipelineEvent::BlockAnalyzed(_) => "block_analyzed",
            PipelineEvent::BlockRejected { .. } => "block_rejected",
            PipelineEvent::BlockAccepted(_) => "block_accepted",
            PipelineEvent::FallbackTriggered => "fallback_triggered",
            PipelineEvent::RunCompleted { .. } => "run_completed",
        }
    }
}

pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent<'_>);
}

impl<F> PipelineObserver for F
where
    F: Fn(&PipelineEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &PipelineEvent<'_>) {
        self(event)
    }
}

/// Discards every event
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&self, _event: &PipelineEvent<'_>) {}
}

/// Forwards events as `debug!` records under the `codeweave::extraction` target
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::RunStarted { input_length } => {
                debug!(target: "codeweave::extraction", input_length, "Extraction started");
            }
            PipelineEvent::BlockExtracted(raw) => {
                debug!(
                    target: "codeweave::extraction",
                    language = %raw.language,
                    filename = raw.filename.as_deref().unwrap_or("-"),
                    code_length = raw.code.len(),
                    "Block extracted"
                );
            }
            PipelineEvent::BlockAnalyzed(block) => {
                debug!(
                    target: "codeweave::extraction",
                    id = %block.id,
                    lines = block.metadata.line_count,
                    complexity = %block.metadata.estimated_complexity,
                    dependencies = block.metadata.dependencies.len(),
                    "Block analyzed"
                );
            }
            PipelineEvent::BlockRejected { block, reason } => {
                debug!(
                    target: "codeweave::extraction",
                    id = %block.id,
                    language = %block.language,
                    %reason,
                    "Block rejected"
                );
            }
            PipelineEvent::BlockAccepted(block) => {
                debug!(target: "codeweave::extraction", id = %block.id, "Block accepted");
            }
            PipelineEvent::FallbackTriggered => {
                debug!(target: "codeweave::extraction", "No valid blocks, using fallback scanner");
            }
            PipelineEvent::RunCompleted {
                method,
                stats,
                elapsed_ms,
            } => {
                debug!(
                    target: "codeweave::extraction",
                    %method,
                    blocks = stats.total_blocks,
                    languages = ?stats.languages,
                    elapsed_ms,
                    "Extraction completed"
                );
            }
        }
    }
}

/// Records event kinds in arrival order
#[cfg(test)]
#[derive(Default)]
pub(crate) struct EventRecorder {
    events: std::sync::Mutex<Vec<&'static str>>,
}

#[cfg(test)]
impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl PipelineObserver for EventRecorder {
    fn on_event(&self, event: &PipelineEvent<'_>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.kind());
        }
    }
}
