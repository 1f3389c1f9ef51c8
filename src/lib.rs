//! Codeweave - Chat-Driven Code Generation Service
//!
//! Forwards chat transcripts to an LLM under a code generation system
//! prompt and turns the fenced code blocks in each reply into structured,
//! validated records with per-block metadata and aggregate statistics.
//!
//! ## Core Features
//!
//! - **Extraction Pipeline**: fence scanning, per-language metadata heuristics,
//!   validation, and a single-pass fallback when nothing survives
//! - **Provider Abstraction**: Anthropic, OpenAI and Ollama backends
//! - **HTTP Service**: `/api/chat`, `/api/generate`, `/api/templates`
//!
//! ## Quick Start
//!
//! ```
//! let (blocks, stats) = codeweave::process("```python\nimport os\n```");
//! assert_eq!(blocks[0].metadata.dependencies, vec!["os"]);
//! assert_eq!(stats.total_blocks, 1);
//! ```
//!
//! ## Modules
//!
//! - [`extraction`]: Scanner, analyzer, validator, statistics, orchestrator
//! - [`ai`]: LLM provider abstraction, prompts and template catalog
//! - [`server`]: axum routes and handlers
//! - [`config`]: Layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod extraction;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{CodeweaveError, ErrorCategory, Result};

// Data Model
pub use types::{
    CodeBlockMetadata, Complexity, ProcessedCodeBlock, ProcessingStats, RawCodeBlock,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use extraction::{CodeBlockProcessor, PipelineObserver, ProcessingOutcome, process};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, ReplyContent, SharedProvider, create_provider};
