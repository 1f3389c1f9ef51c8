pub mod block;
pub mod chat;
pub mod error;

pub use block::{
    CodeBlockMetadata, Complexity, ComplexityDistribution, ExtractionLog, ExtractionMethod,
    ProcessedCodeBlock, ProcessingStats, RawCodeBlock, count_lines,
};
pub use chat::{ChatTurn, CodeGenerationRequest, Role};
pub use error::{CodeweaveError, ErrorCategory, ErrorClassifier, LlmError, Result};
