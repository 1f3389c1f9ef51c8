//! AI Integration Layer
//!
//! Provider abstraction for chat completion and the prompts sent through it.

pub mod prompt;
pub mod provider;

pub use prompt::{
    CODE_GENERATION_SYSTEM_PROMPT, CodeTemplate, PromptBuilder, build_generation_prompt,
    templates_in,
};
pub use provider::{
    AnthropicProvider, CompletionRequest, ErrorCategory, ErrorClassifier, LlmError, LlmProvider,
    LlmResponse, OllamaProvider, OpenAiProvider, ProviderConfig, ReplyContent, ResponseMetadata,
    ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
