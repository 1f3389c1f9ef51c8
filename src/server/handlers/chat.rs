//! Chat and code generation handlers
//!
//! Both endpoints forward a transcript to the provider under the code
//! generation system prompt, then run the extraction pipeline over the
//! reply text.

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::ai::{CODE_GENERATION_SYSTEM_PROMPT, CompletionRequest, ReplyContent, build_generation_prompt};
use crate::extraction::CodeBlockProcessor;
use crate::server::AppState;
use crate::server::error::{ApiError, INVALID_JSON, MESSAGES_REQUIRED};
use crate::types::{ChatTurn, CodeGenerationRequest, ExtractionLog, ProcessedCodeBlock, ProcessingStats};

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: AssistantMessage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: String,
    pub code_blocks: Vec<ProcessedCodeBlock>,
    pub processing_stats: ProcessingStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_log: Option<ExtractionLog>,
}

/// `POST /api/chat`
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request(INVALID_JSON))?;

    let messages = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request(MESSAGES_REQUIRED))?;

    let turns: Vec<ChatTurn> = messages.iter().map(ChatTurn::from_value).collect();

    info!(messages = turns.len(), "Chat request received");
    if let Some(code_request) = body.get("codeRequest").filter(|v| !v.is_null()) {
        debug!(%code_request, "Code request options");
    }

    reply(&state, turns).await.map(Json)
}

/// `POST /api/generate`
pub async fn generate(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let request: CodeGenerationRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid code generation request: {}", e)))?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Prompt is required"));
    }

    let prompt = build_generation_prompt(&request);
    info!(
        language = request.language.as_deref().unwrap_or("code"),
        "Generation request received"
    );
    debug!(%prompt, "Generated prompt");

    reply(&state, vec![ChatTurn::user(prompt)]).await.map(Json)
}

async fn reply(state: &AppState, turns: Vec<ChatTurn>) -> Result<ChatResponse, ApiError> {
    let request = CompletionRequest::new(CODE_GENERATION_SYSTEM_PROMPT, turns);
    let response = state.provider.complete(&request).await?;

    info!(
        provider = %response.metadata.provider,
        model = %response.metadata.model,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        elapsed_ms = response.timing.total_ms,
        kind = response.content.kind(),
        "Provider reply received"
    );

    let text = match response.content {
        ReplyContent::Text(text) => text,
        ReplyContent::Other(kind) => return Err(ApiError::NonTextReply(kind)),
    };

    let outcome = CodeBlockProcessor::new().process(&text);
    info!(
        blocks = outcome.blocks.len(),
        languages = ?outcome.stats.languages,
        total_lines = outcome.stats.total_lines,
        method = %outcome.method,
        "Response prepared"
    );

    Ok(ChatResponse {
        message: AssistantMessage {
            role: "assistant",
            content: text,
            code_blocks: outcome.blocks,
            processing_stats: outcome.stats,
            extraction_log: state.server.include_extraction_log.then_some(outcome.log),
        },
    })
}
