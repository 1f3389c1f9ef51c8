//! Prompt construction
//!
//! The fixed system instruction sent with every chat call, the builder that
//! turns a structured [`CodeGenerationRequest`] into a user prompt, and the
//! built-in template catalog.

mod templates;

pub use templates::{CATEGORIES, CodeTemplate, all_templates, find_template, search_templates, templates_in};

use crate::types::CodeGenerationRequest;

/// System instruction for code generation chats
pub const CODE_GENERATION_SYSTEM_PROMPT: &str = r#"You are an expert software architect and code generator. Your role is to:

1. Generate clean, well-structured, and production-ready code
2. Provide detailed explanations for design decisions
3. Include proper error handling and best practices
4. Suggest file structures and organization
5. Provide multiple implementation options when relevant
6. Include comments and documentation
7. Consider scalability and maintainability

When generating code:
- Always specify the programming language and framework
- Include file paths in code blocks using the format: ```language:filepath
- Provide step-by-step implementation guides
- Suggest testing strategies
- Include package dependencies when needed
- Consider security best practices

Format your responses with clear sections:
- Overview/Architecture
- Implementation
- File Structure
- Dependencies
- Usage Examples
- Best Practices"#;

/// Line-oriented prompt builder; absent optional lines are skipped
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    lines: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, content: impl Into<String>) -> Self {
        self.lines.push(content.into());
        self
    }

    /// Add `{label}: {value}` when `value` is present and non-blank
    pub fn field(mut self, label: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.lines.push(format!("{}: {}", label, value));
        }
        self
    }

    /// Add `{label}: a, b, c` when `items` is present and non-empty
    pub fn list(self, label: &str, items: Option<&[String]>) -> Self {
        let joined = items
            .filter(|items| !items.is_empty())
            .map(|items| items.join(", "));
        self.field(label, joined.as_deref())
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

/// `Generate {language|code} for: {prompt}` plus framework and requirement lines
pub fn build_generation_prompt(request: &CodeGenerationRequest) -> String {
    let language = request
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("code");

    PromptBuilder::new()
        .line(format!("Generate {} for: {}", language, request.prompt))
        .field("Framework", request.framework.as_deref())
        .list("Requirements", request.requirements.as_deref())
        .build()
}
