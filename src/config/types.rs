//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/codeweave/) and project (.codeweave/) level configuration.

use serde::{Deserialize, Serialize};

use crate::ai::ProviderConfig;
use crate::constants::{llm, server};
use crate::types::{CodeweaveError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// HTTP service settings
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `CodeweaveError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.llm.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(CodeweaveError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(CodeweaveError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(CodeweaveError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(CodeweaveError::Config(
                "Server host must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: anthropic, openai, ollama
    pub provider: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature; unset leaves the provider default
    pub temperature: Option<f32>,

    /// Maximum tokens per reply
    pub max_tokens: usize,

    /// Custom API endpoint
    pub api_base: Option<String>,

    /// Falls back to the provider's API key env var when unset.
    /// Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: None,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            api_base: None,
            api_key: None,
        }
    }
}

impl LlmConfig {
    /// An empty model name lets the provider pick its own default
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            model: Some(self.model.clone()).filter(|m| !m.trim().is_empty()),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Allowed CORS origin; unset allows any origin
    pub cors_origin: Option<String>,

    /// Attach the extraction log to chat responses
    pub include_extraction_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            cors_origin: None,
            include_extraction_log: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.model, "claude-3-5-sonnet-20240620");
        assert_eq!(config.llm.max_tokens, 4000);
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = Some(3.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.host = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_hidden() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());

        assert!(!format!("{:?}", config).contains("sk-secret"));
        assert!(!toml::to_string(&config).unwrap().contains("sk-secret"));
    }

    #[test]
    fn test_provider_config() {
        let mut llm = LlmConfig::default();
        llm.model = String::new();
        let provider = llm.to_provider_config();
        assert_eq!(provider.provider, "anthropic");
        assert!(provider.model.is_none());
        assert_eq!(provider.max_tokens, 4000);
    }
}
