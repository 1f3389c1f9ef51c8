//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Complexity tier thresholds (line counts)
pub mod complexity {
    /// Blocks with more lines than this are `high`
    pub const HIGH_LINE_THRESHOLD: usize = 100;

    /// Blocks with more lines than this (and not high) are `medium`
    pub const MEDIUM_LINE_THRESHOLD: usize = 30;
}

/// Block validation constants
pub mod validation {
    /// Minimum trimmed code length for a block to be kept
    pub const MIN_CODE_LENGTH: usize = 3;
}

/// Block id generation
pub mod ids {
    /// Prefix for ids assigned by the full pipeline
    pub const ENHANCED_PREFIX: &str = "code";

    /// Prefix for ids assigned by the fallback scanner
    pub const FALLBACK_PREFIX: &str = "simple";

    /// Length of the random base-36 suffix
    pub const SUFFIX_LEN: usize = 6;
}

/// LLM request defaults
pub mod llm {
    /// Default provider name
    pub const DEFAULT_PROVIDER: &str = "anthropic";

    /// Default model for the default provider
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

    /// Maximum tokens to generate per reply
    pub const DEFAULT_MAX_TOKENS: usize = 4000;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
}

/// HTTP service defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 3000;
}
