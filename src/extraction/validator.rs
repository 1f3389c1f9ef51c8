//! Block Validator
//!
//! Structural checks first, then the language plausibility rule. A rejected
//! block is dropped from the result; rejection never fails the run.

use std::fmt;

use super::rules::rules_for;
use crate::constants::validation::MIN_CODE_LENGTH;
use crate::types::ProcessedCodeBlock;

/// Why a block was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyCode,
    MissingLanguage,
    TooShort,
    Implausible,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::EmptyCode => "empty_code",
            Rejection::MissingLanguage => "missing_language",
            Rejection::TooShort => "too_short",
            Rejection::Implausible => "implausible",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate(block: &ProcessedCodeBlock) -> Result<(), Rejection> {
    let trimmed = block.code.trim();

    if trimmed.is_empty() {
        return Err(Rejection::EmptyCode);
    }
    if block.language.trim().is_empty() {
        return Err(Rejection::MissingLanguage);
    }
    if trimmed.chars().count() < MIN_CODE_LENGTH {
        return Err(Rejection::TooShort);
    }
    if !rules_for(&block.language).is_plausible(&block.code) {
        return Err(Rejection::Implausible);
    }

    Ok(())
}

pub fn is_valid(block: &ProcessedCodeBlock) -> bool {
    validate(block).is_ok()
}
