//! Remote translation engine interface.
//!
//! The engine receives the strings of one target language at a time and
//! returns the translated strings with usage counters and a finish reason.
//! Chunking, retries and content filtering are the engine's business.
//!
//! - `http`: JSON-over-HTTP client for a hosted engine

use std::{collections::HashMap, fmt, ops::AddAssign};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::messages::{MessageFormat, MessageUnit};

pub mod http;

pub use http::HttpTranslator;

/// Formatting constraints forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatFlags {
    pub format: MessageFormat,
    /// Keep `{name}` / ICU placeholders untouched.
    pub preserve_placeholders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub source_language: String,
    pub target_language: String,
    pub units: Vec<MessageUnit>,
    pub flags: FormatFlags,
    /// Free-form description of the product, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Counters reported by the engine for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usage {
    pub input_units: u64,
    pub output_units: u64,
    pub characters: u64,
}

impl AddAssign for Usage {
    fn add_assign(&mut self, other: Self) {
        self.input_units += other.input_units;
        self.output_units += other.output_units;
        self.characters += other.characters;
    }
}

/// Why the engine stopped producing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Completed,
    /// Output hit a length limit; some units may be missing.
    Truncated,
    ContentFiltered,
    #[serde(untagged)]
    Other(String),
}

impl FinishReason {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Truncated => f.write_str("truncated"),
            Self::ContentFiltered => f.write_str("content-filtered"),
            Self::Other(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub units: Vec<MessageUnit>,
    #[serde(default)]
    pub usage: Usage,
    pub finish_reason: FinishReason,
}

impl TranslationResponse {
    /// Translated texts indexed by key path.
    pub fn into_map(self) -> HashMap<String, String> {
        self.units
            .into_iter()
            .map(|unit| (unit.key, unit.text))
            .collect()
    }
}

/// A translation engine.
///
/// Implementations are shared across the worker threads that translate the
/// target languages in parallel.
pub trait Translator: Send + Sync {
    fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse>;
}
