//! User Settings Domain Model
//!
//! Rendering and content-generation preferences. Every field has a default,
//! so a partial or missing settings file is always usable.

use serde::{Deserialize, Serialize};

/// What to do with body tokens that name no resolved variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTokenPolicy {
    /// Replace the token with `[Unknown: <name>]` (default).
    #[default]
    Flag,
    /// Leave the token in the output as literal text.
    Keep,
}

impl UnknownTokenPolicy {
    /// Parses a policy name as accepted on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "flag" => Some(Self::Flag),
            "keep" => Some(Self::Keep),
            _ => None,
        }
    }
}

/// Settings that affect rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderSettings {
    /// Handling of unresolved tokens left in the document body.
    pub unknown_tokens: UnknownTokenPolicy,
}

/// Settings for the external content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Base URL of the generative language API.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling probability.
    pub top_p: f32,
    /// Top-k sampling.
    pub top_k: u32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Default API base for content generation.
pub const DEFAULT_GENERATOR_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATOR_ENDPOINT.to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

/// All user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Rendering preferences.
    pub render: RenderSettings,
    /// Content generation preferences.
    pub generator: GeneratorSettings,
}
