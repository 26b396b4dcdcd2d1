//! Inference endpoint configuration
//!
//! Configuration comes either from environment variables (quick local use)
//! or from a TOML file under an `[inference]` table. Endpoint and model are
//! required; everything else has a default.

use crate::core::error::{Result, VisionError};
use std::path::Path;

/// Default wall-clock budget for one inference request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the vision inference endpoint
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL of the inference server (e.g. "http://localhost:8000")
    pub endpoint: String,
    /// Model identifier passed through to the server
    pub model: String,
    /// Bearer token; local vLLM/Ollama servers usually run without one
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VisionConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a config from environment variables
    ///
    /// Required: VISION_API_URL, VISION_MODEL
    /// Optional: VISION_API_KEY, VISION_TIMEOUT_SECS
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("VISION_API_URL")
            .map_err(|_| VisionError::Validation("VISION_API_URL not set".into()))?;
        let model = std::env::var("VISION_MODEL")
            .map_err(|_| VisionError::Validation("VISION_MODEL not set".into()))?;
        let api_key = std::env::var("VISION_API_KEY").ok();
        let timeout_secs = std::env::var("VISION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            model,
            api_key,
            timeout_secs,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Result<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e| VisionError::Validation(format!("invalid TOML: {}", e)))?;

        let inference = value
            .get("inference")
            .and_then(|v| v.as_table())
            .ok_or_else(|| VisionError::Validation("missing [inference] table".into()))?;

        let endpoint = inference
            .get("endpoint")
            .and_then(|v| v.as_str())
            .ok_or_else(|| VisionError::Validation("[inference] missing endpoint".into()))?
            .to_string();

        let model = inference
            .get("model")
            .and_then(|v| v.as_str())
            .ok_or_else(|| VisionError::Validation("[inference] missing model".into()))?
            .to_string();

        let api_key = inference
            .get("api_key")
            .and_then(|v| v.as_str())
            .map(String::from);

        let timeout_secs = inference
            .get("timeout_secs")
            .and_then(|v| v.as_integer())
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            model,
            api_key,
            timeout_secs,
        })
    }
}
