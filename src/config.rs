//! Startup configuration loaded from the environment.
//!
//! Both service credentials are read once at startup. A missing credential is a
//! fatal [`LabelwiseError::Config`] so the application never serves requests with a
//! half-configured agent.

use crate::error::{LabelwiseError, Result};

/// Default multimodal model used for ingredient extraction.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential for the hosted Gemini model service.
    pub gemini_api_key: String,
    /// Credential for the Tavily web-search tool.
    pub tavily_api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
}

impl AppConfig {
    /// Load configuration from the environment (honoring a `.env` file if present).
    ///
    /// Required variables: `GEMINI_API_KEY`, `TAVILY_API_KEY`.
    /// Optional: `LABELWISE_MODEL` (defaults to [`DEFAULT_MODEL`]).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let gemini_api_key = require_var("GEMINI_API_KEY")?;
        let tavily_api_key = require_var("TAVILY_API_KEY")?;
        let model =
            std::env::var("LABELWISE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            gemini_api_key,
            tavily_api_key,
            model,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(LabelwiseError::Config(format!("{} is not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_var_present() {
        std::env::set_var("LABELWISE_TEST_VAR", "value");
        assert_eq!(require_var("LABELWISE_TEST_VAR").unwrap(), "value");
        std::env::remove_var("LABELWISE_TEST_VAR");
    }

    #[test]
    fn test_require_var_missing() {
        std::env::remove_var("LABELWISE_TEST_MISSING");
        let err = require_var("LABELWISE_TEST_MISSING").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: LABELWISE_TEST_MISSING is not set"
        );
    }

    #[test]
    fn test_require_var_blank_rejected() {
        std::env::set_var("LABELWISE_TEST_BLANK", "   ");
        assert!(require_var("LABELWISE_TEST_BLANK").is_err());
        std::env::remove_var("LABELWISE_TEST_BLANK");
    }

    #[test]
    fn test_default_model() {
        assert_eq!(DEFAULT_MODEL, "gemini-2.0-flash");
    }
}
