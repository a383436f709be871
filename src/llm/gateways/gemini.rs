//! Gemini gateway for LLM interactions.
//!
//! This module provides a gateway for the Gemini `generateContent` REST API,
//! supporting text generation, multimodal (image) input, and tool calling.

use crate::error::{LabelwiseError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::gemini_messages_adapter::adapt_messages_to_gemini;
use crate::llm::models::{LlmGatewayResponse, LlmMessage, LlmToolCall};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GEMINI_API_ENDPOINT").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            timeout: None,
        }
    }
}

/// Gateway for the hosted Gemini model service.
///
/// This gateway provides access to Gemini models through the REST API,
/// supporting text generation, inline image input, and tool calling.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a new Gemini gateway with default configuration.
    pub fn new() -> Self {
        Self::with_config(GeminiConfig::default())
    }

    /// Create a new Gemini gateway with custom configuration.
    pub fn with_config(config: GeminiConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    fn build_request_body(
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<Value> {
        let (system_instruction, contents) = adapt_messages_to_gemini(messages)?;

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": config.temperature,
                "maxOutputTokens": config.max_tokens
            }
        });

        if let Some(system_instruction) = system_instruction {
            body["system_instruction"] = system_instruction;
        }

        if let Some(tools) = tools {
            let declarations: Vec<Value> = tools
                .iter()
                .map(|t| {
                    let f = t.descriptor().function;
                    serde_json::json!({
                        "name": f.name,
                        "description": f.description,
                        "parameters": f.parameters
                    })
                })
                .collect();
            body["tools"] = serde_json::json!([{"function_declarations": declarations}]);
        }

        Ok(body)
    }

    fn parse_response(body: &Value) -> Result<LlmGatewayResponse> {
        let parts = body["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                LabelwiseError::Gateway("No candidates in Gemini response".to_string())
            })?;

        let mut texts: Vec<&str> = Vec::new();
        let mut tool_calls = Vec::new();

        for part in parts {
            if let Some(text) = part["text"].as_str() {
                texts.push(text);
            }

            if let Some(call) = part["functionCall"].as_object() {
                let name = call
                    .get("name")
                    .and_then(|n| n.as_str())
                    .ok_or_else(|| {
                        LabelwiseError::Gateway("Function call without a name".to_string())
                    })?
                    .to_string();

                let arguments: HashMap<String, Value> = call
                    .get("args")
                    .and_then(|a| a.as_object())
                    .map(|args| args.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                    .unwrap_or_default();

                tool_calls.push(LlmToolCall {
                    id: None,
                    name,
                    arguments,
                });
            }
        }

        let content = if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        };

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }
}

impl Default for GeminiGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to Gemini for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let body = Self::build_request_body(messages, tools, config)?;

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.config.base_url, model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LabelwiseError::Gateway(format!(
                "Gemini API error: {}",
                response.status()
            )));
        }

        let response_body: Value = response.json().await?;

        Self::parse_response(&response_body)
    }
}
