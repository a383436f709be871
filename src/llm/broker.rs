use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage, MessageRole};
use crate::llm::tools::LlmTool;
use std::sync::Arc;
use tracing::{info, warn};

/// Main interface for LLM interactions
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
        }
    }

    /// Generate text response from LLM
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();
        let current_messages = messages.to_vec();

        // Make initial LLM call
        let response =
            self.gateway.complete(&self.model, &current_messages, tools, &config).await?;

        // Handle tool calls if present
        if !response.tool_calls.is_empty() {
            if let Some(tools) = tools {
                return Box::pin(self.handle_tool_calls(
                    current_messages,
                    response,
                    tools,
                    &config,
                ))
                .await;
            }
        }

        Ok(response.content.unwrap_or_default())
    }

    fn handle_tool_calls<'a>(
        &'a self,
        mut messages: Vec<LlmMessage>,
        response: LlmGatewayResponse,
        tools: &'a [Box<dyn LlmTool>],
        config: &'a CompletionConfig,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Tool calls requested: {}", response.tool_calls.len());

            for tool_call in &response.tool_calls {
                // Find matching tool
                if let Some(tool) = tools.iter().find(|t| t.matches(&tool_call.name)) {
                    info!("Executing tool: {}", tool_call.name);

                    let output = tool.run(&tool_call.arguments).await?;

                    // Add tool call and response to messages
                    messages.push(LlmMessage {
                        role: MessageRole::Assistant,
                        content: None,
                        tool_calls: Some(vec![tool_call.clone()]),
                        image_paths: None,
                    });
                    messages.push(LlmMessage {
                        role: MessageRole::Tool,
                        content: Some(serde_json::to_string(&output)?),
                        tool_calls: Some(vec![tool_call.clone()]),
                        image_paths: None,
                    });

                    // Recursively call generate with updated messages
                    return self.generate(&messages, Some(tools), Some(config.clone())).await;
                } else {
                    warn!("Tool not found: {}", tool_call.name);
                }
            }

            Ok(response.content.unwrap_or_default())
        })
    }
}
