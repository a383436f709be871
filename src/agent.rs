//! The agent client: a configured handle to the hosted multimodal model.
//!
//! Constructed once at startup and injected wherever it is needed; configuration
//! is immutable after construction, so a single instance is safely shared across
//! sessions.

use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::gateways::GeminiGateway;
use crate::llm::tools::{LlmTool, TavilySearchTool};
use crate::llm::{LlmBroker, LlmMessage};
use crate::prompts::{ANALYSIS_INSTRUCTION, INSTRUCTIONS, MARKDOWN_DIRECTIVE, SYSTEM_PROMPT};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A fixed-configuration agent for ingredient extraction and follow-up questions.
pub struct IngredientAgent {
    broker: LlmBroker,
    system_message: LlmMessage,
    tools: Vec<Box<dyn LlmTool>>,
}

impl IngredientAgent {
    /// Build the agent from application configuration: Gemini broker plus the
    /// Tavily web-search capability.
    pub fn from_config(config: &AppConfig) -> Self {
        let gateway = Arc::new(GeminiGateway::with_api_key(config.gemini_api_key.clone()));
        let broker = LlmBroker::new(config.model.clone(), gateway);
        let tools: Vec<Box<dyn LlmTool>> =
            vec![Box::new(TavilySearchTool::new(config.tavily_api_key.clone()))];

        Self::new(broker, tools)
    }

    /// Build the agent from an explicit broker and tool set.
    pub fn new(broker: LlmBroker, tools: Vec<Box<dyn LlmTool>>) -> Self {
        let mut system = String::from(SYSTEM_PROMPT);
        system.push_str("\n\nInstructions:\n");
        for instruction in INSTRUCTIONS {
            system.push_str("- ");
            system.push_str(instruction);
            system.push('\n');
        }
        system.push('\n');
        system.push_str(MARKDOWN_DIRECTIVE);

        Self {
            broker,
            system_message: LlmMessage::system(system),
            tools,
        }
    }

    /// Send the fixed extraction instruction plus the image at `path` to the
    /// model and return the response text verbatim.
    pub async fn analyze_image(&self, path: &Path) -> Result<String> {
        info!(path = %path.display(), "Analyzing label image");

        let messages = vec![
            self.system_message.clone(),
            LlmMessage::user(ANALYSIS_INSTRUCTION)
                .with_images(vec![path.to_string_lossy().to_string()]),
        ];

        self.broker.generate(&messages, Some(&self.tools), None).await
    }

    /// Send a text-only prompt to the model and return the response text verbatim.
    pub async fn ask(&self, question: &str) -> Result<String> {
        info!("Answering question");

        let messages = vec![self.system_message.clone(), LlmMessage::user(question)];

        self.broker.generate(&messages, Some(&self.tools), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::gateway::{CompletionConfig, LlmGateway};
    use crate::llm::models::{LlmGatewayResponse, MessageRole};
    use std::sync::Mutex;

    struct RecordingGateway {
        reply: String,
        requests: Mutex<Vec<Vec<LlmMessage>>>,
    }

    impl RecordingGateway {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmGateway for RecordingGateway {
        async fn complete(
            &self,
            _model: &str,
            messages: &[LlmMessage],
            _tools: Option<&[Box<dyn LlmTool>]>,
            _config: &CompletionConfig,
        ) -> Result<LlmGatewayResponse> {
            self.requests.lock().unwrap().push(messages.to_vec());
            Ok(LlmGatewayResponse {
                content: Some(self.reply.clone()),
                tool_calls: vec![],
            })
        }
    }

    fn agent_with_gateway(gateway: Arc<RecordingGateway>) -> IngredientAgent {
        let broker = LlmBroker::new("test-model", gateway);
        IngredientAgent::new(broker, vec![])
    }

    #[tokio::test]
    async fn test_analyze_image_sends_instruction_and_image() {
        let gateway = Arc::new(RecordingGateway::new("Sugar, cocoa."));
        let agent = agent_with_gateway(gateway.clone());

        let result = agent.analyze_image(Path::new("/tmp/label.jpg")).await.unwrap();
        assert_eq!(result, "Sugar, cocoa.");

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);

        let user_msg = &requests[0][1];
        assert_eq!(user_msg.role, MessageRole::User);
        assert_eq!(user_msg.content.as_deref(), Some(ANALYSIS_INSTRUCTION));
        assert_eq!(user_msg.image_paths, Some(vec!["/tmp/label.jpg".to_string()]));
    }

    #[tokio::test]
    async fn test_ask_sends_plain_question() {
        let gateway = Arc::new(RecordingGateway::new("It contains dairy."));
        let agent = agent_with_gateway(gateway.clone());

        let result = agent.ask("does this contain dairy?").await.unwrap();
        assert_eq!(result, "It contains dairy.");

        let requests = gateway.requests.lock().unwrap();
        let user_msg = &requests[0][1];
        assert_eq!(user_msg.content.as_deref(), Some("does this contain dairy?"));
        assert!(user_msg.image_paths.is_none());
    }

    #[tokio::test]
    async fn test_system_message_carries_role_and_formatting() {
        let gateway = Arc::new(RecordingGateway::new("ok"));
        let agent = agent_with_gateway(gateway.clone());

        agent.ask("hi").await.unwrap();

        let requests = gateway.requests.lock().unwrap();
        let system_msg = &requests[0][0];
        assert_eq!(system_msg.role, MessageRole::System);

        let text = system_msg.content.as_deref().unwrap();
        assert!(text.contains(SYSTEM_PROMPT));
        assert!(text.contains(INSTRUCTIONS[0]));
        assert!(text.contains(MARKDOWN_DIRECTIVE));
    }
}
