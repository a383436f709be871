pub mod agent;
pub mod catalog;
pub mod config;
pub mod error;
pub mod imaging;
pub mod llm;
pub mod orchestrator;
pub mod prompts;
pub mod session;

pub use error::{LabelwiseError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::IngredientAgent;
    pub use crate::config::AppConfig;
    pub use crate::error::{LabelwiseError, Result};
    pub use crate::imaging::{ImageData, TempImage};
    pub use crate::llm::gateways::GeminiGateway;
    pub use crate::llm::tools::{FunctionDescriptor, LlmTool, ToolDescriptor};
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
    pub use crate::orchestrator::Orchestrator;
    pub use crate::session::{Session, SessionPhase, SourceKind};
}
