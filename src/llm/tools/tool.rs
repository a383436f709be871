use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Descriptor for tool function parameters
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait for LLM tools
#[async_trait]
pub trait LlmTool: Send + Sync {
    /// Execute the tool with given arguments
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value>;

    /// Get tool descriptor for LLM
    fn descriptor(&self) -> ToolDescriptor;

    /// Check if this tool matches the given name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().function.name == name
    }

    /// Clone the tool into a Box
    ///
    /// This method is required to support cloning trait objects.
    /// Implementations should return `Box::new(self.clone())`.
    fn clone_box(&self) -> Box<dyn LlmTool>;
}
