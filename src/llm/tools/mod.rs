pub mod tavily_search_tool;
mod tool;

pub use tavily_search_tool::{SearchResult, TavilySearchTool};
pub use tool::{FunctionDescriptor, LlmTool, ToolDescriptor};
