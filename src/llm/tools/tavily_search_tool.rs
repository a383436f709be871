use crate::error::{LabelwiseError, Result};
use crate::llm::tools::{FunctionDescriptor, LlmTool, ToolDescriptor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

const BASE_URL: &str = "https://api.tavily.com/search";
const MAX_RESULTS: usize = 5;
const TIMEOUT_SECONDS: u64 = 10;

/// A web search result from the Tavily search API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The title of the search result
    pub title: String,
    /// The URL of the search result
    pub url: String,
    /// Extracted page content relevant to the query
    pub content: String,
}

/// Tool for searching the web using the Tavily search API
///
/// The agent exposes this tool to the model so it can look up product and
/// ingredient information during reasoning. Requires a Tavily API key.
#[derive(Clone)]
pub struct TavilySearchTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilySearchTool {
    /// Creates a new TavilySearchTool with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECONDS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a tool pointed at a custom endpoint (for testing)
    #[cfg(test)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut tool = Self::new(api_key);
        tool.base_url = base_url.into();
        tool
    }

    /// Build the JSON request body for a query
    fn request_body(&self, query: &str) -> Value {
        json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": "basic",
            "max_results": MAX_RESULTS,
        })
    }

    /// Perform the web search
    async fn perform_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&self.request_body(query))
            .send()
            .await
            .map_err(LabelwiseError::Http)?;

        if !response.status().is_success() {
            return Err(LabelwiseError::Api(format!(
                "Tavily request failed with status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(LabelwiseError::Http)?;

        Self::parse_results(&body)
    }

    /// Parse search results out of a Tavily response body
    fn parse_results(body: &Value) -> Result<Vec<SearchResult>> {
        let results = body["results"]
            .as_array()
            .ok_or_else(|| LabelwiseError::Api("Tavily response missing results".to_string()))?;

        Ok(results
            .iter()
            .take(MAX_RESULTS)
            .filter_map(|r| {
                let url = r["url"].as_str()?.to_string();
                Some(SearchResult {
                    title: r["title"].as_str().unwrap_or_default().to_string(),
                    url,
                    content: r["content"].as_str().unwrap_or_default().to_string(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl LlmTool for TavilySearchTool {
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let query = args.get("query").and_then(|v| v.as_str()).ok_or_else(|| {
            LabelwiseError::InvalidArgument("query parameter is required".to_string())
        })?;

        if query.is_empty() {
            return Err(LabelwiseError::InvalidArgument(
                "query parameter cannot be empty".to_string(),
            ));
        }

        let results = self
            .perform_search(query)
            .await
            .map_err(|e| LabelwiseError::Tool(format!("Search failed: {}", e)))?;

        Ok(json!(results))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: "tavily_search".to_string(),
                description: "Search the web for current information about products, ingredients, and additives. Returns search results including title, URL, and extracted content for each result.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                }),
            },
        }
    }

    fn clone_box(&self) -> Box<dyn LlmTool> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn sample_response() -> Value {
        json!({
            "query": "what is maltodextrin",
            "results": [
                {
                    "title": "Maltodextrin - Wikipedia",
                    "url": "https://en.wikipedia.org/wiki/Maltodextrin",
                    "content": "Maltodextrin is a polysaccharide used as a food additive.",
                    "score": 0.98
                },
                {
                    "title": "Is Maltodextrin Bad for You?",
                    "url": "https://example.com/maltodextrin",
                    "content": "Maltodextrin is a common thickener and filler.",
                    "score": 0.91
                }
            ]
        })
    }

    #[test]
    fn test_descriptor() {
        let tool = TavilySearchTool::new("test-key");
        let descriptor = tool.descriptor();

        assert_eq!(descriptor.r#type, "function");
        assert_eq!(descriptor.function.name, "tavily_search");
        assert!(descriptor.function.description.contains("Search the web"));

        let params = descriptor.function.parameters;
        assert_eq!(params["type"], "object");
        assert!(params["properties"]["query"].is_object());
        assert_eq!(params["required"][0], "query");
    }

    #[test]
    fn test_request_body() {
        let tool = TavilySearchTool::new("test-key");
        let body = tool.request_body("palm oil sustainability");

        assert_eq!(body["api_key"], "test-key");
        assert_eq!(body["query"], "palm oil sustainability");
        assert_eq!(body["max_results"], MAX_RESULTS);
    }

    #[test]
    fn test_parse_results() {
        let results = TavilySearchTool::parse_results(&sample_response()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Maltodextrin - Wikipedia");
        assert_eq!(results[0].url, "https://en.wikipedia.org/wiki/Maltodextrin");
        assert!(results[0].content.contains("polysaccharide"));
        assert_eq!(results[1].title, "Is Maltodextrin Bad for You?");
    }

    #[test]
    fn test_parse_results_missing_results() {
        let body = json!({"query": "test"});
        let err = TavilySearchTool::parse_results(&body).unwrap_err();
        assert!(err.to_string().contains("missing results"));
    }

    #[test]
    fn test_parse_results_skips_entries_without_url() {
        let body = json!({
            "results": [
                {"title": "No url here", "content": "orphan"},
                {"title": "Valid", "url": "https://example.com", "content": "ok"}
            ]
        });

        let results = TavilySearchTool::parse_results(&body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Valid");
    }

    #[test]
    fn test_max_results_limit() {
        let entries: Vec<Value> = (0..12)
            .map(|i| {
                json!({
                    "title": format!("Result {}", i),
                    "url": format!("https://example.com/{}", i),
                    "content": format!("Snippet {}", i)
                })
            })
            .collect();
        let body = json!({ "results": entries });

        let results = TavilySearchTool::parse_results(&body).unwrap();
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[test]
    fn test_tool_matches() {
        let tool = TavilySearchTool::new("test-key");
        assert!(tool.matches("tavily_search"));
        assert!(!tool.matches("other_tool"));
    }

    #[tokio::test]
    async fn test_run_missing_query() {
        let tool = TavilySearchTool::new("test-key");
        let args = HashMap::new();

        let result = tool.run(&args).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("query parameter is required"));
    }

    #[tokio::test]
    async fn test_run_empty_query() {
        let tool = TavilySearchTool::new("test-key");
        let mut args = HashMap::new();
        args.insert("query".to_string(), json!(""));

        let result = tool.run(&args).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("query parameter cannot be empty"));
    }

    #[tokio::test]
    async fn test_perform_search_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sample_response().to_string())
            .create_async()
            .await;

        let tool = TavilySearchTool::with_base_url("test-key", server.url() + "/");
        let results = tool.perform_search("maltodextrin").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Maltodextrin - Wikipedia");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_perform_search_http_error() {
        let mut server = Server::new_async().await;
        let mock = server.mock("POST", "/").with_status(500).create_async().await;

        let tool = TavilySearchTool::with_base_url("test-key", server.url() + "/");
        let err = tool.perform_search("anything").await.unwrap_err();

        assert!(err.to_string().contains("500"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_reports_tool_error() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("POST", "/").with_status(403).create_async().await;

        let tool = TavilySearchTool::with_base_url("bad-key", server.url() + "/");
        let mut args = HashMap::new();
        args.insert("query".to_string(), json!("anything"));

        let err = tool.run(&args).await.unwrap_err();
        assert!(err.to_string().contains("Search failed"));
    }

    #[test]
    fn test_clone_box() {
        let tool = TavilySearchTool::new("test-key");
        let cloned = tool.clone_box();

        assert_eq!(cloned.descriptor().function.name, tool.descriptor().function.name);
    }

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult {
            title: "Test Title".to_string(),
            url: "https://example.com".to_string(),
            content: "Test content".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Test Title"));
        assert!(json.contains("https://example.com"));

        let deserialized: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result);
    }
}
