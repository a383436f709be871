//! Adapter for converting LLM messages to the Gemini REST format.

use crate::error::Result;
use crate::llm::models::{LlmMessage, MessageRole};
use base64::Engine;
use serde_json::{json, Value};
use std::path::Path;
use tracing::warn;

/// Determine image MIME type from file extension.
fn get_mime_type(file_path: &str) -> &'static str {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg", // Default to jpeg for unknown types
    }
}

/// Read an image file and encode it as an inline data part.
fn encode_image_part(file_path: &str) -> Result<Value> {
    let bytes = std::fs::read(file_path)?;
    let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

    Ok(json!({
        "inline_data": {
            "mime_type": get_mime_type(file_path),
            "data": data
        }
    }))
}

/// Adapt LLM messages to Gemini request fields.
///
/// Returns the system instruction (if any system messages are present) and the
/// `contents` array. Gemini carries the system prompt outside the turn list, so
/// system messages are folded together rather than interleaved.
pub fn adapt_messages_to_gemini(messages: &[LlmMessage]) -> Result<(Option<Value>, Vec<Value>)> {
    let mut system_texts: Vec<&str> = Vec::new();
    let mut contents = Vec::new();

    for msg in messages {
        match msg.role {
            MessageRole::System => {
                if let Some(ref text) = msg.content {
                    system_texts.push(text);
                }
            }
            MessageRole::User => {
                let mut parts = Vec::new();

                if let Some(ref text) = msg.content {
                    if !text.is_empty() {
                        parts.push(json!({"text": text}));
                    }
                }

                if let Some(ref image_paths) = msg.image_paths {
                    for path in image_paths {
                        match encode_image_part(path) {
                            Ok(part) => parts.push(part),
                            Err(e) => {
                                warn!(path = path.as_str(), error = %e, "Failed to encode image");
                                return Err(e);
                            }
                        }
                    }
                }

                contents.push(json!({"role": "user", "parts": parts}));
            }
            MessageRole::Assistant => {
                let mut parts = Vec::new();

                if let Some(ref text) = msg.content {
                    if !text.is_empty() {
                        parts.push(json!({"text": text}));
                    }
                }

                if let Some(ref tool_calls) = msg.tool_calls {
                    for call in tool_calls {
                        parts.push(json!({
                            "functionCall": {
                                "name": call.name,
                                "args": call.arguments
                            }
                        }));
                    }
                }

                contents.push(json!({"role": "model", "parts": parts}));
            }
            MessageRole::Tool => {
                // Tool output goes back as a functionResponse part in a user turn
                let name = msg
                    .tool_calls
                    .as_ref()
                    .and_then(|calls| calls.first())
                    .map(|c| c.name.clone())
                    .unwrap_or_default();

                let response: Value = match msg.content {
                    Some(ref text) => serde_json::from_str(text)
                        .unwrap_or_else(|_| json!({"content": text})),
                    None => json!({}),
                };

                contents.push(json!({
                    "role": "user",
                    "parts": [{
                        "functionResponse": {
                            "name": name,
                            "response": {"result": response}
                        }
                    }]
                }));
            }
        }
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(json!({"parts": [{"text": system_texts.join("\n\n")}]}))
    };

    Ok((system_instruction, contents))
}
