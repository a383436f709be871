//! Error types and result aliases for the labelwise library.
//!
//! This module defines the core error type [`LabelwiseError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelwiseError {
    #[error("LLM gateway error: {0}")]
    Gateway(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabelwiseError>;
