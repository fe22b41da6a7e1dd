//! LLM module for AI-powered compliance analysis
//!
//! Supports multiple backends:
//! - OpenAI chat completions API (requires API key)
//! - Ollama API (requires running Ollama server)

pub mod provider;
pub mod providers;

pub use provider::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, Message, MessageRole,
};
pub use providers::{OllamaConfig, OllamaProvider, OpenAiConfig, OpenAiProvider};
