//! LLM Provider implementations
//!
//! Each provider implements the LlmProvider trait for a specific backend

pub mod ollama;
pub mod openai;

pub use ollama::{OllamaConfig, OllamaProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};
