//! Application configuration
//!
//! Credentials and endpoints are never read from ambient globals by the
//! components that use them: everything is collected here once and passed
//! into constructors.

use std::path::PathBuf;
use std::str::FromStr;

/// Which LLM backend performs the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Ollama,
}

impl FromStr for LlmBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(format!(
                "Unknown LLM backend '{}' (expected 'openai' or 'ollama')",
                other
            )),
        }
    }
}

impl std::fmt::Display for LlmBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmBackend::OpenAi => write!(f, "openai"),
            LlmBackend::Ollama => write!(f, "ollama"),
        }
    }
}

/// Top-level configuration for one audit session
#[derive(Debug, Clone)]
pub struct AegisConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub videodb_api_key: String,
    pub videodb_base_url: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub backend: LlmBackend,
    /// Directory holding `<platform>.txt` rule documents
    pub rules_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for AegisConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o".to_string(),
            videodb_api_key: String::new(),
            videodb_base_url: "https://api.videodb.io".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.1".to_string(),
            backend: LlmBackend::OpenAi,
            rules_dir: default_rules_dir(),
            request_timeout_secs: 120,
        }
    }
}

/// Default rules location: `<config dir>/aegis/rules`, falling back to a
/// local `rules/` directory when no config dir is available
fn default_rules_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("aegis").join("rules"))
        .unwrap_or_else(|| PathBuf::from("rules"))
}

impl AegisConfig {
    /// Build a config from `AEGIS_*` environment variables, starting from
    /// the defaults. This is the only place the environment is consulted.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("AEGIS_OPENAI_API_KEY") {
            config.openai_api_key = v;
        }
        if let Ok(v) = std::env::var("AEGIS_OPENAI_BASE_URL") {
            config.openai_base_url = v;
        }
        if let Ok(v) = std::env::var("AEGIS_OPENAI_MODEL") {
            config.openai_model = v;
        }
        if let Ok(v) = std::env::var("AEGIS_VIDEODB_API_KEY") {
            config.videodb_api_key = v;
        }
        if let Ok(v) = std::env::var("AEGIS_VIDEODB_BASE_URL") {
            config.videodb_base_url = v;
        }
        if let Ok(v) = std::env::var("AEGIS_OLLAMA_BASE_URL") {
            config.ollama_base_url = v;
        }
        if let Ok(v) = std::env::var("AEGIS_OLLAMA_MODEL") {
            config.ollama_model = v;
        }
        if let Ok(v) = std::env::var("AEGIS_LLM_BACKEND") {
            match v.parse() {
                Ok(backend) => config.backend = backend,
                Err(e) => log::warn!("Ignoring AEGIS_LLM_BACKEND: {}", e),
            }
        }
        if let Ok(v) = std::env::var("AEGIS_RULES_DIR") {
            config.rules_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("AEGIS_REQUEST_TIMEOUT_SECS") {
            match v.parse() {
                Ok(secs) => config.request_timeout_secs = secs,
                Err(_) => log::warn!("Ignoring non-numeric AEGIS_REQUEST_TIMEOUT_SECS: {}", v),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("openai".parse::<LlmBackend>().unwrap(), LlmBackend::OpenAi);
        assert_eq!("Ollama".parse::<LlmBackend>().unwrap(), LlmBackend::Ollama);
        assert!("claude".parse::<LlmBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AegisConfig::default();
        assert_eq!(config.backend, LlmBackend::OpenAi);
        assert_eq!(config.openai_model, "gpt-4o");
        assert!(config.openai_api_key.is_empty());
    }
}
