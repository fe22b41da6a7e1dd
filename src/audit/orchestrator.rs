//! Report request orchestration
//!
//! Issues the primary analysis request, inspects the result for refusal
//! signatures, and escalates once with a structurally different prompt when
//! the model ignored the supplied transcript.

use std::fmt;
use std::sync::Arc;

use crate::audit::prompt;
use crate::llm::{CompletionRequest, LlmProvider};

/// Refusal/failure signatures: their presence in a response means the model
/// ignored the supplied transcript rather than analyzing it.
const GATE_PHRASES: [&str; 4] = [
    "missing",
    "unable to provide",
    "language translation",
    "does not provide enough information",
];

/// Minimum non-whitespace characters for a transcript to be analyzable
const MIN_TRANSCRIPT_CHARS: usize = 10;

/// Error types for one platform's analysis
#[derive(Debug, Clone)]
pub enum AuditError {
    /// Transcript empty or too short; no request was issued
    InsufficientInput,
    /// The analysis request failed at the transport level
    Analysis(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::InsufficientInput => {
                write!(f, "No valid transcript content provided for analysis")
            }
            AuditError::Analysis(msg) => write!(f, "Analysis request failed: {}", msg),
        }
    }
}

impl std::error::Error for AuditError {}

/// Case-insensitive scan for any refusal signature
pub(crate) fn contains_gate_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    GATE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Sampling temperature; kept low to minimize variance across runs
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: None,
        }
    }
}

/// Stateless per-platform analysis driver
pub struct ReportOrchestrator {
    llm: Arc<dyn LlmProvider>,
    config: OrchestratorConfig,
}

impl ReportOrchestrator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self::with_config(llm, OrchestratorConfig::default())
    }

    pub fn with_config(llm: Arc<dyn LlmProvider>, config: OrchestratorConfig) -> Self {
        Self { llm, config }
    }

    fn request(&self, system: String, user: String) -> CompletionRequest {
        CompletionRequest {
            temperature: Some(self.config.temperature),
            max_tokens: self.config.max_tokens,
            ..CompletionRequest::with_system_and_user(system, user)
        }
    }

    /// Produce one raw compliance report for one platform.
    ///
    /// At most two requests are issued: the primary, and one escalation if
    /// the primary response carries a refusal signature. The escalation
    /// result replaces the primary unconditionally.
    pub async fn analyze(
        &self,
        transcript: &str,
        rules: &str,
        platform: &str,
    ) -> Result<String, AuditError> {
        let content_chars = transcript.chars().filter(|c| !c.is_whitespace()).count();
        if content_chars < MIN_TRANSCRIPT_CHARS {
            return Err(AuditError::InsufficientInput);
        }

        let primary = self.request(
            prompt::primary_system_instruction(platform),
            prompt::build_primary_prompt(transcript, rules, platform),
        );

        let response = self
            .llm
            .complete(primary)
            .await
            .map_err(|e| AuditError::Analysis(e.to_string()))?;
        let mut candidate = response.content;

        if contains_gate_phrase(&candidate) {
            log::warn!(
                "Refusal signature in {} report; escalating with corrective prompt",
                platform
            );

            let escalation = self.request(
                prompt::ESCALATION_SYSTEM_INSTRUCTION.to_string(),
                prompt::build_escalation_prompt(transcript, rules, platform),
            );

            candidate = self
                .llm
                .complete(escalation)
                .await
                .map_err(|e| AuditError::Analysis(e.to_string()))?
                .content;
        }

        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, LlmError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Provider that replays a script of canned outcomes and counts calls
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn provider_name(&self) -> &'static str {
            "scripted"
        }

        async fn is_ready(&self) -> bool {
            true
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("ScriptedProvider ran out of responses");
            next.map(|content| CompletionResponse {
                content,
                model: "scripted".to_string(),
                prompt_tokens: None,
                completion_tokens: None,
            })
        }
    }

    const TRANSCRIPT: &str = "[00:00 - 00:05] plenty of real spoken content to analyze";

    #[test]
    fn test_gate_phrase_detection_is_case_insensitive() {
        assert!(contains_gate_phrase(
            "The transcript Does Not Provide Enough Information."
        ));
        assert!(contains_gate_phrase("I am UNABLE TO PROVIDE a report"));
        assert!(!contains_gate_phrase(
            "A thorough report grounded in the transcript."
        ));
    }

    #[tokio::test]
    async fn test_short_transcript_fails_without_network_call() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let result = orchestrator.analyze("a b c", "rules", "YouTube").await;

        assert!(matches!(result, Err(AuditError::InsufficientInput)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clean_response_makes_exactly_one_call() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(
            "A full report with all four sections present.".to_string(),
        )]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let report = orchestrator
            .analyze(TRANSCRIPT, "rules", "YouTube")
            .await
            .unwrap();

        assert_eq!(report, "A full report with all four sections present.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_gate_phrase_triggers_exactly_one_escalation() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("The transcript does not provide enough information.".to_string()),
            Ok("Corrected report grounded in the transcript.".to_string()),
        ]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let report = orchestrator
            .analyze(TRANSCRIPT, "rules", "YouTube")
            .await
            .unwrap();

        assert_eq!(report, "Corrected report grounded in the transcript.");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_escalation_result_kept_even_if_it_gates_again() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("Unable to provide a report.".to_string()),
            Ok("Still unable to provide a report.".to_string()),
        ]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let report = orchestrator
            .analyze(TRANSCRIPT, "rules", "YouTube")
            .await
            .unwrap();

        // At most one escalation per call; the second result stands as-is
        assert_eq!(report, "Still unable to provide a report.");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_analysis_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(LlmError::RequestFailed(
            "connection reset".to_string(),
        ))]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let result = orchestrator.analyze(TRANSCRIPT, "rules", "YouTube").await;

        match result {
            Err(AuditError::Analysis(msg)) => assert!(msg.contains("connection reset")),
            other => panic!("Expected Analysis error, got {:?}", other),
        }
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_escalation_transport_failure_surfaces() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("Response mentions a language translation issue.".to_string()),
            Err(LlmError::RequestFailed("timeout".to_string())),
        ]));
        let orchestrator = ReportOrchestrator::new(provider.clone());

        let result = orchestrator.analyze(TRANSCRIPT, "rules", "YouTube").await;

        assert!(matches!(result, Err(AuditError::Analysis(_))));
        assert_eq!(provider.call_count(), 2);
    }
}
