// Aegis - AI compliance auditor for video content
//
// Pipeline:
// - Transcript acquisition via a hosted transcription service
// - Per-platform LLM compliance analysis with refusal detection and
//   one-shot escalation
// - Section parsing of the raw reports into a structured view

// Core modules
pub mod audit;
pub mod config;
pub mod llm;
pub mod report;
pub mod rules;
pub mod transcript;

// Re-export the main entry points
pub use audit::{AnalysisRun, AuditRunner, PlatformReport, ReportOrchestrator};
pub use config::AegisConfig;
pub use report::{parse_report, ParsedReport, ReportContent};
