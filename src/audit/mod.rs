//! Audit module: per-platform compliance analysis
//!
//! Module structure:
//! - prompt.rs: primary + escalation prompt construction
//! - orchestrator.rs: request/gate/escalate state machine
//! - runner.rs: sequential fold over the platform selection

pub mod orchestrator;
pub mod prompt;
pub mod runner;

pub use orchestrator::{AuditError, OrchestratorConfig, ReportOrchestrator};
pub use runner::{AnalysisRun, AuditRunner, PlatformReport};
