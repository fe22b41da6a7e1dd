//! Audit run fold
//!
//! Processes the selected platforms strictly sequentially and folds the
//! per-platform outcomes into one immutable run. Failures are handled at
//! platform granularity: one platform's failure never aborts the others.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::orchestrator::ReportOrchestrator;
use crate::report::{parse_report, ParsedReport, ReportContent};
use crate::rules::{RuleError, RuleStore};

/// One platform's report within a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report", rename_all = "snake_case")]
pub enum PlatformReport {
    /// Sections extracted successfully
    Structured(ParsedReport),
    /// Raw model output kept verbatim; segmentation was not possible
    Unstructured(String),
}

/// One user-triggered audit over a transcript and a platform selection.
/// Replaced wholesale by the next run, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub video_name: Option<String>,
    /// Platform name -> report; platforms whose rules were absent or whose
    /// analysis failed contribute no entry
    pub reports: BTreeMap<String, PlatformReport>,
}

/// Drives one audit run: rules lookup, analysis, parsing, per platform
pub struct AuditRunner {
    store: RuleStore,
    orchestrator: ReportOrchestrator,
}

impl AuditRunner {
    pub fn new(store: RuleStore, orchestrator: ReportOrchestrator) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    /// Run the audit for every selected platform, sequentially.
    pub async fn run(
        &self,
        transcript: &str,
        platforms: &[String],
        video_name: Option<String>,
    ) -> AnalysisRun {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut reports = BTreeMap::new();

        for platform in platforms {
            let rules = match self.store.load(platform) {
                Ok(rules) => rules,
                Err(RuleError::NotFound { path, .. }) => {
                    log::warn!(
                        "No rule file for '{}' (looked at {}); skipping platform",
                        platform,
                        path.display()
                    );
                    continue;
                }
                Err(e) => {
                    log::warn!("Cannot load rules for '{}': {}; skipping platform", platform, e);
                    continue;
                }
            };

            match self.orchestrator.analyze(transcript, &rules, platform).await {
                Ok(raw) => {
                    let report = match parse_report(&raw) {
                        ReportContent::Structured(parsed) => PlatformReport::Structured(parsed),
                        ReportContent::Degraded => {
                            log::warn!(
                                "Report for '{}' could not be segmented; keeping raw text",
                                platform
                            );
                            PlatformReport::Unstructured(raw)
                        }
                    };
                    reports.insert(platform.clone(), report);
                    log::info!("Analysis complete for '{}'", platform);
                }
                Err(e) => {
                    log::warn!("Analysis failed for '{}': {}", platform, e);
                }
            }
        }

        AnalysisRun {
            id,
            started_at,
            video_name,
            reports,
        }
    }
}
